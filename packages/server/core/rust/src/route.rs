/* packages/server/core/rust/src/route.rs */

use tracing::debug;

use crate::locale::LocaleConfig;
use crate::resolve::{NegotiationInput, negotiate_locale};

/// Callback path registered with the auth provider, without a locale prefix.
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";
/// Query parameter carrying the return target on auth redirects.
pub const REDIRECT_TO_PARAM: &str = "redirectTo";

pub const DEFAULT_PROTECTED_SEGMENTS: &[&str] = &["booking", "profile"];

/// Per-request input to the router. Session lookup happens before construction;
/// only its presence reaches the decision.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
  pub path: String,
  /// Raw query string without the leading `?`.
  pub query: Option<String>,
  pub accept_language: Option<String>,
  pub cookie_header: Option<String>,
  pub has_session: bool,
}

impl RouteRequest {
  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into(), ..Self::default() }
  }

  pub fn query(mut self, query: impl Into<String>) -> Self {
    self.query = Some(query.into());
    self
  }

  pub fn accept_language(mut self, header: impl Into<String>) -> Self {
    self.accept_language = Some(header.into());
    self
  }

  pub fn cookie(mut self, header: impl Into<String>) -> Self {
    self.cookie_header = Some(header.into());
    self
  }

  pub fn session(mut self, has_session: bool) -> Self {
    self.has_session = has_session;
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
  /// Path is already localized and accessible; `locale` is its prefix.
  Pass { locale: String },
  RedirectToLocalized { path: String, query: Option<String> },
  RedirectToAuth { path: String, return_to: String },
}

impl RouteDecision {
  /// Location header value for redirect variants.
  pub fn location(&self) -> Option<String> {
    match self {
      Self::Pass { .. } => None,
      Self::RedirectToLocalized { path, query } => Some(match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.clone(),
      }),
      Self::RedirectToAuth { path, return_to } => {
        Some(format!("{path}?{REDIRECT_TO_PARAM}={}", urlencoding::encode(return_to)))
      }
    }
  }

  pub fn is_redirect(&self) -> bool {
    !matches!(self, Self::Pass { .. })
  }
}

/// Route policy: supported locales plus the path segments that require a session.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
  pub locales: LocaleConfig,
  pub protected_segments: Vec<String>,
}

impl RoutePolicy {
  pub fn new(locales: LocaleConfig) -> Self {
    Self {
      locales,
      protected_segments: DEFAULT_PROTECTED_SEGMENTS.iter().map(|s| (*s).to_string()).collect(),
    }
  }

  pub fn protected_segments(mut self, segments: Vec<String>) -> Self {
    self.protected_segments = segments;
    self
  }
}

impl Default for RoutePolicy {
  fn default() -> Self {
    Self::new(LocaleConfig::default())
  }
}

/// Supported locale named by the path's first segment, matched as a whole segment.
pub fn path_locale<'a>(path: &str, config: &'a LocaleConfig) -> Option<&'a str> {
  let first = path.strip_prefix('/')?.split('/').next()?;
  config.locales.iter().find(|l| l.as_str() == first).map(String::as_str)
}

pub fn is_protected_path(path: &str, segments: &[String]) -> bool {
  path.split('/').any(|seg| segments.iter().any(|p| p == seg))
}

/// Raw value of `name` in a query string, not decoded.
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
  query.split('&').find_map(|pair| {
    let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
    (k == name).then_some(v)
  })
}

/// Decide what to do with one inbound request. Exactly one decision per request.
pub fn resolve_route(req: &RouteRequest, policy: &RoutePolicy) -> RouteDecision {
  let config = &policy.locales;
  let negotiation = NegotiationInput {
    cookie_header: req.cookie_header.as_deref(),
    accept_language: req.accept_language.as_deref(),
  };

  // Provider callbacks arrive without a prefix; forward only the code.
  if req.path == AUTH_CALLBACK_PATH {
    if let Some(code) = req.query.as_deref().and_then(|q| query_param(q, "code")) {
      let locale = negotiate_locale(&negotiation, config);
      debug!(%locale, "localizing auth callback");
      return RouteDecision::RedirectToLocalized {
        path: format!("/{locale}{AUTH_CALLBACK_PATH}"),
        query: Some(format!("code={code}")),
      };
    }
  }

  let Some(locale) = path_locale(&req.path, config) else {
    let locale = negotiate_locale(&negotiation, config);
    let path = if req.path.starts_with('/') {
      format!("/{locale}{}", req.path)
    } else {
      format!("/{locale}/{}", req.path)
    };
    debug!(from = %req.path, to = %path, "adding locale prefix");
    return RouteDecision::RedirectToLocalized { path, query: req.query.clone() };
  };

  if !req.has_session && is_protected_path(&req.path, &policy.protected_segments) {
    debug!(path = %req.path, "protected path without session");
    return RouteDecision::RedirectToAuth {
      path: format!("/{locale}/auth"),
      return_to: req.path.clone(),
    };
  }

  RouteDecision::Pass { locale: locale.to_string() }
}
