/* packages/server/adapter/axum/src/middleware.rs */

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use ceremonia_core::{RouteDecision, RouteRequest, resolve_route};
use tracing::debug;

use crate::handler::{AppState, session_token};

/// Locale carried by a request that passed the router; read by page handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

/// Prefixes that skip locale routing entirely.
const BYPASS_PREFIXES: &[&str] = &["/api/", "/health"];

fn is_bypassed(path: &str) -> bool {
  path == "/api" || BYPASS_PREFIXES.iter().any(|p| path.starts_with(p))
}

fn header_string(request: &Request, name: header::HeaderName) -> Option<String> {
  request.headers().get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

/// Runs the route policy ahead of every page. Session lookup happens here so the
/// policy itself only sees a boolean.
pub(crate) async fn route_layer(
  State(state): State<Arc<AppState>>,
  mut request: Request,
  next: Next,
) -> Response {
  if is_bypassed(request.uri().path()) {
    return next.run(request).await;
  }

  let token = session_token(request.headers(), &state.session_cookie);
  let route_request = RouteRequest {
    path: request.uri().path().to_string(),
    query: request.uri().query().map(str::to_string),
    accept_language: header_string(&request, header::ACCEPT_LANGUAGE),
    cookie_header: header_string(&request, header::COOKIE),
    has_session: false,
  };

  let has_session = match token {
    Some(token) => state.auth.get_session(token).await.is_some(),
    None => false,
  };
  let route_request = RouteRequest { has_session, ..route_request };

  match resolve_route(&route_request, &state.policy) {
    RouteDecision::Pass { locale } => {
      request.extensions_mut().insert(ResolvedLocale(locale));
      next.run(request).await
    }
    decision => {
      let location = decision.location().unwrap_or_else(|| format!("/{}", state.default_locale()));
      debug!(path = %route_request.path, %location, "redirecting");
      Redirect::temporary(&location).into_response()
    }
  }
}
