/* packages/server/core/rust/src/resolve.rs */

use tracing::debug;

use crate::locale::LocaleConfig;

/// Cookie written by the language switcher; beats Accept-Language when it names a supported locale.
pub const LOCALE_COOKIE: &str = "ceremonia-locale";

/// Header-derived inputs for locale negotiation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegotiationInput<'a> {
  pub cookie_header: Option<&'a str>,
  pub accept_language: Option<&'a str>,
}

/// Negotiation chain: cookie("ceremonia-locale") -> Accept-Language -> default locale.
/// Never fails; anything unusable degrades to the default.
pub fn negotiate_locale(input: &NegotiationInput<'_>, config: &LocaleConfig) -> String {
  if let Some(header) = input.cookie_header {
    if let Some(loc) = parse_cookie_locale(header, LOCALE_COOKIE, config) {
      return loc;
    }
  }

  if let Some(header) = input.accept_language {
    if let Some(loc) = match_accept_language(header, config) {
      return loc;
    }
    debug!(header, "no supported locale in Accept-Language, using default");
  }

  config.default.clone()
}

pub fn parse_cookie_locale(header: &str, name: &str, config: &LocaleConfig) -> Option<String> {
  for pair in header.split(';') {
    let pair = pair.trim();
    if let Some((k, v)) = pair.split_once('=') {
      if k.trim() == name {
        if let Some(loc) = config.find(v.trim()) {
          return Some(loc.to_string());
        }
      }
    }
  }
  None
}

/// Parse an Accept-Language header into `(tag, q)` pairs ordered by descending weight.
/// Ties keep header order. Entries with `q <= 0` are dropped; unparseable weights count as 1.
pub fn parse_accept_language(header: &str) -> Vec<(&str, f64)> {
  let mut entries: Vec<(&str, f64)> = Vec::new();
  for part in header.split(',') {
    let part = part.trim();
    if part.is_empty() {
      continue;
    }
    let mut segments = part.split(';');
    let lang = segments.next().unwrap_or("").trim();
    if lang.is_empty() {
      continue;
    }
    let mut q = 1.0_f64;
    for s in segments {
      let s = s.trim();
      if let Some(val) = s.strip_prefix("q=") {
        if let Ok(v) = val.trim().parse::<f64>() {
          q = v.clamp(0.0, 1.0);
        }
      }
    }
    if q > 0.0 {
      entries.push((lang, q));
    }
  }

  // stable: equal weights keep the client's order
  entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
  entries
}

/// Best-fit match of the header's preferences against the supported locales:
/// exact tag first, then the language subtag (es-CO -> es). `*` selects the default.
pub fn match_accept_language(header: &str, config: &LocaleConfig) -> Option<String> {
  for (lang, _) in parse_accept_language(header) {
    if lang == "*" {
      return Some(config.default.clone());
    }
    if let Some(loc) = config.find(lang) {
      return Some(loc.to_string());
    }
    let primary = lang.split(['-', '_']).next().unwrap_or(lang);
    if let Some(loc) = config.find(primary) {
      return Some(loc.to_string());
    }
    // supported "es-MX" also serves a plain "es" preference
    if let Some(loc) = config.locales.iter().find(|l| {
      l.split(['-', '_']).next().is_some_and(|p| p.eq_ignore_ascii_case(primary))
    }) {
      return Some(loc.clone());
    }
  }
  None
}
