/* packages/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use ceremonia_core::CeremoniaError;

use super::AppState;
use crate::error::AxumError;
use crate::middleware::ResolvedLocale;

/// Known page keys. Rendering is the frontend's job; the server only emits a localized shell.
const PAGES: &[&str] =
  &["home", "ceremonies", "therapists", "venue", "booking", "profile", "auth", "auth/error"];

pub(crate) fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

/// Page key for a localized path: `/es/booking/temazcal` -> `booking`, `/es` -> `home`.
fn page_key(path: &str, locale: &str) -> Option<&'static str> {
  let rest = path.strip_prefix('/')?.strip_prefix(locale)?;
  let rest = rest.trim_matches('/');
  if rest.is_empty() {
    return Some("home");
  }
  if let Some(key) = PAGES.iter().copied().find(|p| *p == rest) {
    return Some(key);
  }
  // detail pages: /booking/{ceremony}, /ceremonies/{id}, /therapists/{id}
  let (head, _) = rest.split_once('/')?;
  ["booking", "ceremonies", "therapists"].into_iter().find(|p| *p == head)
}

fn render_shell(state: &AppState, locale: &str, key: &str) -> String {
  let t = |k: &str| escape_html(&state.messages.translate(locale, "pages", k));
  let site = escape_html(&state.messages.translate(locale, "site", "name"));
  let title = t(&format!("{}.title", key.replace('/', ".")));
  let description = t(&format!("{}.description", key.replace('/', ".")));
  format!(
    "<!doctype html><html lang=\"{locale}\"><head><meta charset=\"utf-8\"><title>{title} | {site}</title></head>\
     <body><main data-page=\"{key}\"><h1>{title}</h1><p>{description}</p></main></body></html>"
  )
}

pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  request: Request,
) -> Result<Response, AxumError> {
  // Unknown /api routes never pass the locale middleware, so they carry no locale.
  let Some(ResolvedLocale(locale)) = request.extensions().get::<ResolvedLocale>().cloned() else {
    return Err(CeremoniaError::not_found("Not found").into());
  };
  if request.method() != Method::GET && request.method() != Method::HEAD {
    return Err(CeremoniaError::not_found("Not found").into());
  }

  match page_key(request.uri().path(), &locale) {
    Some(key) => Ok(Html(render_shell(&state, &locale, key)).into_response()),
    None => {
      let body = render_shell(&state, &locale, "not_found");
      Ok((StatusCode::NOT_FOUND, Html(body)).into_response())
    }
  }
}
