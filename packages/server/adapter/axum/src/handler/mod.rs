/* packages/server/adapter/axum/src/handler/mod.rs */

mod auth;
mod booking;
mod page;

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use ceremonia_core::route::RoutePolicy;
use ceremonia_core::{AuthProvider, BookingStore, Catalog, CeremoniaError, CeremoniaParts, Messages};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::error::AxumError;
use crate::middleware;

pub(crate) struct AppState {
  pub policy: RoutePolicy,
  pub messages: Messages,
  pub catalog: Catalog,
  pub auth: Arc<dyn AuthProvider>,
  pub bookings: Arc<dyn BookingStore>,
  pub session_cookie: String,
}

impl AppState {
  pub fn default_locale(&self) -> &str {
    &self.policy.locales.default
  }
}

pub(crate) fn build_router(parts: CeremoniaParts) -> Router {
  let state = Arc::new(AppState {
    policy: parts.policy,
    messages: parts.messages,
    catalog: parts.catalog,
    auth: parts.auth,
    bookings: parts.bookings,
    session_cookie: parts.session_cookie,
  });

  // Pages are matched by the fallback so that every localized path, including
  // "/en/" and unknown pages, goes through the locale middleware first.
  Router::new()
    .route("/health", get(handle_health))
    .route("/api/i18n/{locale}/{namespace}", get(handle_i18n))
    .route("/api/auth/sign-in", post(auth::handle_sign_in))
    .route("/api/auth/sign-out", post(auth::handle_sign_out))
    .route("/api/bookings/quote", post(booking::handle_quote))
    .route("/api/bookings", post(booking::handle_submit))
    .route("/api/bookings/{reference}", get(booking::handle_get))
    .route("/{locale}/auth/callback", get(auth::handle_callback))
    .fallback(page::handle_page)
    .layer(from_fn_with_state(state.clone(), middleware::route_layer))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn handle_health() -> axum::Json<serde_json::Value> {
  axum::Json(serde_json::json!({ "ok": true }))
}

/// Translation namespace for client-side rendering.
async fn handle_i18n(
  State(state): State<Arc<AppState>>,
  Path((locale, namespace)): Path<(String, String)>,
) -> Result<axum::Json<serde_json::Value>, AxumError> {
  if !state.policy.locales.is_supported(&locale) {
    return Err(CeremoniaError::not_found(format!("Unknown locale '{locale}'")).into());
  }
  let messages = state.messages.namespace(&locale, &namespace);
  Ok(axum::Json(serde_json::json!({ "ok": true, "data": { "locale": locale, "messages": messages } })))
}

/// JSON request body. Malformed input is a validation error in the usual error envelope.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, CeremoniaError> {
  serde_json::from_slice(body).map_err(|e| CeremoniaError::validation(e.to_string()))
}

/// Value of cookie `name` from a raw Cookie header.
pub(crate) fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
  header.split(';').find_map(|pair| {
    let (k, v) = pair.trim().split_once('=')?;
    (k.trim() == name).then(|| v.trim())
  })
}

pub(crate) fn session_token(headers: &axum::http::HeaderMap, cookie_name: &str) -> Option<String> {
  let header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
  cookie_value(header, cookie_name).filter(|v| !v.is_empty()).map(str::to_string)
}
