/* packages/server/adapter/axum/src/handler/auth.rs */

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{info, warn};

use super::{AppState, parse_body, session_token};
use crate::error::AxumError;

#[derive(Deserialize)]
pub(super) struct CallbackQuery {
  code: Option<String>,
  next: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct SignInRequest {
  email: String,
  password: String,
}

fn session_cookie(name: &str, token: &str) -> String {
  format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax")
}

fn cleared_cookie(name: &str) -> String {
  format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn with_cookie(mut response: Response, cookie: &str) -> Response {
  if let Ok(value) = HeaderValue::from_str(cookie) {
    response.headers_mut().append(header::SET_COOKIE, value);
  }
  response
}

/// Same-site return target: a single leading slash inside `locale`, usable as a `Location` value.
fn local_target(next: Option<&str>, locale: &str) -> String {
  let home = format!("/{locale}");
  match next {
    Some(n)
      if !n.starts_with("//")
        && !n.chars().any(char::is_control)
        && (n == home || n.starts_with(&format!("{home}/"))) =>
    {
      n.to_string()
    }
    _ => home,
  }
}

/// Provider callback. A failed exchange lands on the auth error page; no retry.
pub(super) async fn handle_callback(
  State(state): State<Arc<AppState>>,
  Path(locale): Path<String>,
  Query(query): Query<CallbackQuery>,
) -> Response {
  let error_page = format!("/{locale}/auth/error");
  let Some(code) = query.code.filter(|c| !c.is_empty()) else {
    warn!("auth callback without code");
    return Redirect::temporary(&error_page).into_response();
  };

  match state.auth.exchange_code_for_session(code).await {
    Ok(session) => {
      info!(user_id = %session.user.id, "signed in via callback");
      let target = local_target(query.next.as_deref(), &locale);
      with_cookie(
        Redirect::temporary(&target).into_response(),
        &session_cookie(&state.session_cookie, &session.token),
      )
    }
    Err(e) => {
      warn!(error = %e, "auth code exchange failed");
      Redirect::temporary(&error_page).into_response()
    }
  }
}

pub(super) async fn handle_sign_in(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Response, AxumError> {
  let body: SignInRequest = parse_body(&body)?;
  let session = state.auth.sign_in(body.email, body.password).await?;
  let response =
    axum::Json(serde_json::json!({ "ok": true, "data": { "user": session.user } })).into_response();
  Ok(with_cookie(response, &session_cookie(&state.session_cookie, &session.token)))
}

pub(super) async fn handle_sign_out(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
  if let Some(token) = session_token(&headers, &state.session_cookie) {
    state.auth.sign_out(token).await;
  }
  with_cookie(
    axum::Json(serde_json::json!({ "ok": true })).into_response(),
    &cleared_cookie(&state.session_cookie),
  )
}
