/* packages/server/adapter/axum/src/handler/booking.rs */

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use ceremonia_core::{BookingDraft, CeremoniaError, format_for_display};
use serde::Deserialize;

use super::{AppState, parse_body, session_token};
use crate::error::AxumError;

#[derive(Deserialize)]
pub(super) struct QuoteRequest {
  ceremony_id: String,
  #[serde(default)]
  extras: Vec<String>,
  locale: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct SubmitRequest {
  ceremony_id: String,
  #[serde(default)]
  extras: Vec<String>,
  name: String,
  email: String,
  date: Option<String>,
  participants: Option<u32>,
}

/// Draft for `ceremony_id` with each distinct extra toggled on once.
fn draft_with_extras(state: &AppState, ceremony_id: &str, extras: &[String]) -> Result<BookingDraft, CeremoniaError> {
  let ceremony = state
    .catalog
    .get(ceremony_id)
    .ok_or_else(|| CeremoniaError::not_found(format!("Ceremony '{ceremony_id}' not found")))?;
  let mut draft = BookingDraft::new(ceremony);
  let distinct: BTreeSet<&str> = extras.iter().map(String::as_str).collect();
  for extra in distinct {
    draft.toggle_extra(extra);
  }
  Ok(draft)
}

fn now_ms() -> Result<u64, CeremoniaError> {
  u64::try_from(chrono::Utc::now().timestamp_millis())
    .map_err(|_| CeremoniaError::internal("system clock is before the unix epoch"))
}

pub(super) async fn handle_quote(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<axum::Json<serde_json::Value>, AxumError> {
  let body: QuoteRequest = parse_body(&body)?;
  let draft = draft_with_extras(&state, &body.ceremony_id, &body.extras)?;
  let locale = body
    .locale
    .filter(|l| state.policy.locales.is_supported(l))
    .unwrap_or_else(|| state.default_locale().to_string());
  let price = draft.price();
  Ok(axum::Json(serde_json::json!({
    "ok": true,
    "data": {
      "ceremony_id": draft.ceremony_id(),
      "selected": price.selected,
      "total": price.total,
      "discount_applied": price.discount_applied,
      "currency": draft.currency(),
      "formatted": format_for_display(price.total, draft.currency(), &locale),
    }
  })))
}

pub(super) async fn handle_submit(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<axum::Json<serde_json::Value>, AxumError> {
  let body: SubmitRequest = parse_body(&body)?;
  let mut draft = draft_with_extras(&state, &body.ceremony_id, &body.extras)?;
  draft.set_contact(body.name, body.email);
  if let Some(date) = body.date {
    draft.set_date(date);
  }
  if let Some(participants) = body.participants {
    draft.set_participants(participants);
  }

  let has_session = match session_token(&headers, &state.session_cookie) {
    Some(token) => state.auth.get_session(token).await.is_some(),
    None => false,
  };
  let submission = draft.into_submission(has_session, now_ms()?, rand::random::<u32>())?;
  let stored = state.bookings.submit(submission).await?;

  Ok(axum::Json(serde_json::json!({
    "ok": true,
    "data": {
      "reference": stored.reference,
      "total": stored.total,
      "currency": stored.currency,
      "status": stored.status,
    }
  })))
}

pub(super) async fn handle_get(
  State(state): State<Arc<AppState>>,
  Path(reference): Path<String>,
) -> Result<axum::Json<serde_json::Value>, AxumError> {
  let booking = state
    .bookings
    .get(reference.clone())
    .await
    .ok_or_else(|| CeremoniaError::not_found(format!("Booking '{reference}' not found")))?;
  Ok(axum::Json(serde_json::json!({ "ok": true, "data": booking })))
}
