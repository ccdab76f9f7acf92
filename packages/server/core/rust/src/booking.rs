/* packages/server/core/rust/src/booking.rs */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::BoxFuture;
use crate::catalog::Ceremony;
use crate::errors::CeremoniaError;
use crate::pricing::{BookingPriceState, PricingEngine};

pub const REFERENCE_PREFIX: &str = "BK-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
  /// Submitted by a signed-in user.
  Active,
  /// Guest booking; the contact email still has to be confirmed.
  PendingVerification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSubmission {
  pub reference: String,
  pub ceremony_id: String,
  pub contact: Contact,
  pub date: Option<String>,
  pub participants: u32,
  pub extras: Vec<String>,
  pub total: u64,
  pub currency: String,
  pub status: BookingStatus,
}

fn to_base36(mut n: u64) -> String {
  const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
  if n == 0 {
    return "0".to_string();
  }
  let mut out = Vec::new();
  while n > 0 {
    out.push(DIGITS[(n % 36) as usize]);
    n /= 36;
  }
  out.reverse();
  String::from_utf8_lossy(&out).into_owned()
}

/// Last `width` chars of `s`, left-padded with `0` when shorter.
fn tail(s: &str, width: usize) -> String {
  if s.len() >= width { s[s.len() - width..].to_string() } else { format!("{s:0>width$}") }
}

/// Booking reference: `BK-` + three name letters + base36 timestamp tail + base36 random tail.
pub fn generate_reference(name: &str, timestamp_ms: u64, random: u32) -> String {
  let mut initials: String =
    name.chars().filter(char::is_ascii_alphanumeric).take(3).collect::<String>().to_ascii_uppercase();
  while initials.len() < 3 {
    initials.push('X');
  }
  let stamp = tail(&to_base36(timestamp_ms), 6);
  let suffix = tail(&to_base36(u64::from(random)), 4);
  format!("{REFERENCE_PREFIX}{initials}{stamp}{suffix}")
}

fn is_plausible_email(email: &str) -> bool {
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.starts_with('.')
    && !domain.ends_with('.')
    && domain.contains('.')
    && !email.chars().any(char::is_whitespace)
}

/// Calendar date in `YYYY-MM-DD` form. The length check rejects chrono's unpadded fields.
fn is_iso_date(date: &str) -> bool {
  date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Booking form state for one ceremony. Owns the pricing engine; the total it submits is
/// always the engine's last computed value.
#[derive(Debug, Clone)]
pub struct BookingDraft {
  ceremony_id: String,
  currency: String,
  pricing: PricingEngine,
  contact: Option<Contact>,
  date: Option<String>,
  participants: u32,
}

impl BookingDraft {
  pub fn new(ceremony: &Ceremony) -> Self {
    Self {
      ceremony_id: ceremony.id.clone(),
      currency: ceremony.currency.clone(),
      pricing: ceremony.pricing(),
      contact: None,
      date: None,
      participants: 1,
    }
  }

  pub fn set_contact(&mut self, name: impl Into<String>, email: impl Into<String>) {
    self.contact = Some(Contact { name: name.into(), email: email.into() });
  }

  pub fn set_date(&mut self, date: impl Into<String>) {
    self.date = Some(date.into());
  }

  pub fn set_participants(&mut self, participants: u32) {
    self.participants = participants;
  }

  pub fn toggle_extra(&mut self, extra_id: &str) -> BookingPriceState {
    self.pricing.toggle_extra(extra_id)
  }

  pub fn price(&self) -> &BookingPriceState {
    self.pricing.state()
  }

  pub fn ceremony_id(&self) -> &str {
    &self.ceremony_id
  }

  pub fn currency(&self) -> &str {
    &self.currency
  }

  pub fn validate(&self) -> Result<(), CeremoniaError> {
    let Some(ref contact) = self.contact else {
      return Err(CeremoniaError::validation("contact details are required"));
    };
    if contact.name.trim().is_empty() {
      return Err(CeremoniaError::validation("name is required"));
    }
    if !is_plausible_email(contact.email.trim()) {
      return Err(CeremoniaError::validation(format!("invalid email \"{}\"", contact.email)));
    }
    if self.participants == 0 {
      return Err(CeremoniaError::validation("at least one participant is required"));
    }
    if let Some(ref date) = self.date {
      if !is_iso_date(date) {
        return Err(CeremoniaError::validation(format!("invalid date \"{date}\", expected YYYY-MM-DD")));
      }
    }
    Ok(())
  }

  /// Freeze the draft into a submission. Signed-in bookings are active immediately.
  pub fn into_submission(
    self,
    has_session: bool,
    timestamp_ms: u64,
    random: u32,
  ) -> Result<BookingSubmission, CeremoniaError> {
    self.validate()?;
    let extras = self.pricing.selected_extras().iter().map(|e| e.id.clone()).collect();
    let total = self.pricing.state().total;
    let Some(contact) = self.contact else {
      return Err(CeremoniaError::validation("contact details are required"));
    };
    let contact = Contact { name: contact.name.trim().to_string(), email: contact.email.trim().to_lowercase() };
    Ok(BookingSubmission {
      reference: generate_reference(&contact.name, timestamp_ms, random),
      ceremony_id: self.ceremony_id,
      contact,
      date: self.date,
      participants: self.participants,
      extras,
      total,
      currency: self.currency,
      status: if has_session { BookingStatus::Active } else { BookingStatus::PendingVerification },
    })
  }
}

/// Booking persistence capability.
pub trait BookingStore: Send + Sync {
  fn submit(&self, booking: BookingSubmission) -> BoxFuture<Result<BookingSubmission, CeremoniaError>>;

  fn get(&self, reference: String) -> BoxFuture<Option<BookingSubmission>>;
}

/// Process-local store; contents vanish on restart.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
  bookings: Arc<Mutex<HashMap<String, BookingSubmission>>>,
}

impl InMemoryBookingStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.bookings.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl BookingStore for InMemoryBookingStore {
  fn submit(&self, booking: BookingSubmission) -> BoxFuture<Result<BookingSubmission, CeremoniaError>> {
    let bookings = self.bookings.clone();
    Box::pin(async move {
      let mut bookings = bookings.lock().unwrap_or_else(PoisonError::into_inner);
      if bookings.contains_key(&booking.reference) {
        return Err(CeremoniaError::conflict(format!("booking {} already exists", booking.reference)));
      }
      info!(reference = %booking.reference, ceremony = %booking.ceremony_id, total = booking.total, "booking stored");
      bookings.insert(booking.reference.clone(), booking.clone());
      Ok(booking)
    })
  }

  fn get(&self, reference: String) -> BoxFuture<Option<BookingSubmission>> {
    let bookings = self.bookings.clone();
    Box::pin(async move {
      let bookings = bookings.lock().unwrap_or_else(PoisonError::into_inner);
      bookings.get(&reference).cloned()
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::locale::LocalizedText;
  use crate::pricing::ExtraOption;

  fn ceremony() -> Ceremony {
    let extra = |id: &str, price| ExtraOption {
      id: id.to_string(),
      label: LocalizedText { en: id.to_string(), es: id.to_string() },
      price,
      currency: "COP".to_string(),
    };
    Ceremony {
      id: "temazcal".into(),
      name: LocalizedText { en: "Temazcal".into(), es: "Temazcal".into() },
      base_price: 100_000,
      currency: "COP".into(),
      extras: vec![extra("cacao", 10_000), extra("massage", 20_000)],
    }
  }

  fn filled_draft() -> BookingDraft {
    let mut draft = BookingDraft::new(&ceremony());
    draft.set_contact("Ana María", " Ana@Example.com ");
    draft.set_date("2026-11-21");
    draft
  }

  #[test]
  fn reference_format() {
    let r = generate_reference("ana maría", 1_700_000_000_000, 123_456);
    assert!(r.starts_with("BK-ANA"), "{r}");
    assert_eq!(r.len(), REFERENCE_PREFIX.len() + 3 + 6 + 4);
    assert_eq!(r, r.to_ascii_uppercase());
  }

  #[test]
  fn reference_pads_short_names() {
    let r = generate_reference("Jo", 0, 0);
    assert_eq!(r, "BK-JOX0000000000");
  }

  #[test]
  fn reference_varies_with_random_suffix() {
    assert_ne!(generate_reference("Ana", 42, 1), generate_reference("Ana", 42, 2));
  }

  #[test]
  fn base36_encoding() {
    assert_eq!(to_base36(0), "0");
    assert_eq!(to_base36(35), "Z");
    assert_eq!(to_base36(36), "10");
  }

  #[test]
  fn submission_carries_engine_total() {
    let mut draft = filled_draft();
    draft.toggle_extra("cacao");
    draft.toggle_extra("massage");
    let expected = draft.price().total;
    let submission = draft.into_submission(true, 1_700_000_000_000, 7).unwrap();
    assert_eq!(submission.total, expected);
    assert_eq!(submission.total, 117_000);
    assert_eq!(submission.extras, vec!["cacao", "massage"]);
    assert_eq!(submission.status, BookingStatus::Active);
    assert_eq!(submission.contact.email, "ana@example.com");
  }

  #[test]
  fn guest_submission_is_pending_verification() {
    let submission = filled_draft().into_submission(false, 1, 1).unwrap();
    assert_eq!(submission.status, BookingStatus::PendingVerification);
    assert_eq!(submission.total, 100_000);
  }

  #[test]
  fn status_serializes_snake_case() {
    assert_eq!(serde_json::to_value(BookingStatus::PendingVerification).unwrap(), "pending_verification");
    assert_eq!(serde_json::to_value(BookingStatus::Active).unwrap(), "active");
  }

  #[test]
  fn validation_rejects_incomplete_drafts() {
    let draft = BookingDraft::new(&ceremony());
    assert!(draft.validate().is_err());

    let mut draft = filled_draft();
    draft.set_contact("Ana", "not-an-email");
    assert!(draft.validate().is_err());

    let mut draft = filled_draft();
    draft.set_participants(0);
    assert!(draft.validate().is_err());

    let mut draft = filled_draft();
    draft.set_date("21/11/2026");
    assert!(draft.validate().is_err());

    let mut draft = filled_draft();
    draft.set_contact("   ", "ana@example.com");
    assert!(draft.validate().is_err());
  }

  #[test]
  fn date_shape_check() {
    assert!(is_iso_date("2026-01-31"));
    assert!(is_iso_date("2028-02-29"));
    assert!(!is_iso_date("2026-13-01"));
    assert!(!is_iso_date("2026-1-01"));
    assert!(!is_iso_date("2026-01-01-01"));
  }

  #[test]
  fn impossible_calendar_dates_are_rejected() {
    assert!(!is_iso_date("2026-02-31"));
    assert!(!is_iso_date("2026-04-31"));
    assert!(!is_iso_date("2026-02-29"));

    let mut draft = filled_draft();
    draft.set_date("2026-02-31");
    let err = draft.validate().unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(err.message().contains("2026-02-31"));
  }

  #[tokio::test]
  async fn store_rejects_duplicate_reference() {
    let store = InMemoryBookingStore::new();
    let submission = filled_draft().into_submission(false, 1, 1).unwrap();
    store.submit(submission.clone()).await.unwrap();
    let err = store.submit(submission.clone()).await.unwrap_err();
    assert_eq!(err.status(), 409);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(submission.reference.clone()).await, Some(submission));
  }
}
