/* packages/server/core/rust/src/lib.rs */

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod errors;
pub mod format;
pub mod i18n;
pub mod locale;
pub mod pricing;
pub mod resolve;
pub mod route;
pub mod server;

// Re-exports for ergonomic use
pub use auth::{AuthProvider, BoxFuture, MockAuthProvider, Session, User};
pub use booking::{
  BookingDraft, BookingStatus, BookingStore, BookingSubmission, Contact, InMemoryBookingStore,
  generate_reference,
};
pub use catalog::{Catalog, Ceremony, load_catalog};
pub use errors::CeremoniaError;
pub use format::format_for_display;
pub use i18n::{Messages, load_messages};
pub use locale::{DEFAULT_LOCALE, LocaleConfig, LocalizedText, SUPPORTED_LOCALES};
pub use pricing::{BookingPriceState, ExtraOption, PricingEngine};
pub use resolve::{LOCALE_COOKIE, NegotiationInput, negotiate_locale};
pub use route::{RouteDecision, RoutePolicy, RouteRequest, resolve_route};
pub use server::{CeremoniaParts, CeremoniaServer, DEFAULT_SESSION_COOKIE};
