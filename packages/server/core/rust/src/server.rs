/* packages/server/core/rust/src/server.rs */

use std::sync::Arc;

use crate::auth::{AuthProvider, MockAuthProvider};
use crate::booking::{BookingStore, InMemoryBookingStore};
use crate::catalog::Catalog;
use crate::i18n::Messages;
use crate::locale::LocaleConfig;
use crate::route::RoutePolicy;

pub const DEFAULT_SESSION_COOKIE: &str = "ceremonia-session";

/// Framework-agnostic parts extracted from `CeremoniaServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct CeremoniaParts {
  pub policy: RoutePolicy,
  pub messages: Messages,
  pub catalog: Catalog,
  pub auth: Arc<dyn AuthProvider>,
  pub bookings: Arc<dyn BookingStore>,
  pub session_cookie: String,
}

pub struct CeremoniaServer {
  policy: RoutePolicy,
  messages: Option<Messages>,
  catalog: Catalog,
  auth: Arc<dyn AuthProvider>,
  bookings: Arc<dyn BookingStore>,
  session_cookie: String,
}

impl CeremoniaServer {
  pub fn new() -> Self {
    Self {
      policy: RoutePolicy::default(),
      messages: None,
      catalog: Catalog::default(),
      auth: Arc::new(MockAuthProvider::new()),
      bookings: Arc::new(InMemoryBookingStore::new()),
      session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
    }
  }

  pub fn locales(mut self, config: LocaleConfig) -> Self {
    self.policy.locales = config;
    self
  }

  pub fn protected_segments(mut self, segments: Vec<String>) -> Self {
    self.policy = self.policy.protected_segments(segments);
    self
  }

  pub fn messages(mut self, messages: Messages) -> Self {
    self.messages = Some(messages);
    self
  }

  pub fn catalog(mut self, catalog: Catalog) -> Self {
    self.catalog = catalog;
    self
  }

  pub fn auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
    self.auth = Arc::new(provider);
    self
  }

  pub fn booking_store(mut self, store: impl BookingStore + 'static) -> Self {
    self.bookings = Arc::new(store);
    self
  }

  pub fn session_cookie(mut self, name: impl Into<String>) -> Self {
    self.session_cookie = name.into();
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  pub fn into_parts(self) -> CeremoniaParts {
    let messages = self.messages.unwrap_or_else(|| Messages::new(self.policy.locales.default.clone()));
    CeremoniaParts {
      policy: self.policy,
      messages,
      catalog: self.catalog,
      auth: self.auth,
      bookings: self.bookings,
      session_cookie: self.session_cookie,
    }
  }
}

impl Default for CeremoniaServer {
  fn default() -> Self {
    Self::new()
  }
}
