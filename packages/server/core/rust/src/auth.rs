/* packages/server/core/rust/src/auth.rs */

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::CeremoniaError;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
  pub id: String,
  pub email: String,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
  pub token: String,
  pub user: User,
}

/// Session capability of a hosted auth provider. The router only ever asks whether a
/// session exists; booking submission reads the user.
pub trait AuthProvider: Send + Sync {
  fn get_session(&self, token: String) -> BoxFuture<Option<Session>>;

  /// Trade a one-time authorization code from the provider's callback for a session.
  fn exchange_code_for_session(&self, code: String) -> BoxFuture<Result<Session, CeremoniaError>>;

  fn sign_in(&self, email: String, password: String) -> BoxFuture<Result<Session, CeremoniaError>>;

  fn sign_out(&self, token: String) -> BoxFuture<()>;
}

#[derive(Default)]
struct MockState {
  /// email -> (password, user)
  users: HashMap<String, (String, User)>,
  /// one-time code -> email
  codes: HashMap<String, String>,
  sessions: HashMap<String, Session>,
}

/// In-memory provider for development and tests. Tokens and codes are sequential,
/// not secret.
#[derive(Clone, Default)]
pub struct MockAuthProvider {
  state: Arc<Mutex<MockState>>,
  counter: Arc<AtomicU64>,
}

impl MockAuthProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_user(self, email: &str, password: &str, name: &str) -> Self {
    self.add_user(email, password, name);
    self
  }

  pub fn add_user(&self, email: &str, password: &str, name: &str) -> User {
    let id = format!("user-{}", self.next_id());
    let user = User { id, email: email.to_lowercase(), name: name.to_string() };
    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    state.users.insert(email.to_lowercase(), (password.to_string(), user.clone()));
    user
  }

  /// Issue a callback code for a registered user, as the provider would after an OAuth login.
  pub fn issue_code(&self, email: &str) -> Result<String, CeremoniaError> {
    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    if !state.users.contains_key(&email.to_lowercase()) {
      return Err(CeremoniaError::not_found(format!("no user {email}")));
    }
    let code = format!("code-{}", self.next_id());
    state.codes.insert(code.clone(), email.to_lowercase());
    Ok(code)
  }

  fn next_id(&self) -> u64 {
    self.counter.fetch_add(1, Ordering::Relaxed) + 1
  }

  fn open_session(&self, user: User) -> Session {
    let session = Session { token: format!("mock-session-{}", self.next_id()), user };
    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    state.sessions.insert(session.token.clone(), session.clone());
    session
  }
}

impl AuthProvider for MockAuthProvider {
  fn get_session(&self, token: String) -> BoxFuture<Option<Session>> {
    let state = self.state.clone();
    Box::pin(async move {
      let state = state.lock().unwrap_or_else(PoisonError::into_inner);
      state.sessions.get(&token).cloned()
    })
  }

  fn exchange_code_for_session(&self, code: String) -> BoxFuture<Result<Session, CeremoniaError>> {
    let this = self.clone();
    Box::pin(async move {
      let user = {
        let mut state = this.state.lock().unwrap_or_else(PoisonError::into_inner);
        let email = state.codes.remove(&code);
        email.and_then(|e| state.users.get(&e).map(|(_, u)| u.clone()))
      };
      match user {
        Some(user) => {
          info!(user_id = %user.id, "exchanged auth code");
          Ok(this.open_session(user))
        }
        None => {
          warn!("invalid or expired auth code");
          Err(CeremoniaError::unauthorized("Invalid or expired authorization code"))
        }
      }
    })
  }

  fn sign_in(&self, email: String, password: String) -> BoxFuture<Result<Session, CeremoniaError>> {
    let this = self.clone();
    Box::pin(async move {
      let user = {
        let state = this.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.users.get(&email.to_lowercase()).filter(|(p, _)| *p == password).map(|(_, u)| u.clone())
      };
      let Some(user) = user else {
        warn!("sign-in rejected");
        return Err(CeremoniaError::unauthorized("Invalid email or password"));
      };
      Ok(this.open_session(user))
    })
  }

  fn sign_out(&self, token: String) -> BoxFuture<()> {
    let state = self.state.clone();
    Box::pin(async move {
      let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
      state.sessions.remove(&token);
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn provider() -> MockAuthProvider {
    MockAuthProvider::new().with_user("Ana@example.com", "secret", "Ana")
  }

  #[tokio::test]
  async fn sign_in_opens_session() {
    let provider = provider();
    let session = provider.sign_in("ana@example.com".into(), "secret".into()).await.unwrap();
    assert_eq!(session.user.name, "Ana");
    let found = provider.get_session(session.token.clone()).await;
    assert_eq!(found, Some(session));
  }

  #[tokio::test]
  async fn wrong_password_is_unauthorized() {
    let err = provider().sign_in("ana@example.com".into(), "nope".into()).await.unwrap_err();
    assert_eq!(err.status(), 401);
  }

  #[tokio::test]
  async fn code_exchange_is_single_use() {
    let provider = provider();
    let code = provider.issue_code("ana@example.com").unwrap();
    let session = provider.exchange_code_for_session(code.clone()).await.unwrap();
    assert_eq!(session.user.email, "ana@example.com");
    let err = provider.exchange_code_for_session(code).await.unwrap_err();
    assert_eq!(err.code(), "UNAUTHORIZED");
  }

  #[tokio::test]
  async fn unknown_code_fails() {
    assert!(provider().exchange_code_for_session("XYZ".into()).await.is_err());
  }

  #[test]
  fn issue_code_for_unknown_user_fails() {
    assert_eq!(provider().issue_code("bob@example.com").unwrap_err().status(), 404);
  }

  #[tokio::test]
  async fn sign_out_ends_session() {
    let provider = provider();
    let session = provider.sign_in("ana@example.com".into(), "secret".into()).await.unwrap();
    provider.sign_out(session.token.clone()).await;
    assert!(provider.get_session(session.token).await.is_none());
  }
}
