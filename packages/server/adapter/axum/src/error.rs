/* packages/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ceremonia_core::CeremoniaError;
use tracing::{debug, error};

/// Newtype wrapper to implement `IntoResponse` for `CeremoniaError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for CeremoniaError`
/// when both types are foreign to this crate.
pub(crate) struct AxumError(pub CeremoniaError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    if err.is_server_error() {
      error!(code = err.code(), message = err.message(), "request failed");
    } else {
      debug!(code = err.code(), message = err.message(), "request rejected");
    }
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": err.code(),
        "message": err.message(),
      }
    });
    (status, axum::Json(body)).into_response()
  }
}

impl From<CeremoniaError> for AxumError {
  fn from(err: CeremoniaError) -> Self {
    Self(err)
  }
}
