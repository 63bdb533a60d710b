//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure raised by a handler, including a query string that fails to
//! decode, is rendered as a [`kyc_core::ApiError`] body:
//! `{ timestamp, status, error, message, path }`. Routing misses (unknown path,
//! wrong method) keep axum's default responses.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use kyc_core::ApiError;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  NotFound(String),

  #[error("Invalid input: {0}")]
  BadRequest(String),

  #[error("directory error: {0}")]
  Directory(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Attach the originating request path so the error can be rendered.
  pub fn at(self, path: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
      error: self,
      path:  path.into(),
    }
  }
}

/// An [`Error`] bound to the request path it occurred on.
#[derive(Debug)]
pub struct ErrorResponse {
  pub error: Error,
  pub path:  String,
}

impl ErrorResponse {
  pub fn body(&self) -> ApiError {
    let status = self.error.status();
    ApiError {
      timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
      status:    status.as_u16(),
      error:     status.canonical_reason().unwrap_or("Error").to_owned(),
      message:   self.error.to_string(),
      path:      self.path.clone(),
    }
  }
}

impl IntoResponse for ErrorResponse {
  fn into_response(self) -> Response {
    if let Error::Directory(e) = &self.error {
      tracing::error!(path = %self.path, error = %e, "directory lookup failed");
    }
    (self.error.status(), Json(self.body())).into_response()
  }
}
