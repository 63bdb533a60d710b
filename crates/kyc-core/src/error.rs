//! Lookup error taxonomy.

use thiserror::Error;

use crate::profile::ApiError;

/// Shown whenever the backend gave us nothing better to say.
pub const GENERIC_FAILURE_MESSAGE: &str =
  "An error occurred while fetching the user profile";

/// Shown when a search is submitted with a blank email.
pub const MISSING_EMAIL_MESSAGE: &str = "Please enter an email address";

/// Every way a profile lookup can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
  /// Empty email; never reaches the network.
  #[error("email must not be empty")]
  Validation,

  /// The request never completed.
  #[error("transport error: {0}")]
  Transport(String),

  /// Non-2xx response. `body` is present when the server sent a structured
  /// [`ApiError`].
  #[error("server responded with status {status}")]
  Server {
    status: u16,
    body:   Option<ApiError>,
  },

  /// 2xx response whose body is not a [`UserProfile`](crate::UserProfile).
  #[error("malformed response body: {0}")]
  MalformedResponse(String),
}

impl LookupError {
  /// The single string the view layer displays for this failure.
  pub fn display_message(&self) -> String {
    match self {
      LookupError::Validation => MISSING_EMAIL_MESSAGE.to_owned(),
      LookupError::Server {
        body: Some(body), ..
      } if !body.message.is_empty() => body.message.clone(),
      LookupError::Server { .. }
      | LookupError::Transport(_)
      | LookupError::MalformedResponse(_) => GENERIC_FAILURE_MESSAGE.to_owned(),
    }
  }
}
