//! Async HTTP client for the profile lookup endpoint.

use anyhow::{Context, Result};
use kyc_core::{ApiError, LookupError, ProfileLookup, UserProfile};
use reqwest::Client;

/// Path of the lookup endpoint, relative to the configured base URL.
pub const LOOKUP_PATH: &str = "/api/v1/users/by-email";

/// Connection settings for the lookup backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
}

/// Async HTTP client for `GET /api/v1/users/by-email`.
///
/// Clones share one connection pool.
#[derive(Clone)]
pub struct ProfileClient {
  client: Client,
  config: ClientConfig,
}

impl ProfileClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  fn url(&self) -> String {
    format!(
      "{}{}",
      self.config.base_url.trim_end_matches('/'),
      LOOKUP_PATH
    )
  }

  /// `GET /api/v1/users/by-email?email=<email>`
  ///
  /// One request, no retries. A blank `email` is rejected before anything
  /// touches the network.
  pub async fn lookup(&self, email: &str) -> Result<UserProfile, LookupError> {
    if email.trim().is_empty() {
      return Err(LookupError::Validation);
    }

    tracing::debug!(email, url = %self.url(), "looking up profile");
    let resp = self
      .client
      .get(self.url())
      .query(&[("email", email)])
      .send()
      .await
      .map_err(|e| {
        tracing::warn!(error = %e, "lookup request failed");
        LookupError::Transport(e.to_string())
      })?;

    let status = resp.status();
    if !status.is_success() {
      // The body is best-effort: an unreadable or non-JSON body just means
      // there is no structured error to show.
      let body = resp
        .bytes()
        .await
        .ok()
        .and_then(|b| parse_error_body(&b, status.as_u16()));
      tracing::warn!(
        status = status.as_u16(),
        structured = body.is_some(),
        "lookup rejected"
      );
      return Err(LookupError::Server {
        status: status.as_u16(),
        body,
      });
    }

    let bytes = resp.bytes().await.map_err(|e| {
      tracing::warn!(error = %e, "reading lookup response failed");
      LookupError::Transport(e.to_string())
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
      tracing::warn!(error = %e, "lookup response is not a profile");
      LookupError::MalformedResponse(e.to_string())
    })
  }
}

/// Best-available [`ApiError`] from a non-2xx body.
///
/// A full body is taken as-is. Otherwise any JSON object with a non-empty
/// string `message` is kept, with the missing fields filled from what is
/// there and `status` defaulting to the HTTP status.
fn parse_error_body(bytes: &[u8], status: u16) -> Option<ApiError> {
  if let Ok(body) = serde_json::from_slice::<ApiError>(bytes) {
    return Some(body);
  }

  let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
  let message = value.get("message")?.as_str()?;
  if message.is_empty() {
    return None;
  }
  let text = |key: &str| {
    value
      .get(key)
      .and_then(serde_json::Value::as_str)
      .unwrap_or_default()
      .to_owned()
  };
  Some(ApiError {
    timestamp: text("timestamp"),
    status: value
      .get("status")
      .and_then(serde_json::Value::as_u64)
      .and_then(|s| u16::try_from(s).ok())
      .unwrap_or(status),
    error: text("error"),
    message: message.to_owned(),
    path: text("path"),
  })
}

impl ProfileLookup for ProfileClient {
  async fn lookup_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> Result<UserProfile, LookupError> {
    self.lookup(email).await
  }
}
