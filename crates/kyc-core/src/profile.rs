//! Wire types for `GET /api/v1/users/by-email`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A user's KYC profile as returned by the backend.
///
/// Fields are kept exactly as received; `updated_at` stays the raw ISO-8601
/// string so a parsed profile always equals the body it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub full_name:         String,
  pub email:             String,
  pub adoption_location: String,
  pub coe_region:        String,
  pub updated_at:        String,
}

impl UserProfile {
  /// Parse `updated_at` as RFC 3339, if it is one.
  pub fn updated_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&self.updated_at).ok()
  }
}

/// Structured error body sent with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
  pub timestamp: String,
  pub status:    u16,
  pub error:     String,
  pub message:   String,
  pub path:      String,
}
