//! Profile directory abstraction and the in-memory backend.

use std::{collections::HashMap, convert::Infallible, future::Future, path::Path};

use chrono::{DateTime, SecondsFormat, Utc};
use kyc_core::UserProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored profile. Unlike the wire [`UserProfile`], the timestamp is typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
  pub full_name:         String,
  pub email:             String,
  pub adoption_location: String,
  pub coe_region:        String,
  pub updated_at:        DateTime<Utc>,
}

impl ProfileRecord {
  /// Project into the response body.
  pub fn to_profile(&self) -> UserProfile {
    UserProfile {
      full_name:         self.full_name.clone(),
      email:             self.email.clone(),
      adoption_location: self.adoption_location.clone(),
      coe_region:        self.coe_region.clone(),
      updated_at:        self.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    }
  }
}

/// Read-only lookup of profiles by email.
pub trait ProfileDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Exact-match lookup. `Ok(None)` means no such user.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<ProfileRecord>, Self::Error>> + Send + 'a;
}

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("reading seed file: {0}")]
  Io(#[from] std::io::Error),

  #[error("parsing seed file: {0}")]
  Json(#[from] serde_json::Error),
}

/// A directory held entirely in memory, keyed by email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
  profiles: HashMap<String, ProfileRecord>,
}

impl InMemoryDirectory {
  pub fn new(records: impl IntoIterator<Item = ProfileRecord>) -> Self {
    let profiles = records
      .into_iter()
      .map(|r| (r.email.clone(), r))
      .collect();
    Self { profiles }
  }

  /// Load a JSON array of [`ProfileRecord`]s. Later duplicates replace
  /// earlier ones.
  pub fn from_json_file(path: &Path) -> Result<Self, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json_str(&raw)
  }

  pub fn from_json_str(raw: &str) -> Result<Self, SeedError> {
    let records: Vec<ProfileRecord> = serde_json::from_str(raw)?;
    Ok(Self::new(records))
  }

  pub fn len(&self) -> usize {
    self.profiles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.profiles.is_empty()
  }
}

impl ProfileDirectory for InMemoryDirectory {
  type Error = Infallible;

  async fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> Result<Option<ProfileRecord>, Infallible> {
    Ok(self.profiles.get(email).cloned())
  }
}
