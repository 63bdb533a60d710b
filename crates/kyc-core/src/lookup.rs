//! The `ProfileLookup` trait.
//!
//! Implemented by the HTTP client in `kyc-cli`. The search state machine
//! depends on this abstraction, not on any transport.

use std::future::Future;

use crate::{error::LookupError, profile::UserProfile};

/// Resolves a user's profile by email address.
///
/// Implementations perform exactly one request per call: no retries and no
/// caching of earlier lookups.
pub trait ProfileLookup: Send + Sync {
  fn lookup_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<UserProfile, LookupError>> + Send + 'a;
}
