//! Search view state machine.
//!
//! ```text
//! Idle ──submit(email)──▶ Loading ──ok(profile)──▶ Success(profile)
//!   │                       │
//!   │ (blank email)         └──err──▶ Failure(message)
//!   ▼
//! Failure("Please enter an email address")
//! ```
//!
//! `Success` and `Failure` persist until the next submit, which always passes
//! back through `Loading`. Overlapping lookups are not cancelled: whichever
//! resolves last determines the final state.

use std::sync::Arc;

use crate::{
  error::{LookupError, MISSING_EMAIL_MESSAGE},
  lookup::ProfileLookup,
  profile::UserProfile,
};

/// What the view should currently show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
  #[default]
  Idle,
  Loading,
  Success(UserProfile),
  Failure(String),
}

impl SearchState {
  pub fn is_loading(&self) -> bool {
    matches!(self, SearchState::Loading)
  }

  pub fn profile(&self) -> Option<&UserProfile> {
    match self {
      SearchState::Success(p) => Some(p),
      _ => None,
    }
  }

  pub fn error_message(&self) -> Option<&str> {
    match self {
      SearchState::Failure(m) => Some(m),
      _ => None,
    }
  }
}

/// A validated lookup that [`SearchController::begin`] has accepted.
///
/// Running it does not touch controller state; hand the result back through
/// [`SearchController::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  email: String,
}

impl Submission {
  pub fn email(&self) -> &str {
    &self.email
  }

  /// Perform the lookup against `lookup`.
  pub async fn run<L: ProfileLookup>(
    &self,
    lookup: &L,
  ) -> Result<UserProfile, LookupError> {
    lookup.lookup_by_email(&self.email).await
  }
}

/// Owns the [`SearchState`] and drives it from submitted emails and resolved
/// lookups.
pub struct SearchController<L> {
  lookup:    Arc<L>,
  state:     SearchState,
  in_flight: usize,
}

impl<L: ProfileLookup> SearchController<L> {
  pub fn new(lookup: Arc<L>) -> Self {
    Self {
      lookup,
      state: SearchState::Idle,
      in_flight: 0,
    }
  }

  pub fn state(&self) -> &SearchState {
    &self.state
  }

  /// The lookup backend, for callers that run submissions themselves.
  pub fn lookup(&self) -> &Arc<L> {
    &self.lookup
  }

  /// Lookups begun but not yet resolved.
  pub fn in_flight(&self) -> usize {
    self.in_flight
  }

  /// Start a search for `email`.
  ///
  /// A blank email moves straight to `Failure` and returns `None`; no lookup
  /// may be issued in that case. Otherwise any previous result is cleared,
  /// the state becomes `Loading`, and the returned [`Submission`] carries the
  /// trimmed email.
  pub fn begin(&mut self, email: &str) -> Option<Submission> {
    let email = email.trim();
    if email.is_empty() {
      tracing::debug!("rejected blank email");
      self.state = SearchState::Failure(MISSING_EMAIL_MESSAGE.to_owned());
      return None;
    }

    self.state = SearchState::Loading;
    self.in_flight += 1;
    tracing::debug!(email, in_flight = self.in_flight, "lookup started");
    Some(Submission {
      email: email.to_owned(),
    })
  }

  /// Apply one resolved lookup. The most recently applied result wins.
  pub fn resolve(&mut self, result: Result<UserProfile, LookupError>) {
    self.in_flight = self.in_flight.saturating_sub(1);
    self.state = match result {
      Ok(profile) => {
        tracing::debug!(email = %profile.email, "lookup succeeded");
        SearchState::Success(profile)
      }
      Err(err) => {
        tracing::debug!(error = %err, "lookup failed");
        SearchState::Failure(err.display_message())
      }
    };
  }

  /// `begin`, run the lookup, and `resolve`, in one call.
  pub async fn submit(&mut self, email: &str) {
    let Some(submission) = self.begin(email) else {
      return;
    };
    let lookup = Arc::clone(&self.lookup);
    let result = submission.run(lookup.as_ref()).await;
    self.resolve(result);
  }
}

#[cfg(test)]
mod tests {
  use std::{
    collections::HashMap,
    sync::{
      Mutex,
      atomic::{AtomicUsize, Ordering},
    },
  };

  use super::*;
  use crate::{error::GENERIC_FAILURE_MESSAGE, profile::ApiError};

  /// Canned responses keyed by email; counts every call.
  #[derive(Default)]
  struct FakeLookup {
    responses: Mutex<HashMap<String, Result<UserProfile, LookupError>>>,
    calls:     AtomicUsize,
  }

  impl FakeLookup {
    fn with(self, email: &str, result: Result<UserProfile, LookupError>) -> Self {
      self
        .responses
        .lock()
        .unwrap()
        .insert(email.to_owned(), result);
      self
    }

    fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  impl ProfileLookup for FakeLookup {
    async fn lookup_by_email<'a>(
      &'a self,
      email: &'a str,
    ) -> Result<UserProfile, LookupError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self
        .responses
        .lock()
        .unwrap()
        .get(email)
        .cloned()
        .unwrap_or(Err(LookupError::Transport("no canned response".into())))
    }
  }

  fn alice() -> UserProfile {
    UserProfile {
      full_name:         "Alice Smith".into(),
      email:             "alice@example.com".into(),
      adoption_location: "Seoul".into(),
      coe_region:        "APAC".into(),
      updated_at:        "2023-05-01T12:00:00Z".into(),
    }
  }

  fn not_found() -> LookupError {
    LookupError::Server {
      status: 404,
      body:   Some(ApiError {
        timestamp: "2024-01-01T00:00:00Z".into(),
        status:    404,
        error:     "Not Found".into(),
        message:   "User not found".into(),
        path:      "/api/v1/users/by-email".into(),
      }),
    }
  }

  fn controller(fake: FakeLookup) -> SearchController<FakeLookup> {
    SearchController::new(Arc::new(fake))
  }

  #[test]
  fn starts_idle() {
    let c = controller(FakeLookup::default());
    assert_eq!(c.state(), &SearchState::Idle);
    assert_eq!(c.in_flight(), 0);
  }

  #[tokio::test]
  async fn blank_email_fails_without_lookup() {
    let mut c = controller(FakeLookup::default());
    for input in ["", " ", "\t\n  "] {
      c.submit(input).await;
      assert_eq!(
        c.state(),
        &SearchState::Failure(MISSING_EMAIL_MESSAGE.into())
      );
    }
    assert_eq!(c.lookup().calls(), 0);
    assert_eq!(c.in_flight(), 0);
  }

  #[tokio::test]
  async fn found_profile_becomes_success_unchanged() {
    let mut c =
      controller(FakeLookup::default().with("alice@example.com", Ok(alice())));
    c.submit("alice@example.com").await;
    assert_eq!(c.state(), &SearchState::Success(alice()));
    assert_eq!(c.lookup().calls(), 1);
  }

  #[tokio::test]
  async fn server_error_message_is_shown_verbatim() {
    let mut c =
      controller(FakeLookup::default().with("missing@example.com", Err(not_found())));
    c.submit("missing@example.com").await;
    assert_eq!(c.state(), &SearchState::Failure("User not found".into()));
  }

  #[tokio::test]
  async fn unstructured_error_shows_generic_message_once() {
    let mut c = controller(FakeLookup::default().with(
      "bob@example.com",
      Err(LookupError::Server {
        status: 500,
        body:   None,
      }),
    ));
    c.submit("bob@example.com").await;
    c.submit("bob@example.com").await;
    assert_eq!(
      c.state(),
      &SearchState::Failure(GENERIC_FAILURE_MESSAGE.into())
    );
  }

  #[tokio::test]
  async fn email_is_trimmed_before_lookup() {
    let mut c =
      controller(FakeLookup::default().with("alice@example.com", Ok(alice())));
    c.submit("  alice@example.com \n").await;
    assert_eq!(c.state().profile(), Some(&alice()));
  }

  #[test]
  fn begin_clears_previous_terminal_state() {
    let mut c = controller(FakeLookup::default());
    c.resolve(Ok(alice()));
    assert!(c.state().profile().is_some());

    let submission = c.begin("other@example.com").unwrap();
    assert_eq!(submission.email(), "other@example.com");
    assert_eq!(c.state(), &SearchState::Loading);
    assert!(c.state().profile().is_none());
    assert!(c.state().error_message().is_none());
  }

  #[test]
  fn failure_then_success_replaces_error() {
    let mut c = controller(FakeLookup::default());
    c.begin("missing@example.com").unwrap();
    c.resolve(Err(not_found()));
    assert_eq!(c.state().error_message(), Some("User not found"));

    c.begin("alice@example.com").unwrap();
    c.resolve(Ok(alice()));
    assert_eq!(c.state(), &SearchState::Success(alice()));
  }

  #[test]
  fn overlapping_lookups_last_resolved_wins() {
    let mut c = controller(FakeLookup::default());
    c.begin("alice@example.com").unwrap();
    c.begin("missing@example.com").unwrap();
    assert!(c.state().is_loading());
    assert_eq!(c.in_flight(), 2);

    // The second submission resolves first; the first one lands afterwards.
    c.resolve(Err(not_found()));
    assert_eq!(c.in_flight(), 1);
    c.resolve(Ok(alice()));
    assert_eq!(c.in_flight(), 0);
    assert_eq!(c.state(), &SearchState::Success(alice()));
  }

  #[test]
  fn stray_resolve_does_not_underflow() {
    let mut c = controller(FakeLookup::default());
    c.resolve(Err(LookupError::Transport("reset".into())));
    assert_eq!(c.in_flight(), 0);
    assert_eq!(
      c.state().error_message(),
      Some(GENERIC_FAILURE_MESSAGE)
    );
  }
}
