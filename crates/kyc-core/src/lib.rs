//! Core types for the KYC profile lookup tool.
//!
//! Holds the wire contract shared by the backend and the client, the lookup
//! error taxonomy, and the view state machine that drives the UI. This crate
//! is free of HTTP and terminal dependencies.

pub mod error;
pub mod lookup;
pub mod profile;
pub mod search;

pub use error::{GENERIC_FAILURE_MESSAGE, LookupError, MISSING_EMAIL_MESSAGE};
pub use lookup::ProfileLookup;
pub use profile::{ApiError, UserProfile};
pub use search::{SearchController, SearchState, Submission};
