//! JSON REST backend for KYC profile lookup.
//!
//! Exposes an axum [`Router`] backed by any [`ProfileDirectory`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", kyc_api::api_router(directory.clone()))
//! ```

pub mod directory;
pub mod error;
pub mod users;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use directory::{InMemoryDirectory, ProfileDirectory, ProfileRecord};
pub use error::{Error, ErrorResponse};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from the config file and
/// `KYC_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  /// JSON array of profiles loaded at startup.
  #[serde(default)]
  pub seed_path: Option<PathBuf>,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8080
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Routes relative to the `/api/v1` mount point.
pub fn api_router<D>(directory: Arc<D>) -> Router<()>
where
  D: ProfileDirectory + 'static,
{
  Router::new()
    .route("/users/by-email", get(users::by_email::<D>))
    .with_state(directory)
}

/// The full application: the API under `/api/v1`, with request tracing.
pub fn app<D>(directory: Arc<D>) -> Router
where
  D: ProfileDirectory + 'static,
{
  Router::new()
    .nest("/api/v1", api_router(directory))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
