//! kyc-server binary.
//!
//! Reads `kyc-server.toml` (or the path given with `--config`), overlays
//! `KYC_*` environment variables, seeds an in-memory profile directory and
//! serves `GET /api/v1/users/by-email`.
//!
//! ```
//! KYC_SEED_PATH=crates/kyc-api/profiles.example.json cargo run -p kyc-api
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use kyc_api::{InMemoryDirectory, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "KYC profile lookup server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "kyc-server.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KYC"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let directory = match &server_cfg.seed_path {
    Some(path) => InMemoryDirectory::from_json_file(path)
      .with_context(|| format!("failed to load profiles from {}", path.display()))?,
    None => {
      tracing::warn!("no seed_path configured; every lookup will return 404");
      InMemoryDirectory::default()
    }
  };
  tracing::info!(profiles = directory.len(), "profile directory ready");

  let app = kyc_api::app(Arc::new(directory));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
