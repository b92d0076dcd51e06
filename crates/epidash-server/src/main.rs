//! epidash server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), loads the
//! configured CSV datasets once, and serves the dashboard API over HTTP.
//!
//! # Checking data files
//!
//! To load every dataset, report what was found and exit without serving:
//!
//! ```sh
//! cargo run -p epidash-server -- --check
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use epidash_core::registry::DatasetSource as _;
use epidash_server::{ServerConfig, app, load_datasets};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "epidash regional dashboard API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load all datasets, print a short inventory and exit.
  #[arg(long)]
  check: bool,
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
  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("loading {:?}", cli.config))?;

  let registry = load_datasets(server_cfg.data.clone()).await?;

  if cli.check {
    for id in registry.ids() {
      if let Some(dataset) = registry.dataset(id) {
        println!(
          "{id}: {} rows, {} regions",
          dataset.len(),
          dataset.regions().len()
        );
      }
    }
    return Ok(());
  }

  let app = app(Arc::new(registry), Arc::new(server_cfg.dashboard.clone()));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
