//! Configuration and wiring for the epidash server binary.

use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use epidash_core::{dashboard::DashboardConfig, registry::DatasetRegistry};
use epidash_csv::DataConfig;
use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `EPIDASH_*` environment variables (nested keys joined with `__`, e.g.
/// `EPIDASH_DASHBOARD__COUNTRY`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  #[serde(default)]
  pub data:      DataConfig,
  #[serde(default)]
  pub dashboard: DashboardConfig,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8050 }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Layer the (optional) file at `path` under the process environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path).required(false)),
      Self::environment(),
    )
  }

  /// `EPIDASH_*` variables, nested keys joined with `__`.
  fn environment() -> config::Environment {
    config::Environment::with_prefix("EPIDASH")
      .prefix_separator("_")
      .separator("__")
      .try_parsing(true)
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    environment: config::Environment,
  ) -> anyhow::Result<Self> {
    builder
      .add_source(environment)
      .build()
      .context("failed to read config")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }
}

// ─── Wiring ───────────────────────────────────────────────────────────────────

/// Read every configured CSV on a blocking task.
pub async fn load_datasets(data: DataConfig) -> anyhow::Result<DatasetRegistry> {
  tokio::task::spawn_blocking(move || epidash_csv::load_registry(&data))
    .await
    .context("dataset loader panicked")?
    .context("failed to load datasets")
}

/// The application router: the JSON API mounted under `/api`.
pub fn app(registry: Arc<DatasetRegistry>, dashboard: Arc<DashboardConfig>) -> Router {
  Router::new().nest("/api", epidash_api::api_router(registry, dashboard))
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;

  use super::*;

  fn builder(toml: &str) -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
  }

  /// The server's environment layer, reading `vars` instead of the process
  /// environment.
  fn env(vars: &[(&str, &str)]) -> config::Environment {
    let map = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<config::Map<_, _>>();
    ServerConfig::environment().source(Some(map))
  }

  fn parse(toml: &str) -> ServerConfig {
    ServerConfig::from_builder(builder(toml), env(&[])).unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:8050");
    assert!(cfg.data.world.is_none());
    assert_eq!(cfg.dashboard, DashboardConfig::default());
  }

  #[test]
  fn full_config_is_deserialised() {
    let cfg = parse(
      r#"
        port = 9000

        [data.district]
        path = "data/bali_regency_data.csv"

        [data.world]
        path = "data/world_data.csv"
        region_column = "country"

        [dashboard]
        parent_region = "Jawa Timur"
        growth_window = 14
        default_comparison = "Italy"
      "#,
    );
    assert_eq!(cfg.port, 9000);
    assert!(cfg.data.province.is_none());
    let world = cfg.data.world.unwrap();
    assert_eq!(world.region_column.as_deref(), Some("country"));
    assert_eq!(cfg.dashboard.regions.parent_region, "Jawa Timur");
    assert_eq!(cfg.dashboard.regions.country, "Indonesia");
    assert_eq!(cfg.dashboard.growth_window.get(), 14);
    assert_eq!(cfg.dashboard.default_comparison, "Italy");
  }

  #[test]
  fn zero_growth_window_is_rejected() {
    let result = ServerConfig::from_builder(
      builder("[dashboard]\ngrowth_window = 0"),
      env(&[]),
    );
    assert!(result.is_err());
  }

  #[test]
  fn environment_overrides_file() {
    let cfg = ServerConfig::from_builder(
      builder("port = 9000\n[dashboard]\ncountry = \"Indonesia\""),
      env(&[
        ("EPIDASH_PORT", "9100"),
        ("EPIDASH_DASHBOARD__COUNTRY", "Australia"),
        ("EPIDASH_DASHBOARD__GROWTH_WINDOW", "14"),
        ("OTHER_PORT", "1"),
      ]),
    )
    .unwrap();
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.dashboard.regions.country, "Australia");
    assert_eq!(cfg.dashboard.growth_window.get(), 14);
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let app = app(
      Arc::new(DatasetRegistry::new()),
      Arc::new(DashboardConfig::default()),
    );
    let req = Request::builder()
      .uri("/api/options")
      .body(Body::empty())
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["parent_region"], "Bali");

    let req = Request::builder().uri("/options").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
