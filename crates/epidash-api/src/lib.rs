//! JSON API for the epidash dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`epidash_core::registry::DatasetSource`]. Rendering is the client's
//! business; every route returns plain derived data.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", epidash_api::api_router(registry.clone(), config.clone()))
//! ```

pub mod error;
pub mod facts;
pub mod leaderboard;
pub mod regions;
pub mod selection;
pub mod vaccinations;

use std::sync::Arc;

use axum::{Router, routing::get};
use epidash_core::{
  dashboard::{Dashboard, DashboardConfig},
  registry::DatasetSource,
};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Shared state threaded through all handlers: one immutable dataset
/// snapshot and one immutable configuration.
pub struct ApiState<S: ?Sized> {
  pub source: Arc<S>,
  pub config: Arc<DashboardConfig>,
}

impl<S: ?Sized> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      source: Arc::clone(&self.source),
      config: Arc::clone(&self.config),
    }
  }
}

impl<S: DatasetSource + ?Sized> ApiState<S> {
  pub fn dashboard(&self) -> Dashboard<'_, S> {
    Dashboard::new(self.source.as_ref(), self.config.as_ref())
  }
}

/// Build the API router over `source`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(source: Arc<S>, config: Arc<DashboardConfig>) -> Router<()>
where
  S: DatasetSource + 'static,
{
  Router::new()
    .route("/options", get(selection::options::<S>))
    .route("/summary", get(selection::summary::<S>))
    .route("/chart", get(selection::chart::<S>))
    .route("/dashboard", get(selection::dashboard::<S>))
    .route("/regions/{dataset}", get(regions::list::<S>))
    .route("/leaderboard/{dataset}", get(leaderboard::handler::<S>))
    .route("/vaccinations", get(vaccinations::handler::<S>))
    .route("/facts", get(facts::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(ApiState { source, config })
}
