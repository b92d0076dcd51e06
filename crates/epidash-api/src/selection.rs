//! Handlers that take a region selection from the query string.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/options` | Comparison choices and defaults |
//! | `GET`  | `/summary` | Latest values for both regions |
//! | `GET`  | `/chart` | Date-aligned series, or the two ranges if disjoint |
//! | `GET`  | `/dashboard` | Summary and chart together |
//!
//! Selection parameters: `scope=country|sub_region` (default `sub_region`),
//! `sub_region=<district>` (blank means the parent province), and
//! `compare=<region>` (default from config). Any other `scope` value is
//! rejected with 400 and a JSON error body.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use epidash_core::{
  dashboard::{Chart, DashboardView, SummaryPair},
  registry::DatasetSource,
  selection::Scope,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

// ─── Params ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeParam {
  Country,
  #[default]
  SubRegion,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
  #[serde(default)]
  pub scope:      ScopeParam,
  pub sub_region: Option<String>,
  pub compare:    Option<String>,
}

impl SelectionParams {
  pub fn scope(&self) -> Scope {
    match self.scope {
      ScopeParam::Country => Scope::Country,
      ScopeParam::SubRegion => Scope::SubRegion {
        name: self.sub_region.clone(),
      },
    }
  }
}

// ─── Options ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Options {
  pub country:            String,
  pub parent_region:      String,
  pub default_comparison: String,
  pub comparison_options: Vec<String>,
}

/// `GET /options`
pub async fn options<S>(State(state): State<ApiState<S>>) -> Json<Options>
where
  S: DatasetSource + ?Sized,
{
  let config = &state.config;
  Json(Options {
    country:            config.regions.country.clone(),
    parent_region:      config.regions.parent_region.clone(),
    default_comparison: config.default_comparison.clone(),
    comparison_options: config.comparison_options.clone(),
  })
}

// ─── Summary / chart ──────────────────────────────────────────────────────────

/// `GET /summary[?scope=..][&sub_region=..][&compare=..]`
pub async fn summary<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<SelectionParams>, QueryRejection>,
) -> Result<Json<SummaryPair>, ApiError>
where
  S: DatasetSource + ?Sized,
{
  let Query(params) = params?;
  let pair = state
    .dashboard()
    .summaries(&params.scope(), params.compare.as_deref())?;
  Ok(Json(pair))
}

/// `GET /chart[?scope=..][&sub_region=..][&compare=..]`
pub async fn chart<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<SelectionParams>, QueryRejection>,
) -> Result<Json<Chart>, ApiError>
where
  S: DatasetSource + ?Sized,
{
  let Query(params) = params?;
  let chart = state
    .dashboard()
    .chart(&params.scope(), params.compare.as_deref())?;
  Ok(Json(chart))
}

/// `GET /dashboard[?scope=..][&sub_region=..][&compare=..]`
pub async fn dashboard<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<SelectionParams>, QueryRejection>,
) -> Result<Json<DashboardView>, ApiError>
where
  S: DatasetSource + ?Sized,
{
  let Query(params) = params?;
  let scope = params.scope();
  tracing::debug!(?scope, compare = ?params.compare, "building dashboard");
  let view = state.dashboard().view(&scope, params.compare.as_deref())?;
  Ok(Json(view))
}
