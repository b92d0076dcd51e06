//! Handler for `GET /vaccinations`.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use epidash_core::{
  align::Alignment, registry::DatasetSource, vaccination::VaccinationPoint,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct VaccinationParams {
  pub compare: Option<String>,
  /// Trailing days per side; defaults to the configured window.
  pub days:    Option<usize>,
}

/// `GET /vaccinations[?compare=..][&days=..]`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<VaccinationParams>, QueryRejection>,
) -> Result<Json<Alignment<VaccinationPoint>>, ApiError>
where
  S: DatasetSource + ?Sized,
{
  let Query(params) = params?;
  let trend = state
    .dashboard()
    .vaccinations(params.compare.as_deref(), params.days)?;
  Ok(Json(trend))
}
