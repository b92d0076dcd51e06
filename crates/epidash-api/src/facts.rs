//! Handler for `GET /facts`.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use epidash_core::{facts::FactTable, registry::DatasetSource};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct FactsParams {
  pub compare: Option<String>,
}

/// `GET /facts[?compare=..]`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<FactsParams>, QueryRejection>,
) -> Result<Json<FactTable>, ApiError>
where
  S: DatasetSource + ?Sized,
{
  let Query(params) = params?;
  let table = state.dashboard().facts(params.compare.as_deref())?;
  Ok(Json(table))
}
