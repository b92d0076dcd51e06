//! Handler for `GET /regions/{dataset}`: the names a selector can offer.

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use epidash_core::{record::DatasetId, registry::DatasetSource};

use crate::{ApiState, error::ApiError};

/// `GET /regions/{district|province|world}`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  dataset: Result<Path<DatasetId>, PathRejection>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: DatasetSource + ?Sized,
{
  let Path(dataset) = dataset?;
  let names = state
    .dashboard()
    .regions(dataset)?
    .into_iter()
    .map(str::to_owned)
    .collect();
  Ok(Json(names))
}
