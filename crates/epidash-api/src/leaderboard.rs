//! Handler for `GET /leaderboard/{dataset}`.

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{PathRejection, QueryRejection},
  },
};
use epidash_core::{
  leaderboard::{CaseKind, RegionValue},
  record::DatasetId,
  registry::DatasetSource,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
  /// `cases`, `deaths` or `recovered`; defaults to `cases`.
  #[serde(default)]
  pub case:  CaseKind,
  pub limit: Option<usize>,
}

/// `GET /leaderboard/{dataset}[?case=..][&limit=..]`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  dataset: Result<Path<DatasetId>, PathRejection>,
  params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<Json<Vec<RegionValue>>, ApiError>
where
  S: DatasetSource + ?Sized,
{
  let Path(dataset) = dataset?;
  let Query(params) = params?;
  let board = state
    .dashboard()
    .leaderboard(dataset, params.case, params.limit)?;
  Ok(Json(board))
}
