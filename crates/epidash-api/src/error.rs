//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Core(#[from] epidash_core::Error),
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl ApiError {
  fn status(&self) -> StatusCode {
    use epidash_core::Error as E;
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Core(E::EmptySelection { .. }) => StatusCode::NOT_FOUND,
      ApiError::Core(E::InsufficientData) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Core(E::UnknownDataset(_) | E::DuplicateRecord { .. }) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, "request rejected");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
