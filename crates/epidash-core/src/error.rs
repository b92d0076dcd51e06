//! Error types for `epidash-core`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::record::DatasetId;

#[derive(Debug, Error)]
pub enum Error {
  /// The selected name does not exist in the target dataset.
  #[error("no rows for region {region:?} in the {dataset} dataset")]
  EmptySelection { dataset: DatasetId, region: String },

  /// A scope maps to a dataset that was never registered.
  #[error("dataset not registered: {0}")]
  UnknownDataset(DatasetId),

  #[error("cannot derive metrics from an empty row sequence")]
  InsufficientData,

  #[error("duplicate record for region {region:?} on {date}")]
  DuplicateRecord { region: String, date: NaiveDate },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
