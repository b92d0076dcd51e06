//! Error type for `epidash-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] epidash_core::Error),

  #[error("cannot open {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("required column {0:?} not found in header")]
  MissingColumn(String),

  #[error("line {line}: empty region name")]
  MissingRegion { line: u64 },

  #[error("line {line}: invalid date {value:?}")]
  InvalidDate { line: u64, value: String },

  #[error("line {line}: invalid number {value:?} in column {column:?}")]
  InvalidNumber {
    line:   u64,
    column: &'static str,
    value:  String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
