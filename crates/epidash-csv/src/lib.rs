//! CSV data access for epidash.
//!
//! Reads one CSV file per hierarchy level into an immutable
//! [`epidash_core::record::Dataset`] and collects them in a
//! [`epidash_core::registry::DatasetRegistry`]. Pure synchronous; callers in
//! an async context should run the loaders on a blocking task.

mod columns;
mod load;

pub mod error;

pub use error::{Error, Result};
pub use load::{DataConfig, SourceConfig, load_dataset, load_registry, read_dataset};
