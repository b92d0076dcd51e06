//! The `DatasetSource` trait and its in-memory implementation.
//!
//! Data-access crates (e.g. `epidash-csv`) build a [`DatasetRegistry`];
//! higher layers depend on the [`DatasetSource`] abstraction only.

use std::collections::HashMap;

use crate::{
  Error, Result,
  record::{Dataset, DatasetId},
};

/// Read-only lookup of loaded datasets.
///
/// Implementations must hand out the same immutable snapshot for the whole
/// lifetime of a derivation; the core never mutates what it is given.
pub trait DatasetSource: Send + Sync {
  /// The dataset registered under `id`, if any.
  fn dataset(&self, id: DatasetId) -> Option<&Dataset>;

  /// Like [`DatasetSource::dataset`], but a missing dataset is an error.
  fn require(&self, id: DatasetId) -> Result<&Dataset> {
    self.dataset(id).ok_or(Error::UnknownDataset(id))
  }
}

/// Datasets keyed by their [`DatasetId`].
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
  datasets: HashMap<DatasetId, Dataset>,
}

impl DatasetRegistry {
  pub fn new() -> Self { Self::default() }

  /// Register `dataset` under its own id, returning the one it replaces.
  pub fn insert(&mut self, dataset: Dataset) -> Option<Dataset> {
    self.datasets.insert(dataset.id(), dataset)
  }

  pub fn with(mut self, dataset: Dataset) -> Self {
    self.insert(dataset);
    self
  }

  /// Ids of all registered datasets, in hierarchy order.
  pub fn ids(&self) -> Vec<DatasetId> {
    let mut ids: Vec<_> = self.datasets.keys().copied().collect();
    ids.sort();
    ids
  }
}

impl DatasetSource for DatasetRegistry {
  fn dataset(&self, id: DatasetId) -> Option<&Dataset> { self.datasets.get(&id) }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::record::Record;

  #[test]
  fn lookup_and_require() {
    let day = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let registry = DatasetRegistry::new().with(
      Dataset::new(DatasetId::World, vec![Record::new("Germany", day)]).unwrap(),
    );

    assert_eq!(registry.dataset(DatasetId::World).unwrap().len(), 1);
    assert!(registry.dataset(DatasetId::District).is_none());
    assert!(matches!(
      registry.require(DatasetId::District),
      Err(Error::UnknownDataset(DatasetId::District))
    ));
    assert_eq!(registry.ids(), vec![DatasetId::World]);
  }
}
