//! Mapping a [`Scope`] onto a dataset and the rows of one region.
//!
//! Policy, first match wins:
//!
//! | Scope | Dataset | Region |
//! |-------|---------|--------|
//! | `Country` | world | configured country |
//! | `SubRegion` with a name | district | the name, title-cased |
//! | `SubRegion` without a name | province | configured parent region |
//! | `Comparison` | world | the comparison name |

use crate::{
  Error, Result,
  record::{DatasetId, Record},
  registry::DatasetSource,
  selection::{RegionConfig, Scope, title_case},
};

/// The outcome of [`resolve`]: which dataset was used, a display label, and
/// the matching rows in ascending date order.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
  pub dataset: DatasetId,
  pub label:   String,
  pub rows:    Vec<&'a Record>,
}

/// The dataset, region key and label a scope maps to, before any lookup.
fn target(config: &RegionConfig, scope: &Scope) -> (DatasetId, String, String) {
  match scope {
    Scope::Country => {
      (DatasetId::World, config.country.clone(), config.country.clone())
    }
    Scope::SubRegion { name: Some(name) } if !name.trim().is_empty() => {
      let name = title_case(name);
      let label = format!("{} {}", config.parent_region, name);
      (DatasetId::District, name, label)
    }
    Scope::SubRegion { .. } => (
      DatasetId::Province,
      config.parent_region.clone(),
      config.parent_region.clone(),
    ),
    Scope::Comparison { name } => {
      (DatasetId::World, name.trim().to_string(), name.trim().to_string())
    }
  }
}

/// Resolve `scope` against the datasets of `source`.
///
/// Fails with [`Error::UnknownDataset`] if the scope's dataset is not
/// registered and with [`Error::EmptySelection`] if no row carries the
/// requested region.
pub fn resolve<'a, S>(
  source: &'a S,
  config: &RegionConfig,
  scope: &Scope,
) -> Result<Resolved<'a>>
where
  S: DatasetSource + ?Sized,
{
  let (dataset_id, region, label) = target(config, scope);
  let dataset = source.require(dataset_id)?;

  let rows = dataset.rows_for(&region);
  if rows.is_empty() {
    return Err(Error::EmptySelection { dataset: dataset_id, region });
  }

  Ok(Resolved { dataset: dataset_id, label, rows })
}
