//! Side-by-side demographic and health attributes of the configured country
//! and a comparison country.
//!
//! These columns change rarely and are often blank on recent rows, so each
//! attribute is taken from the most recent row that carries it.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator as _};

use crate::{
  Result,
  record::Record,
  registry::DatasetSource,
  resolve::resolve,
  selection::{RegionConfig, Scope},
  summary::Observation,
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FactField {
  MedianAge,
  #[strum(serialize = "aged_65_older")]
  #[serde(rename = "aged_65_older")]
  Aged65Older,
  MaleSmokers,
  FemaleSmokers,
  DiabetesPrevalence,
}

impl FactField {
  pub fn get(self, record: &Record) -> Option<f64> {
    match self {
      Self::MedianAge => record.median_age,
      Self::Aged65Older => record.aged_65_older,
      Self::MaleSmokers => record.male_smokers,
      Self::FemaleSmokers => record.female_smokers,
      Self::DiabetesPrevalence => record.diabetes_prevalence,
    }
  }
}

/// One attribute for both countries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactRow {
  pub field:      FactField,
  pub primary:    Option<Observation>,
  pub comparison: Option<Observation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactTable {
  pub primary_label:    String,
  pub comparison_label: String,
  /// One row per [`FactField`], in declaration order.
  pub rows:             Vec<FactRow>,
}

/// The last non-missing value of `field` in `rows` (ascending by date).
pub fn latest_fact(rows: &[&Record], field: FactField) -> Option<Observation> {
  rows.iter().rev().find_map(|r| {
    field.get(r).map(|value| Observation { value, as_of: r.date })
  })
}

/// Build the attribute table for the configured country against
/// `comparison`, both from the world dataset.
pub fn fact_table<S>(
  source: &S,
  config: &RegionConfig,
  comparison: &str,
) -> Result<FactTable>
where
  S: DatasetSource + ?Sized,
{
  let home = resolve(source, config, &Scope::Country)?;
  let other = resolve(source, config, &Scope::comparison(comparison))?;
  let rows = FactField::iter()
    .map(|field| FactRow {
      field,
      primary: latest_fact(&home.rows, field),
      comparison: latest_fact(&other.rows, field),
    })
    .collect();
  Ok(FactTable {
    primary_label: home.label,
    comparison_label: other.label,
    rows,
  })
}
