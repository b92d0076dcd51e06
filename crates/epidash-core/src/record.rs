//! Records and datasets: the tabular input of every derivation.
//!
//! A dataset is loaded once by the data-access layer and never mutated
//! afterwards. Every record belongs to exactly one region and one calendar
//! day; fields a dataset does not carry are simply `None`.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

// ─── Dataset identity ────────────────────────────────────────────────────────

/// The level of the region hierarchy a dataset covers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum DatasetId {
  /// One row per district (regency) and day.
  District,
  /// One row per province and day.
  Province,
  /// One row per country and day, including the world aggregate.
  World,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One day of reported figures for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  /// Region name; matched case-insensitively.
  pub region:                                String,
  pub date:                                  NaiveDate,
  pub new_cases:                             Option<u64>,
  pub new_deaths:                            Option<u64>,
  pub new_recovered:                         Option<u64>,
  /// Cumulative confirmed cases per 100 000 inhabitants.
  pub cases_per_100k:                        Option<f64>,
  /// Cumulative deaths per 100 000 inhabitants.
  pub deaths_per_100k:                       Option<f64>,
  /// Case-fatality rate in percent, precomputed upstream.
  pub case_fatality_rate:                    Option<f64>,
  pub new_cases_per_million:                 Option<f64>,
  pub new_vaccinations_smoothed_per_million: Option<f64>,
  pub people_fully_vaccinated_per_hundred:   Option<f64>,
  /// Demographic and health attributes; constant or slowly changing, and
  /// only carried by the world dataset.
  pub median_age:                            Option<f64>,
  /// Share of the population aged 65 or older, in percent.
  pub aged_65_older:                         Option<f64>,
  pub male_smokers:                          Option<f64>,
  pub female_smokers:                        Option<f64>,
  pub diabetes_prevalence:                   Option<f64>,
}

impl Record {
  /// A record with every measurement missing.
  pub fn new(region: impl Into<String>, date: NaiveDate) -> Self {
    Self {
      region: region.into(),
      date,
      new_cases: None,
      new_deaths: None,
      new_recovered: None,
      cases_per_100k: None,
      deaths_per_100k: None,
      case_fatality_rate: None,
      new_cases_per_million: None,
      new_vaccinations_smoothed_per_million: None,
      people_fully_vaccinated_per_hundred: None,
      median_age: None,
      aged_65_older: None,
      male_smokers: None,
      female_smokers: None,
      diabetes_prevalence: None,
    }
  }

  /// Case-insensitive comparison of the region identifier.
  pub fn is_region(&self, name: &str) -> bool {
    region_key(&self.region) == region_key(name)
  }
}

/// The normalised form used wherever region names are compared.
pub(crate) fn region_key(name: &str) -> String { name.trim().to_lowercase() }

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// An immutable, date-ordered collection of records for one hierarchy level.
///
/// Within a dataset each (region, date) pair occurs at most once, so the rows
/// of any single region are strictly increasing in date.
#[derive(Debug, Clone)]
pub struct Dataset {
  id:      DatasetId,
  records: Vec<Record>,
}

impl Dataset {
  /// Validate and order `records`.
  ///
  /// Returns [`Error::DuplicateRecord`] if two records share a region
  /// (compared case-insensitively) and a date.
  pub fn new(id: DatasetId, mut records: Vec<Record>) -> Result<Self> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
      if !seen.insert((region_key(&record.region), record.date)) {
        return Err(Error::DuplicateRecord {
          region: record.region.clone(),
          date:   record.date,
        });
      }
    }
    // Stable: rows of one day keep their source order.
    records.sort_by_key(|r| r.date);
    Ok(Self { id, records })
  }

  pub fn id(&self) -> DatasetId { self.id }

  pub fn records(&self) -> &[Record] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// All rows of `region`, ascending by date.
  pub fn rows_for<'a>(&'a self, region: &str) -> Vec<&'a Record> {
    let key = region_key(region);
    self
      .records
      .iter()
      .filter(|r| region_key(&r.region) == key)
      .collect()
  }

  /// Distinct region names, sorted case-insensitively. The first spelling
  /// encountered wins when a name appears in several casings.
  pub fn regions(&self) -> Vec<&str> {
    let mut names: BTreeMap<String, &str> = BTreeMap::new();
    for record in &self.records {
      names
        .entry(region_key(&record.region))
        .or_insert(record.region.as_str());
    }
    names.into_values().collect()
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2021, 1, d).unwrap() }

  #[test]
  fn dataset_sorts_rows_by_date() {
    let ds = Dataset::new(DatasetId::District, vec![
      Record::new("Badung", day(3)),
      Record::new("Badung", day(1)),
      Record::new("Gianyar", day(2)),
    ])
    .unwrap();
    let dates: Vec<_> = ds.records().iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(1), day(2), day(3)]);
  }

  #[test]
  fn duplicate_region_day_is_rejected_case_insensitively() {
    let err = Dataset::new(DatasetId::District, vec![
      Record::new("Badung", day(1)),
      Record::new("BADUNG", day(1)),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateRecord { date, .. } if date == day(1)));
  }

  #[test]
  fn rows_for_matches_any_casing() {
    let ds = Dataset::new(DatasetId::District, vec![
      Record::new("Denpasar", day(2)),
      Record::new("Badung", day(1)),
      Record::new("Denpasar", day(1)),
    ])
    .unwrap();
    let rows = ds.rows_for("dENPASAR");
    assert_eq!(rows.len(), 2);
    assert!(rows[0].date < rows[1].date);
  }

  #[test]
  fn regions_are_distinct_and_sorted() {
    let ds = Dataset::new(DatasetId::District, vec![
      Record::new("Tabanan", day(1)),
      Record::new("badung", day(1)),
      Record::new("Tabanan", day(2)),
      Record::new("Badung", day(2)),
    ])
    .unwrap();
    assert_eq!(ds.regions(), vec!["badung", "Tabanan"]);
  }

  #[test]
  fn dataset_id_string_forms() {
    assert_eq!(DatasetId::Province.to_string(), "province");
    assert_eq!(DatasetId::from_str("World").unwrap(), DatasetId::World);
    assert!(DatasetId::from_str("county").is_err());
    let json = serde_json::to_string(&DatasetId::District).unwrap();
    assert_eq!(json, "\"district\"");
  }
}
