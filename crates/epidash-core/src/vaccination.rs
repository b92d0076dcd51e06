//! Recent vaccination progress of the configured country against a
//! comparison country.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  Result,
  align::{Alignment, Dated, align_points},
  record::Record,
  registry::DatasetSource,
  resolve::resolve,
  selection::{RegionConfig, Scope},
};

/// Number of trailing days shown by default.
pub const DEFAULT_VACCINATION_DAYS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaccinationPoint {
  pub date:                                  NaiveDate,
  pub new_vaccinations_smoothed_per_million: Option<f64>,
  pub people_fully_vaccinated_per_hundred:   Option<f64>,
}

impl From<&Record> for VaccinationPoint {
  fn from(r: &Record) -> Self {
    Self {
      date: r.date,
      new_vaccinations_smoothed_per_million: r
        .new_vaccinations_smoothed_per_million,
      people_fully_vaccinated_per_hundred: r.people_fully_vaccinated_per_hundred,
    }
  }
}

impl Dated for VaccinationPoint {
  fn date(&self) -> NaiveDate { self.date }
}

fn tail(rows: &[&Record], days: usize) -> Vec<VaccinationPoint> {
  let start = rows.len().saturating_sub(days);
  rows[start..].iter().map(|r| VaccinationPoint::from(*r)).collect()
}

/// The last `days` rows of the configured country and of `comparison`, both
/// from the world dataset, aligned on date.
pub fn vaccination_trend<S>(
  source: &S,
  config: &RegionConfig,
  comparison: &str,
  days: usize,
) -> Result<Alignment<VaccinationPoint>>
where
  S: DatasetSource + ?Sized,
{
  let home = resolve(source, config, &Scope::Country)?;
  let other = resolve(source, config, &Scope::comparison(comparison))?;
  Ok(align_points(&tail(&home.rows, days), &tail(&other.rows, days)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    Error,
    record::{Dataset, DatasetId},
    registry::DatasetRegistry,
  };

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2021, 6, d).unwrap() }

  fn vacc(region: &str, d: u32, per_hundred: f64) -> Record {
    Record {
      people_fully_vaccinated_per_hundred: Some(per_hundred),
      ..Record::new(region, day(d))
    }
  }

  fn registry() -> DatasetRegistry {
    let mut rows = Vec::new();
    for d in 1..=10 {
      rows.push(vacc("Indonesia", d, f64::from(d)));
    }
    for d in 3..=12 {
      rows.push(vacc("Germany", d, f64::from(d) * 2.0));
    }
    DatasetRegistry::new()
      .with(Dataset::new(DatasetId::World, rows).unwrap())
  }

  #[test]
  fn trailing_window_then_alignment() {
    let reg = registry();
    let trend =
      vaccination_trend(&reg, &RegionConfig::default(), "Germany", 5).unwrap();
    // Indonesia keeps Jun 6–10, Germany Jun 8–12.
    let pair = trend.aligned().unwrap();
    assert_eq!(pair.dates(), vec![day(8), day(9), day(10)]);
    assert_eq!(pair.primary()[0].people_fully_vaccinated_per_hundred, Some(8.0));
    assert_eq!(
      pair.comparison()[0].people_fully_vaccinated_per_hundred,
      Some(16.0)
    );
  }

  #[test]
  fn comparing_with_itself_aligns_fully() {
    let reg = registry();
    let trend = vaccination_trend(
      &reg,
      &RegionConfig::default(),
      "indonesia",
      DEFAULT_VACCINATION_DAYS,
    )
    .unwrap();
    assert_eq!(trend.aligned().unwrap().len(), 10);
  }

  #[test]
  fn unknown_comparison_fails() {
    let reg = registry();
    let err = vaccination_trend(&reg, &RegionConfig::default(), "Narnia", 5)
      .unwrap_err();
    assert!(matches!(err, Error::EmptySelection { .. }));
  }
}
