//! Indicator derivation: pass-through of precomputed rates plus a trailing
//! growth rate of daily new cases.

use std::num::NonZeroUsize;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{Error, Result, align::Dated, record::Record};

/// One week; smooths out day-of-week reporting noise.
pub const DEFAULT_GROWTH_WINDOW: NonZeroUsize = match NonZeroUsize::new(7) {
  Some(w) => w,
  None => unreachable!(),
};

/// Decimal places kept for growth rates in chart series.
const SERIES_DECIMALS: i32 = 2;

// ─── Indicators ──────────────────────────────────────────────────────────────

/// The indicators a [`DerivedPoint`] carries.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumIter,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IndicatorField {
  CaseFatalityRate,
  CasesPer100k,
  DeathsPer100k,
  GrowthRate,
  NewCasesPerMillion,
}

impl IndicatorField {
  /// Decimal places shown when the indicator is displayed as a single
  /// summary value.
  pub fn summary_decimals(self) -> i32 {
    match self {
      Self::GrowthRate | Self::DeathsPer100k => 0,
      Self::CaseFatalityRate | Self::CasesPer100k | Self::NewCasesPerMillion => 2,
    }
  }
}

// ─── Series ──────────────────────────────────────────────────────────────────

/// Derived indicators for one day. `None` means the input was missing or the
/// value is undefined; it is never replaced by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
  pub date:                  NaiveDate,
  pub case_fatality_rate:    Option<f64>,
  pub cases_per_100k:        Option<f64>,
  pub deaths_per_100k:       Option<f64>,
  /// Percent change of new cases over the growth window.
  pub growth_rate:           Option<f64>,
  pub new_cases_per_million: Option<f64>,
}

impl DerivedPoint {
  pub fn get(&self, field: IndicatorField) -> Option<f64> {
    match field {
      IndicatorField::CaseFatalityRate => self.case_fatality_rate,
      IndicatorField::CasesPer100k => self.cases_per_100k,
      IndicatorField::DeathsPer100k => self.deaths_per_100k,
      IndicatorField::GrowthRate => self.growth_rate,
      IndicatorField::NewCasesPerMillion => self.new_cases_per_million,
    }
  }
}

impl Dated for DerivedPoint {
  fn date(&self) -> NaiveDate { self.date }
}

/// A non-empty, date-ascending sequence of [`DerivedPoint`]s, one per input
/// record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DerivedSeries {
  points: Vec<DerivedPoint>,
}

impl DerivedSeries {
  pub fn points(&self) -> &[DerivedPoint] { &self.points }

  pub fn len(&self) -> usize { self.points.len() }

  /// Always `false` for a series produced by [`derive`].
  pub fn is_empty(&self) -> bool { self.points.is_empty() }

  pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
    self.points.iter().map(|p| p.date)
  }

  /// The values of one indicator, in date order.
  pub fn column(&self, field: IndicatorField) -> Vec<Option<f64>> {
    self.points.iter().map(|p| p.get(field)).collect()
  }
}

// ─── Derivation ──────────────────────────────────────────────────────────────

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  (value * factor).round() / factor
}

/// Percent change from `base` to `current`; undefined for a zero or missing
/// base.
fn percent_change(base: Option<u64>, current: Option<u64>) -> Option<f64> {
  match (base, current) {
    (Some(base), Some(current)) if base > 0 => {
      Some((current as f64 - base as f64) / base as f64 * 100.0)
    }
    _ => None,
  }
}

/// Derive the indicator series for `rows`, which must already be in
/// ascending date order with one row per day at most (as produced by
/// [`crate::resolve::resolve`]).
///
/// The growth rate of a row compares its `new_cases` with those of the row
/// dated `window` days earlier. It is `None` when that row does not exist
/// (too little history, or a reporting gap) and when its count is zero or
/// missing. For gap-free daily rows this is the row `window` positions back;
/// when earlier days are unreported, a row fewer than `window` positions
/// from the start can still have a growth rate.
/// A sequence shorter than the window is valid. Only an empty sequence is an
/// error.
pub fn derive<'a, I>(rows: I, window: NonZeroUsize) -> Result<DerivedSeries>
where
  I: IntoIterator<Item = &'a Record>,
{
  let rows: Vec<&Record> = rows.into_iter().collect();
  if rows.is_empty() {
    return Err(Error::InsufficientData);
  }
  let window = Days::new(window.get() as u64);

  let points = rows
    .iter()
    .map(|row| {
      let growth_rate = row
        .date
        .checked_sub_days(window)
        .and_then(|base| rows.binary_search_by_key(&base, |r| r.date).ok())
        .and_then(|base| percent_change(rows[base].new_cases, row.new_cases))
        .map(|g| round_to(g, SERIES_DECIMALS));

      DerivedPoint {
        date: row.date,
        case_fatality_rate: row.case_fatality_rate,
        cases_per_100k: row.cases_per_100k,
        deaths_per_100k: row.deaths_per_100k,
        growth_rate,
        new_cases_per_million: row.new_cases_per_million,
      }
    })
    .collect();

  Ok(DerivedSeries { points })
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, m, d).unwrap()
  }

  fn w(n: usize) -> NonZeroUsize { NonZeroUsize::new(n).unwrap() }

  fn cases(date: NaiveDate, new_cases: Option<u64>) -> Record {
    Record { new_cases, ..Record::new("Bali", date) }
  }

  /// A series built straight from points, for tests of downstream stages.
  pub(crate) fn series(points: Vec<DerivedPoint>) -> DerivedSeries {
    DerivedSeries { points }
  }

  pub(crate) fn point(date: NaiveDate) -> DerivedPoint {
    DerivedPoint {
      date,
      case_fatality_rate: None,
      cases_per_100k: None,
      deaths_per_100k: None,
      growth_rate: None,
      new_cases_per_million: None,
    }
  }

  #[test]
  fn weekly_growth_scenario() {
    let rows = vec![cases(day(1, 1), Some(100)), cases(day(1, 8), Some(150))];
    let s = derive(&rows, DEFAULT_GROWTH_WINDOW).unwrap();
    assert_eq!(s.column(IndicatorField::GrowthRate), vec![None, Some(50.0)]);

    // Nothing was reported on Jan 7.
    let s = derive(&rows, w(1)).unwrap();
    assert_eq!(s.column(IndicatorField::GrowthRate), vec![None, None]);
  }

  #[test]
  fn reporting_gap_at_the_base_day_yields_missing_growth() {
    let rows = vec![
      cases(day(2, 1), Some(10)),
      cases(day(2, 3), Some(30)),
      cases(day(2, 4), Some(40)),
    ];
    let s = derive(&rows, w(2)).unwrap();
    // Feb 3 looks back to Feb 1, Feb 4 to the unreported Feb 2.
    assert_eq!(s.column(IndicatorField::GrowthRate), vec![
      None,
      Some(200.0),
      None
    ]);
  }

  #[test]
  fn sparse_rows_can_have_growth_before_the_window_index() {
    let rows = vec![
      cases(day(1, 1), Some(10)),
      cases(day(1, 5), Some(20)),
      cases(day(1, 8), Some(30)),
    ];
    let s = derive(&rows, DEFAULT_GROWTH_WINDOW).unwrap();
    // Index 2 is Jan 8, exactly seven days after Jan 1.
    assert_eq!(s.column(IndicatorField::GrowthRate), vec![
      None,
      None,
      Some(200.0)
    ]);
  }

  #[test]
  fn growth_uses_the_row_window_back() {
    let rows: Vec<_> = (1..=10)
      .map(|d| cases(day(3, d), Some(u64::from(d) * 10)))
      .collect();
    let s = derive(&rows, DEFAULT_GROWTH_WINDOW).unwrap();
    let growth = s.column(IndicatorField::GrowthRate);

    assert!(growth[..7].iter().all(Option::is_none));
    // 80 vs 10, 90 vs 20, 100 vs 30
    assert_eq!(growth[7], Some(700.0));
    assert_eq!(growth[8], Some(350.0));
    assert_eq!(growth[9], Some(233.33));
  }

  #[test]
  fn zero_or_missing_base_yields_missing_growth() {
    let rows = vec![
      cases(day(1, 1), Some(0)),
      cases(day(1, 2), None),
      cases(day(1, 3), Some(5)),
      cases(day(1, 4), Some(7)),
      cases(day(1, 5), None),
    ];
    let s = derive(&rows, w(2)).unwrap();
    assert_eq!(s.column(IndicatorField::GrowthRate), vec![
      None, None, None, None, None
    ]);
  }

  #[test]
  fn decline_is_negative_growth() {
    let rows = vec![cases(day(1, 1), Some(200)), cases(day(1, 2), Some(50))];
    let s = derive(&rows, w(1)).unwrap();
    assert_eq!(s.points()[1].growth_rate, Some(-75.0));
  }

  #[test]
  fn short_history_is_not_an_error() {
    let rows = vec![cases(day(1, 1), Some(1)), cases(day(1, 2), Some(2))];
    let s = derive(&rows, DEFAULT_GROWTH_WINDOW).unwrap();
    assert_eq!(s.len(), 2);
    assert!(s.points().iter().all(|p| p.growth_rate.is_none()));
  }

  #[test]
  fn empty_input_is_insufficient_data() {
    let rows: Vec<Record> = Vec::new();
    assert!(matches!(
      derive(&rows, DEFAULT_GROWTH_WINDOW),
      Err(Error::InsufficientData)
    ));
  }

  #[test]
  fn rates_pass_through_and_missing_stays_missing() {
    let rows = vec![
      Record {
        case_fatality_rate: Some(2.75),
        cases_per_100k: Some(310.5),
        deaths_per_100k: None,
        new_cases_per_million: Some(12.0),
        ..Record::new("Bali", day(4, 1))
      },
      Record::new("Bali", day(4, 2)),
    ];
    let s = derive(&rows, DEFAULT_GROWTH_WINDOW).unwrap();

    assert_eq!(s.len(), rows.len());
    assert_eq!(s.dates().collect::<Vec<_>>(), vec![day(4, 1), day(4, 2)]);
    let first = &s.points()[0];
    assert_eq!(first.case_fatality_rate, Some(2.75));
    assert_eq!(first.cases_per_100k, Some(310.5));
    assert_eq!(first.deaths_per_100k, None);
    assert_eq!(first.new_cases_per_million, Some(12.0));
    assert_eq!(s.points()[1], point(day(4, 2)));
  }

  #[test]
  fn summary_precision_per_indicator() {
    assert_eq!(IndicatorField::GrowthRate.summary_decimals(), 0);
    assert_eq!(IndicatorField::CaseFatalityRate.summary_decimals(), 2);
    assert_eq!(round_to(2.345_6, 2), 2.35);
    assert_eq!(round_to(-12.5, 0), -13.0);
  }
}
