//! Latest-value extraction for summary panels.
//!
//! Today's figures are often not reported yet, so every lookup walks back to
//! the most recent day that actually carries the indicator.

use chrono::NaiveDate;
use serde::Serialize;

use crate::derive::{DerivedSeries, IndicatorField, round_to};

/// A single indicator value and the day it was reported for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
  pub value: f64,
  pub as_of: NaiveDate,
}

impl Observation {
  /// The value rounded to the display precision of `field`.
  pub fn rounded(self, field: IndicatorField) -> Self {
    Self {
      value: round_to(self.value, field.summary_decimals()),
      ..self
    }
  }
}

/// The last non-missing value of `field`, or `None` if the series never
/// carries it.
pub fn latest_of(
  series: &DerivedSeries,
  field: IndicatorField,
) -> Option<Observation> {
  series.points().iter().rev().find_map(|p| {
    p.get(field).map(|value| Observation { value, as_of: p.date })
  })
}

/// The scalar panel shown next to the charts for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
  pub label:              String,
  /// Date of the last row in the series, reported or not.
  pub last_date:          Option<NaiveDate>,
  pub case_fatality_rate: Option<Observation>,
  pub cases_per_100k:     Option<Observation>,
  pub deaths_per_100k:    Option<Observation>,
  pub growth_rate:        Option<Observation>,
}

/// Build the summary panel for `series`, values rounded for display.
pub fn summarize(label: impl Into<String>, series: &DerivedSeries) -> Summary {
  let latest = |field| latest_of(series, field).map(|o| o.rounded(field));
  Summary {
    label:              label.into(),
    last_date:          series.points().last().map(|p| p.date),
    case_fatality_rate: latest(IndicatorField::CaseFatalityRate),
    cases_per_100k:     latest(IndicatorField::CasesPer100k),
    deaths_per_100k:    latest(IndicatorField::DeathsPer100k),
    growth_rate:        latest(IndicatorField::GrowthRate),
  }
}
