//! Header lookup and cell decoding.
//!
//! All cell decoders treat an empty cell, `NaN` or `null` as missing.

use chrono::NaiveDate;
use csv::StringRecord;

use crate::{Error, Result};

// ─── Column names ────────────────────────────────────────────────────────────

pub(crate) const NEW_CASES: &str = "new_cases";
pub(crate) const NEW_DEATHS: &str = "new_deaths";
pub(crate) const NEW_RECOVERED: &str = "new_recovered";
pub(crate) const CASES_PER_100K: &str = "total_cases_per_100k";
pub(crate) const DEATHS_PER_100K: &str = "total_deaths_per_100k";
pub(crate) const CFR: &str = "CFR";
pub(crate) const NEW_CASES_PER_MILLION: &str = "new_cases_per_million";
pub(crate) const NEW_VACCINATIONS: &str = "new_vaccinations_smoothed_per_million";
pub(crate) const FULLY_VACCINATED: &str = "people_fully_vaccinated_per_hundred";
pub(crate) const MEDIAN_AGE: &str = "median_age";
pub(crate) const AGED_65_OLDER: &str = "aged_65_older";
pub(crate) const MALE_SMOKERS: &str = "male_smokers";
pub(crate) const FEMALE_SMOKERS: &str = "female_smokers";
pub(crate) const DIABETES_PREVALENCE: &str = "diabetes_prevalence";

/// Column positions resolved once from the header row.
pub(crate) struct Columns {
  pub region:                usize,
  pub date:                  usize,
  pub new_cases:             Option<usize>,
  pub new_deaths:            Option<usize>,
  pub new_recovered:         Option<usize>,
  pub cases_per_100k:        Option<usize>,
  pub deaths_per_100k:       Option<usize>,
  pub case_fatality_rate:    Option<usize>,
  pub new_cases_per_million: Option<usize>,
  pub new_vaccinations:      Option<usize>,
  pub fully_vaccinated:      Option<usize>,
  pub median_age:            Option<usize>,
  pub aged_65_older:         Option<usize>,
  pub male_smokers:          Option<usize>,
  pub female_smokers:        Option<usize>,
  pub diabetes_prevalence:   Option<usize>,
}

fn find(headers: &StringRecord, name: &str) -> Option<usize> {
  headers.iter().position(|h| h.trim() == name)
}

impl Columns {
  /// Locate every known column; only the region and date columns are
  /// required.
  pub fn resolve(
    headers: &StringRecord,
    region_column: &str,
    date_column: &str,
  ) -> Result<Self> {
    let required = |name: &str| {
      find(headers, name).ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    Ok(Self {
      region:                required(region_column)?,
      date:                  required(date_column)?,
      new_cases:             find(headers, NEW_CASES),
      new_deaths:            find(headers, NEW_DEATHS),
      new_recovered:         find(headers, NEW_RECOVERED),
      cases_per_100k:        find(headers, CASES_PER_100K),
      deaths_per_100k:       find(headers, DEATHS_PER_100K),
      case_fatality_rate:    find(headers, CFR),
      new_cases_per_million: find(headers, NEW_CASES_PER_MILLION),
      new_vaccinations:      find(headers, NEW_VACCINATIONS),
      fully_vaccinated:      find(headers, FULLY_VACCINATED),
      median_age:            find(headers, MEDIAN_AGE),
      aged_65_older:         find(headers, AGED_65_OLDER),
      male_smokers:          find(headers, MALE_SMOKERS),
      female_smokers:        find(headers, FEMALE_SMOKERS),
      diabetes_prevalence:   find(headers, DIABETES_PREVALENCE),
    })
  }
}

// ─── Cells ───────────────────────────────────────────────────────────────────

fn is_missing(cell: &str) -> bool {
  cell.is_empty()
    || cell.eq_ignore_ascii_case("nan")
    || cell.eq_ignore_ascii_case("null")
}

/// The trimmed cell at `pos`, `None` if the column is absent or the cell is
/// missing.
fn cell(record: &StringRecord, pos: Option<usize>) -> Option<&str> {
  pos
    .and_then(|p| record.get(p))
    .map(str::trim)
    .filter(|c| !is_missing(c))
}

/// Dates are ISO `YYYY-MM-DD`, optionally followed by a time of day which is
/// ignored.
pub(crate) fn decode_date(line: u64, raw: &str) -> Result<NaiveDate> {
  let raw = raw.trim();
  let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
  NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
    Error::InvalidDate {
      line,
      value: raw.to_string(),
    }
  })
}

/// A float column. Non-finite values are missing.
pub(crate) fn decode_float(
  record: &StringRecord,
  line: u64,
  pos: Option<usize>,
  column: &'static str,
) -> Result<Option<f64>> {
  let Some(raw) = cell(record, pos) else {
    return Ok(None);
  };
  let value: f64 = raw.parse().map_err(|_| Error::InvalidNumber {
    line,
    column,
    value: raw.to_string(),
  })?;
  Ok(value.is_finite().then_some(value))
}

/// A daily count. Counts are often written as floats (`12.0`) by the tools
/// that produce these files; those are accepted. Negative counts are
/// reporting corrections and are treated as missing.
pub(crate) fn decode_count(
  record: &StringRecord,
  line: u64,
  pos: Option<usize>,
  column: &'static str,
) -> Result<Option<u64>> {
  let Some(value) = decode_float(record, line, pos, column)? else {
    return Ok(None);
  };
  if value < 0.0 {
    tracing::debug!(line, column, value, "dropping negative count");
    return Ok(None);
  }
  if value.fract() != 0.0 || value > u64::MAX as f64 {
    return Err(Error::InvalidNumber {
      line,
      column,
      value: value.to_string(),
    });
  }
  Ok(Some(value as u64))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rec(cells: &[&str]) -> StringRecord { StringRecord::from(cells.to_vec()) }

  #[test]
  fn dates_with_and_without_time() {
    let d = NaiveDate::from_ymd_opt(2021, 4, 24).unwrap();
    assert_eq!(decode_date(1, "2021-04-24").unwrap(), d);
    assert_eq!(decode_date(1, "2021-04-24 00:00:00").unwrap(), d);
    assert_eq!(decode_date(1, "2021-04-24T08:00:00Z").unwrap(), d);
    assert!(matches!(
      decode_date(7, "24.04.2021"),
      Err(Error::InvalidDate { line: 7, .. })
    ));
  }

  #[test]
  fn missing_markers() {
    let r = rec(&["", "NaN", "null", " 3.5 "]);
    assert_eq!(decode_float(&r, 1, Some(0), CFR).unwrap(), None);
    assert_eq!(decode_float(&r, 1, Some(1), CFR).unwrap(), None);
    assert_eq!(decode_float(&r, 1, Some(2), CFR).unwrap(), None);
    assert_eq!(decode_float(&r, 1, Some(3), CFR).unwrap(), Some(3.5));
    assert_eq!(decode_float(&r, 1, None, CFR).unwrap(), None);
    assert_eq!(decode_float(&r, 1, Some(9), CFR).unwrap(), None);
  }

  #[test]
  fn counts_accept_integral_floats_and_drop_negatives() {
    let r = rec(&["12", "12.0", "-4", "1.5", "abc"]);
    assert_eq!(decode_count(&r, 1, Some(0), NEW_CASES).unwrap(), Some(12));
    assert_eq!(decode_count(&r, 1, Some(1), NEW_CASES).unwrap(), Some(12));
    assert_eq!(decode_count(&r, 1, Some(2), NEW_CASES).unwrap(), None);
    assert!(decode_count(&r, 1, Some(3), NEW_CASES).is_err());
    assert!(matches!(
      decode_count(&r, 5, Some(4), NEW_CASES),
      Err(Error::InvalidNumber { line: 5, column: NEW_CASES, .. })
    ));
  }

  #[test]
  fn optional_columns_may_be_absent() {
    let headers = rec(&["Date", "location", "new_cases"]);
    let cols = Columns::resolve(&headers, "location", "Date").unwrap();
    assert_eq!(cols.region, 1);
    assert_eq!(cols.new_cases, Some(2));
    assert_eq!(cols.case_fatality_rate, None);

    assert!(matches!(
      Columns::resolve(&headers, "Province", "Date"),
      Err(Error::MissingColumn(c)) if c == "Province"
    ));
  }
}
