//! Latest daily counts per region, ranked for the bar chart beside the map.

use std::{cmp::Ordering, collections::HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::record::{Dataset, Record, region_key};

/// Which daily count to rank by.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
  #[default]
  Cases,
  Deaths,
  Recovered,
}

impl CaseKind {
  pub fn count(self, record: &Record) -> Option<u64> {
    match self {
      Self::Cases => record.new_cases,
      Self::Deaths => record.new_deaths,
      Self::Recovered => record.new_recovered,
    }
  }
}

/// One bar of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionValue {
  pub region: String,
  pub date:   NaiveDate,
  pub value:  Option<u64>,
}

/// The most recent record of every region in `dataset`, ranked by the chosen
/// count (largest first, missing counts last, ties by name), truncated to
/// `limit` entries.
pub fn leaderboard(
  dataset: &Dataset,
  kind: CaseKind,
  limit: usize,
) -> Vec<RegionValue> {
  // Records are date-ascending, so later inserts are more recent.
  let mut latest: HashMap<String, &Record> = HashMap::new();
  for record in dataset.records() {
    latest.insert(region_key(&record.region), record);
  }

  let mut entries: Vec<RegionValue> = latest
    .into_values()
    .map(|r| RegionValue {
      region: r.region.clone(),
      date:   r.date,
      value:  kind.count(r),
    })
    .collect();

  entries.sort_by(|a, b| {
    let by_value = match (a.value, b.value) {
      (Some(x), Some(y)) => y.cmp(&x),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => Ordering::Equal,
    };
    by_value.then_with(|| a.region.cmp(&b.region))
  });
  entries.truncate(limit);
  entries
}
