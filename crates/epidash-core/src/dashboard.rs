//! The one composition of resolver, deriver, aligner and summary extractor
//! shared by every presentation of the dashboard.
//!
//! A [`Dashboard`] borrows a dataset snapshot and an immutable configuration
//! for the duration of a request; it owns no state of its own.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  align::{Alignment, align},
  derive::{DEFAULT_GROWTH_WINDOW, DerivedSeries, derive},
  facts::{FactTable, fact_table},
  leaderboard::{CaseKind, RegionValue, leaderboard},
  record::DatasetId,
  registry::DatasetSource,
  resolve::resolve,
  selection::{RegionConfig, Scope},
  summary::{Summary, summarize},
  vaccination::{DEFAULT_VACCINATION_DAYS, VaccinationPoint, vaccination_trend},
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Dashboard parameters, deserialised from the `[dashboard]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
  #[serde(flatten)]
  pub regions:            RegionConfig,
  /// Trailing window of the growth rate, in days.
  pub growth_window:      NonZeroUsize,
  /// Comparison region used when a request names none.
  pub default_comparison: String,
  /// Regions offered as comparison choices.
  pub comparison_options: Vec<String>,
  pub vaccination_days:   usize,
  pub leaderboard_limit:  usize,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      regions:            RegionConfig::default(),
      growth_window:      DEFAULT_GROWTH_WINDOW,
      default_comparison: "Germany".to_string(),
      comparison_options: [
        "World",
        "Indonesia",
        "Australia",
        "Germany",
        "United Kingdom",
        "Italy",
      ]
      .into_iter()
      .map(String::from)
      .collect(),
      vaccination_days:   DEFAULT_VACCINATION_DAYS,
      leaderboard_limit:  10,
    }
  }
}

// ─── Views ───────────────────────────────────────────────────────────────────

/// A derived series with the label of the region it was resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSeries {
  pub label:   String,
  pub dataset: DatasetId,
  pub series:  DerivedSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryPair {
  pub primary:    Summary,
  pub comparison: Summary,
}

/// Chart data for the primary region against the comparison region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
  pub primary_label:    String,
  pub comparison_label: String,
  pub alignment:        Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
  pub summaries: SummaryPair,
  pub chart:     Chart,
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

pub struct Dashboard<'a, S: ?Sized> {
  source: &'a S,
  config: &'a DashboardConfig,
}

impl<'a, S> Dashboard<'a, S>
where
  S: DatasetSource + ?Sized,
{
  pub fn new(source: &'a S, config: &'a DashboardConfig) -> Self {
    Self { source, config }
  }

  pub fn config(&self) -> &DashboardConfig { self.config }

  /// The requested comparison region, or the configured default if the
  /// request names none.
  fn comparison_name<'c>(&'c self, comparison: Option<&'c str>) -> &'c str {
    comparison
      .map(str::trim)
      .filter(|c| !c.is_empty())
      .unwrap_or(&self.config.default_comparison)
  }

  /// Resolve `scope` and derive its indicator series.
  pub fn series(&self, scope: &Scope) -> Result<RegionSeries> {
    let resolved = resolve(self.source, &self.config.regions, scope)?;
    let series = derive(resolved.rows.iter().copied(), self.config.growth_window)?;
    Ok(RegionSeries {
      label: resolved.label,
      dataset: resolved.dataset,
      series,
    })
  }

  fn pair(
    &self,
    primary: &Scope,
    comparison: Option<&str>,
  ) -> Result<(RegionSeries, RegionSeries)> {
    let primary = self.series(primary)?;
    let comparison =
      self.series(&Scope::comparison(self.comparison_name(comparison)))?;
    Ok((primary, comparison))
  }

  pub fn summaries(
    &self,
    primary: &Scope,
    comparison: Option<&str>,
  ) -> Result<SummaryPair> {
    let (primary, comparison) = self.pair(primary, comparison)?;
    Ok(summary_pair(&primary, &comparison))
  }

  pub fn chart(&self, primary: &Scope, comparison: Option<&str>) -> Result<Chart> {
    let (primary, comparison) = self.pair(primary, comparison)?;
    Ok(chart(primary, comparison))
  }

  /// Summaries and chart from a single resolution of both regions.
  pub fn view(
    &self,
    primary: &Scope,
    comparison: Option<&str>,
  ) -> Result<DashboardView> {
    let (primary, comparison) = self.pair(primary, comparison)?;
    Ok(DashboardView {
      summaries: summary_pair(&primary, &comparison),
      chart:     chart(primary, comparison),
    })
  }

  pub fn leaderboard(
    &self,
    dataset: DatasetId,
    kind: CaseKind,
    limit: Option<usize>,
  ) -> Result<Vec<RegionValue>> {
    let dataset = self.source.require(dataset)?;
    Ok(leaderboard(
      dataset,
      kind,
      limit.unwrap_or(self.config.leaderboard_limit),
    ))
  }

  pub fn vaccinations(
    &self,
    comparison: Option<&str>,
    days: Option<usize>,
  ) -> Result<Alignment<VaccinationPoint>> {
    vaccination_trend(
      self.source,
      &self.config.regions,
      self.comparison_name(comparison),
      days.unwrap_or(self.config.vaccination_days),
    )
  }

  pub fn facts(&self, comparison: Option<&str>) -> Result<FactTable> {
    fact_table(
      self.source,
      &self.config.regions,
      self.comparison_name(comparison),
    )
  }

  /// Region names available in `dataset`, for selection lists.
  pub fn regions(&self, dataset: DatasetId) -> Result<Vec<&'a str>> {
    Ok(self.source.require(dataset)?.regions())
  }
}

fn summary_pair(primary: &RegionSeries, comparison: &RegionSeries) -> SummaryPair {
  SummaryPair {
    primary:    summarize(primary.label.as_str(), &primary.series),
    comparison: summarize(comparison.label.as_str(), &comparison.series),
  }
}

fn chart(primary: RegionSeries, comparison: RegionSeries) -> Chart {
  Chart {
    alignment:        align(&primary.series, &comparison.series),
    primary_label:    primary.label,
    comparison_label: comparison.label,
  }
}
