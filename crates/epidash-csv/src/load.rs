//! Loading datasets and whole registries from CSV files.

use std::{fs::File, io, path::PathBuf};

use epidash_core::{
  record::{Dataset, DatasetId, Record},
  registry::DatasetRegistry,
};
use serde::Deserialize;

use crate::{
  Error, Result,
  columns::{
    AGED_65_OLDER, CASES_PER_100K, CFR, Columns, DEATHS_PER_100K,
    DIABETES_PREVALENCE, FEMALE_SMOKERS, FULLY_VACCINATED, MALE_SMOKERS,
    MEDIAN_AGE, NEW_CASES, NEW_CASES_PER_MILLION, NEW_DEATHS, NEW_RECOVERED,
    NEW_VACCINATIONS, decode_count, decode_date, decode_float,
  },
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Where one dataset lives and how its key columns are named.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
  pub path:          PathBuf,
  /// Defaults to `Name_EN`, `Province` or `location` depending on the
  /// dataset.
  pub region_column: Option<String>,
  /// Defaults to `Date`.
  pub date_column:   Option<String>,
}

/// The `[data]` config table. Datasets left out are simply not registered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
  pub district: Option<SourceConfig>,
  pub province: Option<SourceConfig>,
  pub world:    Option<SourceConfig>,
}

impl DataConfig {
  fn sources(&self) -> impl Iterator<Item = (DatasetId, &SourceConfig)> {
    [
      (DatasetId::District, self.district.as_ref()),
      (DatasetId::Province, self.province.as_ref()),
      (DatasetId::World, self.world.as_ref()),
    ]
    .into_iter()
    .filter_map(|(id, src)| src.map(|s| (id, s)))
  }
}

fn default_region_column(id: DatasetId) -> &'static str {
  match id {
    DatasetId::District => "Name_EN",
    DatasetId::Province => "Province",
    DatasetId::World => "location",
  }
}

const DEFAULT_DATE_COLUMN: &str = "Date";

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Parse a dataset from CSV text with a header row.
///
/// `region_column` / `date_column` default to the conventional names for
/// `id`. All measurement columns are optional.
pub fn read_dataset<R: io::Read>(
  id: DatasetId,
  reader: R,
  region_column: Option<&str>,
  date_column: Option<&str>,
) -> Result<Dataset> {
  let mut rdr = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(reader);

  let columns = Columns::resolve(
    rdr.headers()?,
    region_column.unwrap_or(default_region_column(id)),
    date_column.unwrap_or(DEFAULT_DATE_COLUMN),
  )?;

  let mut records = Vec::new();
  for row in rdr.records() {
    let row = row?;
    let line = row.position().map_or(0, |p| p.line());

    let region = row.get(columns.region).unwrap_or_default().trim();
    if region.is_empty() {
      return Err(Error::MissingRegion { line });
    }
    let date = decode_date(line, row.get(columns.date).unwrap_or_default())?;

    records.push(Record {
      new_cases: decode_count(&row, line, columns.new_cases, NEW_CASES)?,
      new_deaths: decode_count(&row, line, columns.new_deaths, NEW_DEATHS)?,
      new_recovered: decode_count(
        &row,
        line,
        columns.new_recovered,
        NEW_RECOVERED,
      )?,
      cases_per_100k: decode_float(
        &row,
        line,
        columns.cases_per_100k,
        CASES_PER_100K,
      )?,
      deaths_per_100k: decode_float(
        &row,
        line,
        columns.deaths_per_100k,
        DEATHS_PER_100K,
      )?,
      case_fatality_rate: decode_float(
        &row,
        line,
        columns.case_fatality_rate,
        CFR,
      )?,
      new_cases_per_million: decode_float(
        &row,
        line,
        columns.new_cases_per_million,
        NEW_CASES_PER_MILLION,
      )?,
      new_vaccinations_smoothed_per_million: decode_float(
        &row,
        line,
        columns.new_vaccinations,
        NEW_VACCINATIONS,
      )?,
      people_fully_vaccinated_per_hundred: decode_float(
        &row,
        line,
        columns.fully_vaccinated,
        FULLY_VACCINATED,
      )?,
      median_age: decode_float(&row, line, columns.median_age, MEDIAN_AGE)?,
      aged_65_older: decode_float(
        &row,
        line,
        columns.aged_65_older,
        AGED_65_OLDER,
      )?,
      male_smokers: decode_float(
        &row,
        line,
        columns.male_smokers,
        MALE_SMOKERS,
      )?,
      female_smokers: decode_float(
        &row,
        line,
        columns.female_smokers,
        FEMALE_SMOKERS,
      )?,
      diabetes_prevalence: decode_float(
        &row,
        line,
        columns.diabetes_prevalence,
        DIABETES_PREVALENCE,
      )?,
      ..Record::new(region, date)
    });
  }

  Ok(Dataset::new(id, records)?)
}

/// Open and parse the file described by `source`.
pub fn load_dataset(id: DatasetId, source: &SourceConfig) -> Result<Dataset> {
  let file = File::open(&source.path).map_err(|e| Error::Io {
    path:   source.path.clone(),
    source: e,
  })?;
  let dataset = read_dataset(
    id,
    io::BufReader::new(file),
    source.region_column.as_deref(),
    source.date_column.as_deref(),
  )?;
  tracing::info!(
    dataset = %id,
    path = %source.path.display(),
    rows = dataset.len(),
    regions = dataset.regions().len(),
    "loaded dataset"
  );
  Ok(dataset)
}

/// Load every dataset configured in `config` into a registry.
pub fn load_registry(config: &DataConfig) -> Result<DatasetRegistry> {
  let mut registry = DatasetRegistry::new();
  for (id, source) in config.sources() {
    registry.insert(load_dataset(id, source)?);
  }
  if registry.ids().is_empty() {
    tracing::warn!("no datasets configured");
  }
  Ok(registry)
}
