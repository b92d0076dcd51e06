//! Date alignment of a primary and a comparison series.
//!
//! The two sides usually come from different datasets with different calendar
//! coverage and reporting gaps, so they are joined on date, never zipped by
//! position.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::derive::{DerivedPoint, DerivedSeries};

/// Anything that belongs to one calendar day.
pub trait Dated {
  fn date(&self) -> NaiveDate;
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

impl DateRange {
  /// The first and last date of an ascending slice, `None` if it is empty.
  pub fn of<T: Dated>(points: &[T]) -> Option<Self> {
    Some(Self {
      start: points.first()?.date(),
      end:   points.last()?.date(),
    })
  }
}

/// Two series restricted to their shared dates.
///
/// Both sides have the same length and `primary[i].date() ==
/// comparison[i].date()` for every `i`; a renderer may rely on this without
/// further checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedPair<T = DerivedPoint> {
  primary:    Vec<T>,
  comparison: Vec<T>,
}

impl<T: Dated> AlignedPair<T> {
  pub fn primary(&self) -> &[T] { &self.primary }

  pub fn comparison(&self) -> &[T] { &self.comparison }

  /// Number of shared dates; never zero.
  pub fn len(&self) -> usize { self.primary.len() }

  pub fn is_empty(&self) -> bool { self.primary.is_empty() }

  pub fn dates(&self) -> Vec<NaiveDate> {
    self.primary.iter().map(Dated::date).collect()
  }

  pub fn range(&self) -> Option<DateRange> { DateRange::of(&self.primary) }

  pub fn into_parts(self) -> (Vec<T>, Vec<T>) { (self.primary, self.comparison) }
}

/// The outcome of an alignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Alignment<T = DerivedPoint> {
  Aligned(AlignedPair<T>),
  /// The series share no date. Both ranges are reported for diagnostics.
  NoOverlap {
    primary_range:    Option<DateRange>,
    comparison_range: Option<DateRange>,
  },
}

impl<T> Alignment<T> {
  pub fn aligned(&self) -> Option<&AlignedPair<T>> {
    match self {
      Self::Aligned(pair) => Some(pair),
      Self::NoOverlap { .. } => None,
    }
  }
}

/// Inner join of two date-ascending slices on date.
///
/// Each slice must hold at most one element per date.
pub fn align_points<T>(primary: &[T], comparison: &[T]) -> Alignment<T>
where
  T: Dated + Clone,
{
  let mut shared_primary = Vec::new();
  let mut shared_comparison = Vec::new();

  let (mut i, mut j) = (0, 0);
  while i < primary.len() && j < comparison.len() {
    match primary[i].date().cmp(&comparison[j].date()) {
      Ordering::Less => i += 1,
      Ordering::Greater => j += 1,
      Ordering::Equal => {
        shared_primary.push(primary[i].clone());
        shared_comparison.push(comparison[j].clone());
        i += 1;
        j += 1;
      }
    }
  }

  if shared_primary.is_empty() {
    return Alignment::NoOverlap {
      primary_range:    DateRange::of(primary),
      comparison_range: DateRange::of(comparison),
    };
  }

  Alignment::Aligned(AlignedPair {
    primary:    shared_primary,
    comparison: shared_comparison,
  })
}

/// Align two derived series on their common dates.
pub fn align(primary: &DerivedSeries, comparison: &DerivedSeries) -> Alignment {
  align_points(primary.points(), comparison.points())
}
