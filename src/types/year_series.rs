//! Per-year observations of one variable, and the typed result a data source
//! returns for a single year.

use crate::types::location::GridPoint;
use crate::types::variable::WeatherVariable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a year has no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MissingReason {
    /// The source holds nothing for that date.
    NoData,
    /// A record exists but the needed fields are empty.
    EmptySelection,
    /// The day does not exist in that year (February 29).
    InvalidDate,
    /// The nearest grid point is farther away than allowed.
    OutOfRange { distance_km: f64 },
    /// Fetching failed; the error is kept as text.
    Failed { message: String },
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::NoData => write!(f, "no data"),
            MissingReason::EmptySelection => write!(f, "empty selection"),
            MissingReason::InvalidDate => write!(f, "date does not exist"),
            MissingReason::OutOfRange { distance_km } => {
                write!(f, "nearest grid point is {:.1} km away", distance_km)
            }
            MissingReason::Failed { message } => write!(f, "fetch failed: {}", message),
        }
    }
}

/// Outcome of fetching one variable for one year.
#[derive(Debug, Clone, PartialEq)]
pub enum YearValue {
    Present { value: f64, grid_point: GridPoint },
    Missing(MissingReason),
}

/// A year without a value, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingYear {
    pub year: i32,
    #[serde(flatten)]
    pub reason: MissingReason,
}

/// One variable's observations for a fixed day across a year range.
///
/// `years` and `values` are parallel and ascending by year. Years without a
/// value are kept in `missing`, never as placeholder entries.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    pub variable: WeatherVariable,
    years: Vec<i32>,
    values: Vec<f64>,
    missing: Vec<MissingYear>,
    grid_point: Option<GridPoint>,
}

impl YearSeries {
    /// Assembles a series from fetch results in any order.
    ///
    /// Results are sorted by year first. A present value that is not finite
    /// counts as [`MissingReason::EmptySelection`]. The grid point of the
    /// earliest present year is kept as the series' grid point.
    pub fn from_results(
        variable: WeatherVariable,
        results: impl IntoIterator<Item = (i32, YearValue)>,
    ) -> Self {
        let mut results: Vec<(i32, YearValue)> = results.into_iter().collect();
        results.sort_by_key(|(year, _)| *year);

        let mut series = Self {
            variable,
            years: Vec::with_capacity(results.len()),
            values: Vec::with_capacity(results.len()),
            missing: Vec::new(),
            grid_point: None,
        };
        for (year, result) in results {
            match result {
                YearValue::Present { value, .. } if !value.is_finite() => {
                    series.missing.push(MissingYear {
                        year,
                        reason: MissingReason::EmptySelection,
                    })
                }
                YearValue::Present { value, grid_point } => {
                    series.grid_point.get_or_insert(grid_point);
                    series.years.push(year);
                    series.values.push(value);
                }
                YearValue::Missing(reason) => series.missing.push(MissingYear { year, reason }),
            }
        }
        series
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn missing(&self) -> &[MissingYear] {
        &self.missing
    }

    pub fn missing_years(&self) -> Vec<i32> {
        self.missing.iter().map(|m| m.year).collect()
    }

    pub fn grid_point(&self) -> Option<GridPoint> {
        self.grid_point
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values as engine input; a value that is `NaN` still counts as missing there.
    pub fn observations(&self) -> Vec<Option<f64>> {
        self.values.iter().copied().map(Some).collect()
    }
}
