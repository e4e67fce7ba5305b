//! Ordinary least squares trend across years.

use crate::analysis::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slopes smaller than this (in units per year) are reported as stable.
pub const STABLE_SLOPE: f64 = 0.01;
/// Fits explaining less variance than this are reported as stable.
pub const MIN_R_SQUARED: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Stable,
    Increasing,
    Decreasing,
}

impl TrendDirection {
    fn classify(slope: f64, r_squared: f64) -> Self {
        if slope.abs() < STABLE_SLOPE || r_squared < MIN_R_SQUARED {
            TrendDirection::Stable
        } else if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendDirection::Stable => "stable",
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        };
        write!(f, "{}", s)
    }
}

/// Linear fit `value = slope * year + intercept`. All fields are `None` when
/// fewer than two valid points were available.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendResult {
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub r_squared: Option<f64>,
    pub trend_direction: Option<TrendDirection>,
    /// Change from the first to the last valid value, in percent.
    pub percent_change: Option<f64>,
}

/// Fits a least squares line through the valid `(year, value)` pairs.
///
/// `values` and `years` are parallel; a missing value drops its year too.
/// `percent_change` compares the first and last valid values in input order,
/// so callers should pass the series sorted by year.
///
/// # Errors
///
/// Returns [`AnalysisError::LengthMismatch`] when the two slices differ in length.
///
/// # Examples
///
/// ```
/// use weather_probability::{compute_trend, TrendDirection};
///
/// let values = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
/// let trend = compute_trend(&values, &[2020, 2021, 2022, 2023, 2024]).unwrap();
/// assert_eq!(trend.slope, Some(1.0));
/// assert_eq!(trend.trend_direction, Some(TrendDirection::Increasing));
/// assert_eq!(trend.percent_change, Some(400.0));
/// ```
pub fn compute_trend(values: &[Option<f64>], years: &[i32]) -> Result<TrendResult, AnalysisError> {
    if values.len() != years.len() {
        return Err(AnalysisError::LengthMismatch {
            values: values.len(),
            years: years.len(),
        });
    }

    let points: Vec<(f64, f64)> = values
        .iter()
        .zip(years)
        .filter_map(|(v, &year)| {
            v.filter(|x| !x.is_nan())
                .map(|value| (f64::from(year), value))
        })
        .collect();
    if points.len() < 2 {
        return Ok(TrendResult::default());
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });
    // every valid point in the same year: no line through them
    if sxx == 0.0 {
        return Ok(TrendResult::default());
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    let first = points[0].1;
    let last = points[points.len() - 1].1;
    let percent_change = if first == 0.0 {
        None
    } else {
        Some((last - first) / first * 100.0)
    };

    Ok(TrendResult {
        slope: Some(slope),
        intercept: Some(intercept),
        r_squared: Some(r_squared),
        trend_direction: Some(TrendDirection::classify(slope, r_squared)),
        percent_change,
    })
}
