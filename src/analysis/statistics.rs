//! Descriptive statistics over a year series with gaps.

use crate::analysis::valid_values;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Summary of the valid observations of one series.
///
/// When `count` is 0 every numeric field is `None`. This is a regular result
/// (nothing could be observed), not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Population standard deviation (divides by N).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub percentile_10: Option<f64>,
    pub percentile_25: Option<f64>,
    pub percentile_75: Option<f64>,
    pub percentile_90: Option<f64>,
    pub count: usize,
}

/// Computes [`Statistics`] from `values`, ignoring missing entries.
///
/// Percentiles interpolate linearly between order statistics: rank `p` sits at
/// position `p / 100 * (N - 1)` of the sorted valid values.
///
/// # Examples
///
/// ```
/// use weather_probability::compute_statistics;
///
/// let stats = compute_statistics(&[Some(1.0), None, Some(3.0)]);
/// assert_eq!(stats.count, 2);
/// assert_eq!(stats.mean, Some(2.0));
/// assert_eq!(stats.median, Some(2.0));
/// ```
pub fn compute_statistics(values: &[Option<f64>]) -> Statistics {
    if values.is_empty() {
        warn!("Empty value series provided to compute_statistics");
        return Statistics::default();
    }

    let mut valid = valid_values(values);
    if valid.is_empty() {
        warn!("All {} values are missing in compute_statistics", values.len());
        return Statistics::default();
    }
    debug!("Computing statistics for {} valid values", valid.len());

    valid.sort_by(|a, b| a.total_cmp(b));
    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let variance = valid.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    Statistics {
        mean: Some(mean),
        median: Some(percentile_sorted(&valid, 50.0)),
        std: Some(variance.sqrt()),
        min: valid.first().copied(),
        max: valid.last().copied(),
        percentile_10: Some(percentile_sorted(&valid, 10.0)),
        percentile_25: Some(percentile_sorted(&valid, 25.0)),
        percentile_75: Some(percentile_sorted(&valid, 75.0)),
        percentile_90: Some(percentile_sorted(&valid, 90.0)),
        count: valid.len(),
    }
}

/// `sorted` must be non-empty and ascending.
fn percentile_sorted(sorted: &[f64], rank: f64) -> f64 {
    let last = sorted.len() - 1;
    let position = rank / 100.0 * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper || upper > last {
        return sorted[lower.min(last)];
    }
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
