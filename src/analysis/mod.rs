//! Pure engines over one variable's yearly observations.
//!
//! Every function here takes missing observations as `None` (a `NaN` inside
//! `Some` is treated the same way) and never holds state between calls.

pub mod error;
pub mod geodesic;
pub mod probability;
pub mod statistics;
pub mod trend;

/// Drops missing entries, keeping the input order of the rest.
pub(crate) fn valid_values(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| v.filter(|x| !x.is_nan()))
        .collect()
}
