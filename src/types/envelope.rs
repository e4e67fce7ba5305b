//! The response assembled for one query.

use crate::analysis::geodesic::{compute_grid_offset, GridOffset};
use crate::analysis::probability::ProbabilityResult;
use crate::analysis::statistics::Statistics;
use crate::analysis::trend::TrendResult;
use crate::types::location::{GridPoint, Location};
use crate::types::variable::{DataSource, WeatherVariable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything returned for one query: what was asked, the data per variable,
/// and where the data came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    pub query_info: QueryInfo,
    pub historical_data: BTreeMap<WeatherVariable, VariableData>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryInfo {
    pub requested_location: Location,
    pub actual_grid_points: BTreeMap<WeatherVariable, GridPointInfo>,
    /// e.g. `"August 15"`.
    pub day_of_year: String,
    pub years_analyzed: usize,
    /// e.g. `"1995-2024"`.
    pub data_period: String,
    /// Years without data, per variable. Omitted when every year was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_data: Option<BTreeMap<WeatherVariable, Vec<i32>>>,
}

/// The grid point a variable was actually sampled at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPointInfo {
    pub lat: f64,
    pub lon: f64,
    pub dataset: String,
    pub offset: GridOffset,
}

impl GridPointInfo {
    pub fn new(requested: &Location, actual: GridPoint, variable: WeatherVariable) -> Self {
        Self {
            lat: actual.lat,
            lon: actual.lon,
            dataset: variable.grid_dataset().to_string(),
            offset: compute_grid_offset(requested.lat, requested.lon, actual.lat, actual.lon),
        }
    }
}

/// Values and derived results of one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableData {
    pub values: Vec<f64>,
    pub years: Vec<i32>,
    pub statistics: Statistics,
    pub probabilities: ProbabilityResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub data_sources: BTreeMap<WeatherVariable, DataSource>,
    pub units: BTreeMap<WeatherVariable, String>,
}

impl Metadata {
    /// Provenance and units of the given variables.
    pub fn for_variables(variables: &[WeatherVariable]) -> Self {
        Self {
            data_sources: variables.iter().map(|v| (*v, v.data_source())).collect(),
            units: variables.iter().map(|v| (*v, v.unit().to_string())).collect(),
        }
    }
}
