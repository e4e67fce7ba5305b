use crate::analysis::probability::ThresholdSet;
use crate::types::day_of_year::{DayOfYear, YearRange};
use crate::types::location::Location;
use crate::types::variable::WeatherVariable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A historical query: one location, one calendar day, a range of years.
///
/// Deserializes from the request body shape:
///
/// ```
/// use weather_probability::{WeatherQuery, WeatherVariable};
///
/// let query: WeatherQuery = serde_json::from_str(r#"{
///     "location": {"lat": -0.4197, "lon": 36.9489, "name": "Nyeri, Kenya"},
///     "day_of_year": {"month": 8, "day": 15},
///     "historical_years": {"start_year": 2000, "end_year": 2020},
///     "variables": ["temperature", "precipitation"],
///     "thresholds": {"temperature": {"hot": 35, "cold": 5}}
/// }"#).unwrap();
/// assert_eq!(query.variables[1], WeatherVariable::Precipitation);
/// assert_eq!(query.historical_years.len(), 21);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub location: Location,
    pub day_of_year: DayOfYear,
    pub historical_years: YearRange,
    pub variables: Vec<WeatherVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<BTreeMap<WeatherVariable, ThresholdSet>>,
}

impl WeatherQuery {
    /// Thresholds given for `variable`, if any.
    pub fn thresholds_for(&self, variable: WeatherVariable) -> Option<&ThresholdSet> {
        self.thresholds.as_ref()?.get(&variable)
    }

    /// Requested variables with duplicates removed, first occurrence kept.
    pub fn distinct_variables(&self) -> Vec<WeatherVariable> {
        let mut seen = Vec::with_capacity(self.variables.len());
        for variable in &self.variables {
            if !seen.contains(variable) {
                seen.push(*variable);
            }
        }
        seen
    }
}
