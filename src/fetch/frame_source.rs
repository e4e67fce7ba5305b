//! A [`GridDataSource`] over in-process polars frames.

use crate::analysis::geodesic::great_circle_km;
use crate::fetch::error::FetchError;
use crate::fetch::grid_frame::GridFrame;
use crate::fetch::source::GridDataSource;
use crate::types::location::LatLon;
use crate::types::variable::WeatherVariable;
use crate::types::year_series::{MissingReason, YearValue};
use async_trait::async_trait;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Default radius beyond which the nearest grid point is not accepted.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 100.0;

/// Serves each variable from its own [`GridFrame`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use weather_probability::{FrameDataSource, GridFrame, WeatherVariable};
///
/// # fn run() -> Result<(), weather_probability::FetchError> {
/// let source = FrameDataSource::builder()
///     .grids(vec![
///         GridFrame::from_parquet(WeatherVariable::Temperature, Path::new("data/t2m.parquet"))?,
///         GridFrame::from_csv(WeatherVariable::Precipitation, Path::new("data/imerg.csv"))?,
///     ])
///     .max_distance_km(75.0)
///     .build();
/// assert!(source.has_variable(WeatherVariable::Temperature));
/// # Ok(())
/// # }
/// ```
pub struct FrameDataSource {
    grids: HashMap<WeatherVariable, Arc<GridFrame>>,
    max_distance_km: f64,
}

#[bon]
impl FrameDataSource {
    /// Creates a source from one grid per variable; a later grid for the same
    /// variable replaces an earlier one.
    #[builder]
    pub fn new(grids: Vec<GridFrame>, max_distance_km: Option<f64>) -> Self {
        let grids = grids
            .into_iter()
            .map(|grid| (grid.variable(), Arc::new(grid)))
            .collect();
        Self {
            grids,
            max_distance_km: max_distance_km.unwrap_or(DEFAULT_MAX_DISTANCE_KM),
        }
    }

    pub fn has_variable(&self, variable: WeatherVariable) -> bool {
        self.grids.contains_key(&variable)
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }
}

#[async_trait]
impl GridDataSource for FrameDataSource {
    async fn initialize(&self) -> Result<(), FetchError> {
        let mut variables: Vec<_> = self.grids.keys().map(|v| v.as_str()).collect();
        variables.sort_unstable();
        info!("Frame data source ready for {}", variables.join(", "));
        Ok(())
    }

    async fn fetch_year(
        &self,
        variable: WeatherVariable,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<YearValue, FetchError> {
        let grid = self
            .grids
            .get(&variable)
            .cloned()
            .ok_or(FetchError::NoGridForVariable(variable))?;
        let point = grid.nearest(location).ok_or(FetchError::EmptyGrid(variable))?;

        let distance_km = great_circle_km(location.0, location.1, point.lat, point.lon);
        if distance_km > self.max_distance_km {
            warn!(
                "Nearest {} grid point {:?} is {:.1} km from {:?}",
                variable, point, distance_km, location
            );
            return Ok(YearValue::Missing(MissingReason::OutOfRange { distance_km }));
        }

        tokio::task::spawn_blocking(move || grid.value_at(point, date)).await?
    }
}
