//! A gridded dataset for one variable, held as a polars `LazyFrame`.

use crate::fetch::conversions::derive_value;
use crate::fetch::error::FetchError;
use crate::types::location::{GridPoint, LatLon};
use crate::types::variable::WeatherVariable;
use crate::types::year_series::{MissingReason, YearValue};
use chrono::NaiveDate;
use log::{debug, info};
use ordered_float::OrderedFloat;
use polars::prelude::*;
use rstar::RTree;
use std::collections::HashSet;
use std::path::Path;

pub const LAT_COLUMN: &str = "lat";
pub const LON_COLUMN: &str = "lon";
pub const DATE_COLUMN: &str = "date";
pub const HOUR_COLUMN: &str = "hour";

/// Rows of `lat`, `lon`, `date` (plus `hour` for hourly collections) and the
/// variable's raw columns, indexed by their distinct grid points.
pub struct GridFrame {
    variable: WeatherVariable,
    frame: LazyFrame,
    grid: RTree<GridPoint>,
}

impl GridFrame {
    /// Wraps `frame` and indexes its grid points.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingColumn`] if a required column is absent,
    /// [`FetchError::EmptyGrid`] if the frame has no coordinates, and
    /// [`FetchError::PolarsError`] if the frame cannot be evaluated.
    pub fn new(variable: WeatherVariable, frame: LazyFrame) -> Result<Self, FetchError> {
        let polars_err = |source: PolarsError| FetchError::PolarsError { variable, source };

        let header = frame.clone().limit(0).collect().map_err(polars_err)?;
        let present = header.get_column_names();
        for column in Self::required_columns(variable) {
            if !present.iter().any(|name| name.as_str() == column) {
                return Err(FetchError::MissingColumn {
                    variable,
                    column: column.to_string(),
                });
            }
        }

        let coordinates = frame
            .clone()
            .select([
                col(LAT_COLUMN).cast(DataType::Float64),
                col(LON_COLUMN).cast(DataType::Float64),
            ])
            .collect()
            .map_err(polars_err)?;
        let lats = coordinates
            .column(LAT_COLUMN)
            .and_then(|c| c.f64())
            .map_err(polars_err)?;
        let lons = coordinates
            .column(LON_COLUMN)
            .and_then(|c| c.f64())
            .map_err(polars_err)?;

        let mut seen = HashSet::new();
        let points: Vec<GridPoint> = lats
            .into_iter()
            .zip(lons)
            .filter_map(|(lat, lon)| Some(GridPoint::new(lat?, lon?)))
            .filter(|p| seen.insert((OrderedFloat(p.lat), OrderedFloat(p.lon))))
            .collect();
        if points.is_empty() {
            return Err(FetchError::EmptyGrid(variable));
        }
        info!("Indexed {} grid points for {}", points.len(), variable);

        Ok(Self {
            variable,
            frame,
            grid: RTree::bulk_load(points),
        })
    }

    /// Lazily scans a parquet file.
    pub fn from_parquet(variable: WeatherVariable, path: &Path) -> Result<Self, FetchError> {
        let frame = LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| FetchError::ParquetScan(path.to_path_buf(), e))?;
        Self::new(variable, frame)
    }

    /// Lazily reads a CSV file with a header row; `date` values are parsed as dates.
    pub fn from_csv(variable: WeatherVariable, path: &Path) -> Result<Self, FetchError> {
        let frame = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_try_parse_dates(true)
            .finish()
            .map_err(|e| FetchError::CsvRead(path.to_path_buf(), e))?;
        Self::new(variable, frame)
    }

    fn required_columns(variable: WeatherVariable) -> Vec<&'static str> {
        let mut columns = vec![LAT_COLUMN, LON_COLUMN, DATE_COLUMN];
        if variable.sample_hour().is_some() {
            columns.push(HOUR_COLUMN);
        }
        columns.extend_from_slice(variable.raw_columns());
        columns
    }

    pub fn variable(&self) -> WeatherVariable {
        self.variable
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    /// The grid point closest to `location` in degree space.
    pub fn nearest(&self, location: LatLon) -> Option<GridPoint> {
        self.grid.nearest_neighbor(&[location.0, location.1]).copied()
    }

    /// Reads and converts the value at `point` on `date`. Blocks while polars
    /// evaluates the frame.
    pub fn value_at(&self, point: GridPoint, date: NaiveDate) -> Result<YearValue, FetchError> {
        let variable = self.variable;
        let polars_err = |source: PolarsError| FetchError::PolarsError { variable, source };

        let mut predicate = col(LAT_COLUMN)
            .cast(DataType::Float64)
            .eq(lit(point.lat))
            .and(col(LON_COLUMN).cast(DataType::Float64).eq(lit(point.lon)))
            .and(col(DATE_COLUMN).eq(lit(date)));
        if let Some(hour) = variable.sample_hour() {
            predicate = predicate.and(
                col(HOUR_COLUMN)
                    .cast(DataType::Int64)
                    .eq(lit(i64::from(hour))),
            );
        }
        let raw_columns = variable.raw_columns();
        let selection: Vec<Expr> = raw_columns
            .iter()
            .map(|c| col(*c).cast(DataType::Float64))
            .collect();

        let df = self
            .frame
            .clone()
            .filter(predicate)
            .select(selection)
            .limit(1)
            .collect()
            .map_err(polars_err)?;
        if df.height() == 0 {
            debug!("No {} row at {:?} on {}", variable, point, date);
            return Ok(YearValue::Missing(MissingReason::NoData));
        }

        let raw = raw_columns
            .iter()
            .map(|c| {
                df.column(c)
                    .and_then(|s| s.f64())
                    .map(|values| values.get(0))
                    .map_err(polars_err)
            })
            .collect::<Result<Vec<Option<f64>>, FetchError>>()?;

        Ok(match derive_value(variable, &raw) {
            Some(value) => YearValue::Present {
                value,
                grid_point: point,
            },
            None => YearValue::Missing(MissingReason::EmptySelection),
        })
    }
}
