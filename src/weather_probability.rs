//! The query service: fetches one day across a range of years for each
//! requested variable and runs the statistics, probability and trend engines
//! over the result.

use crate::analysis::error::AnalysisError;
use crate::analysis::probability::{compute_probabilities, ThresholdSet};
use crate::analysis::statistics::compute_statistics;
use crate::analysis::trend::compute_trend;
use crate::error::WeatherProbabilityError;
use crate::fetch::source::GridDataSource;
use crate::types::day_of_year::{DayOfYear, YearRange};
use crate::types::envelope::{GridPointInfo, Metadata, QueryEnvelope, QueryInfo, VariableData};
use crate::types::location::{LatLon, Location};
use crate::types::query::WeatherQuery;
use crate::types::variable::WeatherVariable;
use crate::types::year_series::{MissingReason, YearSeries, YearValue};
use bon::bon;
use futures_util::future::join_all;
use futures_util::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Answers historical weather queries against a [`GridDataSource`].
///
/// Build it with [`WeatherProbability::builder()`], which also initializes the
/// source, and release the source again with [`WeatherProbability::close`].
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use polars::prelude::*;
/// use std::sync::Arc;
/// use weather_probability::{
///     DayOfYear, FrameDataSource, GridFrame, LatLon, ThresholdSet, WeatherProbability,
///     WeatherVariable, YearRange,
/// };
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let day = |year| NaiveDate::from_ymd_opt(year, 8, 15).unwrap();
/// let rain = df!(
///     "lat" => [-0.5, -0.5, -0.5],
///     "lon" => [36.875, 36.875, 36.875],
///     "date" => [day(2018), day(2019), day(2020)],
///     "precipitation" => [0.0, 2.5, 14.0],
/// )?
/// .lazy();
/// let source = FrameDataSource::builder()
///     .grids(vec![GridFrame::new(WeatherVariable::Precipitation, rain)?])
///     .build();
///
/// let service = WeatherProbability::builder()
///     .source(Arc::new(source))
///     .build()
///     .await?;
/// let envelope = service
///     .query()
///     .location(LatLon(-0.4197, 36.9489))
///     .day_of_year(DayOfYear::new(8, 15)?)
///     .years(YearRange::new(2018, 2020)?)
///     .variables(vec![WeatherVariable::Precipitation])
///     .thresholds([(WeatherVariable::Precipitation, ThresholdSet::from_named([("wet", 10.0)]))].into())
///     .call()
///     .await?;
///
/// let rain = &envelope.historical_data[&WeatherVariable::Precipitation];
/// assert_eq!(rain.statistics.count, 3);
/// assert_eq!(rain.probabilities["above_10"], 1.0 / 3.0);
/// service.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct WeatherProbability {
    source: Arc<dyn GridDataSource>,
    include_trend: bool,
    max_concurrent_fetches: Option<usize>,
}

#[bon]
impl WeatherProbability {
    /// Creates the service and initializes `source`.
    ///
    /// # Arguments
    ///
    /// * `.source(Arc<dyn GridDataSource>)`: **Required.** Where per-year values come from.
    /// * `.include_trend(bool)`: Optional. Whether each variable gets a trend. Defaults to `true`.
    /// * `.max_concurrent_fetches(usize)`: Optional. Upper bound on in-flight year
    ///   fetches per variable. Defaults to one fetch per year, all at once.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherProbabilityError::Fetch`] if the source fails to initialize.
    #[builder]
    pub async fn new(
        source: Arc<dyn GridDataSource>,
        include_trend: Option<bool>,
        max_concurrent_fetches: Option<usize>,
    ) -> Result<Self, WeatherProbabilityError> {
        source.initialize().await?;
        Ok(Self {
            source,
            include_trend: include_trend.unwrap_or(true),
            max_concurrent_fetches,
        })
    }

    /// Runs a query assembled through the builder.
    ///
    /// * `.location(LatLon)`: **Required.**
    /// * `.location_name(String)`: Optional label echoed back in the response.
    /// * `.day_of_year(DayOfYear)`: **Required.**
    /// * `.years(YearRange)`: **Required.** Inclusive on both ends.
    /// * `.variables(Vec<WeatherVariable>)`: **Required.** Duplicates are ignored.
    /// * `.thresholds(BTreeMap<WeatherVariable, ThresholdSet>)`: Optional. Variables
    ///   without thresholds get an empty probability map.
    ///
    /// # Errors
    ///
    /// See [`WeatherProbability::execute`].
    #[builder]
    pub async fn query(
        &self,
        location: LatLon,
        location_name: Option<String>,
        day_of_year: DayOfYear,
        years: YearRange,
        variables: Vec<WeatherVariable>,
        thresholds: Option<BTreeMap<WeatherVariable, ThresholdSet>>,
    ) -> Result<QueryEnvelope, WeatherProbabilityError> {
        let query = WeatherQuery {
            location: Location::new(location, location_name),
            day_of_year,
            historical_years: years,
            variables,
            thresholds,
        };
        self.execute(&query).await
    }

    /// Runs a query, e.g. one deserialized from a request body.
    ///
    /// Years the source has nothing for, years where fetching failed, and
    /// February 29 in common years all end up in `missing_data`; none of them
    /// fail the query.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherProbabilityError::NoVariables`] if no variable was requested.
    pub async fn execute(
        &self,
        query: &WeatherQuery,
    ) -> Result<QueryEnvelope, WeatherProbabilityError> {
        let variables = query.distinct_variables();
        if variables.is_empty() {
            return Err(WeatherProbabilityError::NoVariables);
        }
        info!(
            "Querying {} variable(s) at ({}, {}) for {} over {}",
            variables.len(),
            query.location.lat,
            query.location.lon,
            query.day_of_year,
            query.historical_years
        );

        let all_series = join_all(
            variables
                .iter()
                .map(|&variable| self.fetch_series(query, variable)),
        )
        .await;

        let mut actual_grid_points = BTreeMap::new();
        let mut missing_data = BTreeMap::new();
        let mut historical_data = BTreeMap::new();
        for series in &all_series {
            let variable = series.variable;
            if let Some(point) = series.grid_point() {
                actual_grid_points.insert(
                    variable,
                    GridPointInfo::new(&query.location, point, variable),
                );
            }
            if !series.missing().is_empty() {
                missing_data.insert(variable, series.missing_years());
            }
            historical_data.insert(
                variable,
                self.analyze(series, query.thresholds_for(variable))?,
            );
        }

        Ok(QueryEnvelope {
            query_info: QueryInfo {
                requested_location: query.location.clone(),
                actual_grid_points,
                day_of_year: query.day_of_year.to_string(),
                years_analyzed: query.historical_years.len(),
                data_period: query.historical_years.to_string(),
                missing_data: (!missing_data.is_empty()).then_some(missing_data),
            },
            historical_data,
            metadata: Metadata::for_variables(&variables),
        })
    }

    /// Shuts the source down.
    pub async fn close(self) -> Result<(), WeatherProbabilityError> {
        self.source.shutdown().await?;
        Ok(())
    }

    async fn fetch_series(&self, query: &WeatherQuery, variable: WeatherVariable) -> YearSeries {
        let location = query.location.coordinate();
        let years = query.historical_years;
        let limit = self.max_concurrent_fetches.unwrap_or(years.len()).max(1);

        let results: Vec<(i32, YearValue)> = stream::iter(years.years())
            .map(|year| self.fetch_year(variable, location, query.day_of_year, year))
            .buffer_unordered(limit)
            .collect()
            .await;

        let series = YearSeries::from_results(variable, results);
        debug!(
            "{}: {} of {} years present",
            variable,
            series.values().len(),
            years.len()
        );
        series
    }

    async fn fetch_year(
        &self,
        variable: WeatherVariable,
        location: LatLon,
        day_of_year: DayOfYear,
        year: i32,
    ) -> (i32, YearValue) {
        let Some(date) = day_of_year.in_year(year) else {
            debug!("{} does not exist in {}", day_of_year, year);
            return (year, YearValue::Missing(MissingReason::InvalidDate));
        };
        match self.source.fetch_year(variable, location, date).await {
            Ok(value) => (year, value),
            Err(e) => {
                warn!("Fetching {} for {} failed: {}", variable, date, e);
                (
                    year,
                    YearValue::Missing(MissingReason::Failed {
                        message: e.to_string(),
                    }),
                )
            }
        }
    }

    fn analyze(
        &self,
        series: &YearSeries,
        thresholds: Option<&ThresholdSet>,
    ) -> Result<VariableData, AnalysisError> {
        let observations = series.observations();
        let trend = if self.include_trend {
            Some(compute_trend(&observations, series.years())?)
        } else {
            None
        };
        Ok(VariableData {
            values: series.values().to_vec(),
            years: series.years().to_vec(),
            statistics: compute_statistics(&observations),
            probabilities: thresholds
                .map(|t| compute_probabilities(&observations, t))
                .unwrap_or_default(),
            trend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::trend::TrendDirection;
    use crate::fetch::error::FetchError;
    use crate::fetch::frame_source::FrameDataSource;
    use crate::fetch::grid_frame::GridFrame;
    use crate::types::location::GridPoint;
    use async_trait::async_trait;
    use chrono::{Datelike, NaiveDate};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    const NYERI: LatLon = LatLon(-0.4197, 36.9489);

    fn grid_point() -> GridPoint {
        GridPoint::new(-0.5, 36.875)
    }

    #[derive(Default)]
    struct MockSource {
        values: HashMap<(WeatherVariable, i32), f64>,
        failing: Vec<(WeatherVariable, i32)>,
        initialized: AtomicBool,
        shut_down: AtomicBool,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl MockSource {
        fn with_values(values: &[(WeatherVariable, i32, f64)]) -> Self {
            Self {
                values: values.iter().map(|&(v, y, x)| ((v, y), x)).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl GridDataSource for MockSource {
        async fn initialize(&self) -> Result<(), FetchError> {
            self.initialized.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn fetch_year(
            &self,
            variable: WeatherVariable,
            _location: LatLon,
            date: NaiveDate,
        ) -> Result<YearValue, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            // later years finish first
            let year = date.year();
            let delay = (2100 - year).rem_euclid(10) as u64;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(&(variable, year)) {
                return Err(FetchError::Source(format!("timeout for {year}")));
            }
            Ok(match self.values.get(&(variable, year)) {
                Some(&value) => YearValue::Present {
                    value,
                    grid_point: grid_point(),
                },
                None => YearValue::Missing(MissingReason::NoData),
            })
        }

        async fn shutdown(&self) -> Result<(), FetchError> {
            self.shut_down.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn sample_source() -> MockSource {
        let mut source = MockSource::with_values(&[
            (WeatherVariable::Temperature, 2000, 20.0),
            (WeatherVariable::Temperature, 2001, 21.0),
            (WeatherVariable::Temperature, 2003, 23.0),
            (WeatherVariable::Temperature, 2004, 24.0),
            (WeatherVariable::Precipitation, 2000, 0.0),
            (WeatherVariable::Precipitation, 2001, 3.0),
            (WeatherVariable::Precipitation, 2002, 5.0),
            (WeatherVariable::Precipitation, 2003, 5.0),
            (WeatherVariable::Precipitation, 2004, 10.0),
        ]);
        source.failing = vec![(WeatherVariable::Precipitation, 2001)];
        source
    }

    #[tokio::test]
    async fn test_lifecycle_reaches_the_source() -> Result<(), WeatherProbabilityError> {
        let source = Arc::new(MockSource::default());
        let service = WeatherProbability::builder()
            .source(source.clone())
            .build()
            .await?;
        assert!(source.initialized.load(Ordering::SeqCst));
        assert!(!source.shut_down.load(Ordering::SeqCst));
        service.close().await?;
        assert!(source.shut_down.load(Ordering::SeqCst));
        Ok(())
    }

    #[tokio::test]
    async fn test_query_builds_full_envelope() -> Result<(), Box<dyn std::error::Error>> {
        let service = WeatherProbability::builder()
            .source(Arc::new(sample_source()))
            .build()
            .await?;

        let envelope = service
            .query()
            .location(NYERI)
            .location_name("Nyeri, Kenya".to_string())
            .day_of_year(DayOfYear::new(8, 15)?)
            .years(YearRange::new(2000, 2004)?)
            .variables(vec![
                WeatherVariable::Temperature,
                WeatherVariable::Precipitation,
                WeatherVariable::Temperature,
            ])
            .thresholds(BTreeMap::from([(
                WeatherVariable::Temperature,
                ThresholdSet::from_named([("hot", 23.0), ("cold", 21.0)]),
            )]))
            .call()
            .await?;

        let info = &envelope.query_info;
        assert_eq!(info.requested_location.name.as_deref(), Some("Nyeri, Kenya"));
        assert_eq!(info.day_of_year, "August 15");
        assert_eq!(info.years_analyzed, 5);
        assert_eq!(info.data_period, "2000-2004");
        let missing = info.missing_data.as_ref().ok_or("missing_data absent")?;
        assert_eq!(missing[&WeatherVariable::Temperature], vec![2002]);
        assert_eq!(missing[&WeatherVariable::Precipitation], vec![2001]);
        let grid = &info.actual_grid_points[&WeatherVariable::Temperature];
        assert_eq!((grid.lat, grid.lon), (-0.5, 36.875));
        assert_eq!(grid.dataset, "MERRA-2 M2SDNXSLV");

        let temperature = &envelope.historical_data[&WeatherVariable::Temperature];
        assert_eq!(temperature.years, vec![2000, 2001, 2003, 2004]);
        assert_eq!(temperature.values, vec![20.0, 21.0, 23.0, 24.0]);
        assert_eq!(temperature.statistics.count, 4);
        assert_eq!(temperature.statistics.mean, Some(22.0));
        assert_eq!(temperature.probabilities["above_23"], 0.25);
        assert_eq!(temperature.probabilities["below_21"], 0.25);
        let trend = temperature.trend.as_ref().ok_or("trend absent")?;
        assert_eq!(trend.trend_direction, Some(TrendDirection::Increasing));
        assert!((trend.slope.ok_or("no slope")? - 1.0).abs() < 1e-9);
        assert!((trend.percent_change.ok_or("no change")? - 20.0).abs() < 1e-9);

        let precipitation = &envelope.historical_data[&WeatherVariable::Precipitation];
        assert_eq!(precipitation.years, vec![2000, 2002, 2003, 2004]);
        assert!(precipitation.probabilities.is_empty());
        assert_eq!(precipitation.statistics.median, Some(5.0));

        assert_eq!(envelope.historical_data.len(), 2);
        assert_eq!(envelope.metadata.units[&WeatherVariable::Precipitation], "mm/day");

        let json = serde_json::to_value(&envelope)?;
        assert_eq!(json["query_info"]["missing_data"]["temperature"][0], 2002);
        assert_eq!(
            json["historical_data"]["temperature"]["trend"]["trend_direction"],
            "increasing"
        );
        assert_eq!(json["metadata"]["units"]["temperature"], "celsius");
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_years_do_not_fail_the_query() -> Result<(), Box<dyn std::error::Error>> {
        let mut source = MockSource::with_values(&[(WeatherVariable::WindSpeed, 2010, 4.0)]);
        source.failing = vec![(WeatherVariable::WindSpeed, 2011)];
        let service = WeatherProbability::builder()
            .source(Arc::new(source))
            .build()
            .await?;

        let envelope = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(1, 1)?)
            .years(YearRange::new(2010, 2011)?)
            .variables(vec![WeatherVariable::WindSpeed])
            .call()
            .await?;
        let wind = &envelope.historical_data[&WeatherVariable::WindSpeed];
        assert_eq!(wind.values, vec![4.0]);
        assert_eq!(
            envelope.query_info.missing_data,
            Some(BTreeMap::from([(WeatherVariable::WindSpeed, vec![2011])]))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_leap_day_is_missing_in_common_years() -> Result<(), Box<dyn std::error::Error>> {
        let source = Arc::new(MockSource::with_values(&[(
            WeatherVariable::Humidity,
            2020,
            71.0,
        )]));
        let service = WeatherProbability::builder()
            .source(source.clone())
            .build()
            .await?;

        let envelope = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(2, 29)?)
            .years(YearRange::new(2019, 2021)?)
            .variables(vec![WeatherVariable::Humidity])
            .call()
            .await?;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(envelope.query_info.day_of_year, "February 29");
        assert_eq!(
            envelope.historical_data[&WeatherVariable::Humidity].years,
            vec![2020]
        );
        assert_eq!(
            envelope.query_info.missing_data,
            Some(BTreeMap::from([(WeatherVariable::Humidity, vec![2019, 2021])]))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_variable_without_data_is_reported_empty() -> Result<(), Box<dyn std::error::Error>>
    {
        let service = WeatherProbability::builder()
            .source(Arc::new(MockSource::default()))
            .build()
            .await?;

        let envelope = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(8, 15)?)
            .years(YearRange::new(2000, 2002)?)
            .variables(vec![WeatherVariable::Precipitation])
            .call()
            .await?;
        let rain = &envelope.historical_data[&WeatherVariable::Precipitation];
        assert!(rain.values.is_empty());
        assert_eq!(rain.statistics.count, 0);
        assert_eq!(rain.statistics.mean, None);
        assert_eq!(rain.trend.as_ref().and_then(|t| t.slope), None);
        assert!(envelope.query_info.actual_grid_points.is_empty());
        assert_eq!(
            envelope.query_info.missing_data,
            Some(BTreeMap::from([(
                WeatherVariable::Precipitation,
                vec![2000, 2001, 2002]
            )]))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_no_variables_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let service = WeatherProbability::builder()
            .source(Arc::new(MockSource::default()))
            .build()
            .await?;
        let result = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(8, 15)?)
            .years(YearRange::new(2000, 2002)?)
            .variables(vec![])
            .call()
            .await;
        assert!(matches!(result, Err(WeatherProbabilityError::NoVariables)));
        Ok(())
    }

    #[tokio::test]
    async fn test_trend_can_be_disabled() -> Result<(), Box<dyn std::error::Error>> {
        let service = WeatherProbability::builder()
            .source(Arc::new(sample_source()))
            .include_trend(false)
            .build()
            .await?;
        let envelope = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(8, 15)?)
            .years(YearRange::new(2000, 2004)?)
            .variables(vec![WeatherVariable::Temperature])
            .call()
            .await?;
        let temperature = &envelope.historical_data[&WeatherVariable::Temperature];
        assert!(temperature.trend.is_none());
        let json = serde_json::to_value(&envelope)?;
        assert!(json["historical_data"]["temperature"].get("trend").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrency_limit_is_respected() -> Result<(), Box<dyn std::error::Error>> {
        let values: Vec<_> = (2000..2010)
            .map(|year| (WeatherVariable::Temperature, year, f64::from(year - 2000)))
            .collect();
        let source = Arc::new(MockSource::with_values(&values));
        let service = WeatherProbability::builder()
            .source(source.clone())
            .max_concurrent_fetches(1)
            .build()
            .await?;

        let envelope = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(8, 15)?)
            .years(YearRange::new(2000, 2009)?)
            .variables(vec![WeatherVariable::Temperature])
            .call()
            .await?;
        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 10);
        assert_eq!(
            envelope.historical_data[&WeatherVariable::Temperature].years,
            (2000..2010).collect::<Vec<_>>()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_order_fetches_are_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let values: Vec<_> = (2000..2010)
            .map(|year| (WeatherVariable::Temperature, year, f64::from(year - 2000)))
            .collect();
        let service = WeatherProbability::builder()
            .source(Arc::new(MockSource::with_values(&values)))
            .build()
            .await?;

        let envelope = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(8, 15)?)
            .years(YearRange::new(2000, 2009)?)
            .variables(vec![WeatherVariable::Temperature])
            .call()
            .await?;
        let temperature = &envelope.historical_data[&WeatherVariable::Temperature];
        assert_eq!(temperature.years, (2000..2010).collect::<Vec<_>>());
        assert_eq!(
            temperature.values,
            (0..10).map(f64::from).collect::<Vec<_>>()
        );
        let trend = temperature.trend.as_ref().ok_or("trend absent")?;
        assert!((trend.slope.ok_or("no slope")? - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_deserialized_request() -> Result<(), Box<dyn std::error::Error>> {
        let query: WeatherQuery = serde_json::from_str(
            r#"{
                "location": {"lat": -0.4197, "lon": 36.9489},
                "day_of_year": {"month": 8, "day": 15},
                "historical_years": {"start_year": 2000, "end_year": 2004},
                "variables": ["temperature"],
                "thresholds": {"temperature": {"hot": 22}}
            }"#,
        )?;
        let service = WeatherProbability::builder()
            .source(Arc::new(sample_source()))
            .build()
            .await?;
        let envelope = service.execute(&query).await?;
        let temperature = &envelope.historical_data[&WeatherVariable::Temperature];
        assert_eq!(temperature.probabilities["above_22"], 0.5);
        Ok(())
    }

    #[tokio::test]
    async fn test_end_to_end_with_frame_source() -> Result<(), Box<dyn std::error::Error>> {
        use polars::prelude::*;

        let day = |year| NaiveDate::from_ymd_opt(year, 8, 15).ok_or("bad date");
        let frame = df!(
            "lat" => [-0.5, -0.5, -0.5, 50.0],
            "lon" => [36.875, 36.875, 36.875, 5.0],
            "date" => [day(2020)?, day(2021)?, day(2022)?, day(2020)?],
            "T2MMEAN" => [290.15, 291.15, 292.15, 280.0],
        )?
        .lazy();
        let source = FrameDataSource::builder()
            .grids(vec![GridFrame::new(WeatherVariable::Temperature, frame)?])
            .build();
        let service = WeatherProbability::builder()
            .source(Arc::new(source))
            .build()
            .await?;

        let envelope = service
            .query()
            .location(NYERI)
            .day_of_year(DayOfYear::new(8, 15)?)
            .years(YearRange::new(2020, 2023)?)
            .variables(vec![WeatherVariable::Temperature, WeatherVariable::Humidity])
            .call()
            .await?;

        let temperature = &envelope.historical_data[&WeatherVariable::Temperature];
        assert_eq!(temperature.years, vec![2020, 2021, 2022]);
        let mean = temperature.statistics.mean.ok_or("no mean")?;
        assert!((mean - 18.0).abs() < 1e-9, "{mean}");
        let grid = &envelope.query_info.actual_grid_points[&WeatherVariable::Temperature];
        assert_eq!((grid.lat, grid.lon), (-0.5, 36.875));
        assert!(grid.offset.offset_km < 15.0);

        // no humidity grid loaded, so every year failed
        let missing = envelope.query_info.missing_data.as_ref().ok_or("missing_data absent")?;
        assert_eq!(missing[&WeatherVariable::Temperature], vec![2023]);
        assert_eq!(missing[&WeatherVariable::Humidity], vec![2020, 2021, 2022, 2023]);
        service.close().await?;
        Ok(())
    }
}
