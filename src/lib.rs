mod analysis;
mod error;
mod fetch;
mod types;
mod weather_probability;

pub use error::WeatherProbabilityError;
pub use weather_probability::WeatherProbability;

pub use analysis::error::AnalysisError;
pub use analysis::geodesic::{compute_grid_offset, GridOffset};
pub use analysis::probability::{
    compute_probabilities, ProbabilityResult, Threshold, ThresholdDirection, ThresholdEntry,
    ThresholdSet,
};
pub use analysis::statistics::{compute_statistics, Statistics};
pub use analysis::trend::{compute_trend, TrendDirection, TrendResult, MIN_R_SQUARED, STABLE_SLOPE};

pub use fetch::conversions::{derive_value, kelvin_to_celsius, relative_humidity, wind_speed};
pub use fetch::error::FetchError;
pub use fetch::frame_source::{FrameDataSource, DEFAULT_MAX_DISTANCE_KM};
pub use fetch::grid_frame::{GridFrame, DATE_COLUMN, HOUR_COLUMN, LAT_COLUMN, LON_COLUMN};
pub use fetch::source::GridDataSource;

pub use types::day_of_year::{DayOfYear, YearRange};
pub use types::envelope::{GridPointInfo, Metadata, QueryEnvelope, QueryInfo, VariableData};
pub use types::location::{GridPoint, LatLon, Location};
pub use types::query::WeatherQuery;
pub use types::variable::{DataSource, WeatherVariable};
pub use types::year_series::{MissingReason, MissingYear, YearSeries, YearValue};
