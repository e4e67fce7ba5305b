//! The seam between the query service and whatever holds the gridded data.

use crate::fetch::error::FetchError;
use crate::types::location::LatLon;
use crate::types::variable::WeatherVariable;
use crate::types::year_series::YearValue;
use async_trait::async_trait;
use chrono::NaiveDate;

/// A provider of per-day values for a coordinate.
///
/// Implementations pick the grid point they actually sample and report it in
/// [`YearValue::Present`]. "Nothing there" is a [`YearValue::Missing`], not an
/// error; errors are reserved for the source itself failing. The service calls
/// `fetch_year` concurrently, so implementations must be safe to share.
#[async_trait]
pub trait GridDataSource: Send + Sync {
    /// Called once when the service is built (e.g. to log in or open files).
    async fn initialize(&self) -> Result<(), FetchError> {
        Ok(())
    }

    async fn fetch_year(
        &self,
        variable: WeatherVariable,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<YearValue, FetchError>;

    /// Called once when the service is closed.
    async fn shutdown(&self) -> Result<(), FetchError> {
        Ok(())
    }
}
