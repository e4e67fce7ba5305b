use crate::types::variable::WeatherVariable;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to scan parquet file '{0}'")]
    ParquetScan(PathBuf, #[source] PolarsError),

    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Polars operation failed for {variable}: {source}")]
    PolarsError {
        variable: WeatherVariable,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' for {variable}")]
    MissingColumn {
        variable: WeatherVariable,
        column: String,
    },

    #[error("No grid loaded for {0}")]
    NoGridForVariable(WeatherVariable),

    #[error("Grid for {0} contains no points")]
    EmptyGrid(WeatherVariable),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Data source failure: {0}")]
    Source(String),
}
