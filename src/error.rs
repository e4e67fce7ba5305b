use crate::analysis::error::AnalysisError;
use crate::fetch::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherProbabilityError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{month}/{day} is not a day of the year")]
    InvalidDayOfYear { month: u32, day: u32 },

    #[error("Year range {start}-{end} ends before it starts")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("No variables requested")]
    NoVariables,
}
