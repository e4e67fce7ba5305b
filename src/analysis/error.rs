use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Value series has {values} entries but year series has {years}")]
    LengthMismatch { values: usize, years: usize },
}
