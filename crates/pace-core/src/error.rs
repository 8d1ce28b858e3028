use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid product code: {0}")]
    InvalidProduct(String),

    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("invalid date: year={year} month={month} day={day}")]
    InvalidDate {
        year: i16,
        month: String,
        day: String,
    },

    #[error("missing required field: {0}")]
    MissingField(String),
}
