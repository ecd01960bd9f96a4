//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid month {0}: expected 1-12")]
    InvalidMonth(u32),

    #[error("Invalid month string '{0}': expected YYYY-MM")]
    InvalidMonthString(String),

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
