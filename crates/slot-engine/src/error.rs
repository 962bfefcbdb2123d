//! Error types for slot-engine operations.

use chrono::{DateTime, NaiveTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(i64),

    #[error("Invalid working window: start {start} is not before end {end}")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Month offset out of range: {0}")]
    MonthOutOfRange(i32),

    #[error("Invalid busy interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, SlotError>;
