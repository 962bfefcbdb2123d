//! Error types for the booking page.

use chrono::NaiveDate;
use slot_engine::SlotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Host or event type lookup failures. The page cannot render without both.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown event type: {0}")]
    UnknownEventType(i64),

    #[error("Invalid profile: {0}")]
    Invalid(#[from] SlotError),
}

#[derive(Debug, Error)]
pub enum BusyQueryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Availability service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed availability response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Busy(#[from] BusyQueryError),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("{0} cannot be booked (it is in the past)")]
    DateNotSelectable(NaiveDate),
}

pub type Result<T> = std::result::Result<T, PageError>;
