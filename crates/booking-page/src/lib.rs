//! # booking-page
//!
//! The data side of a public booking page, built on [`slot_engine`].
//!
//! ## Modules
//!
//! - [`page`] — `BookingPage`: month navigation, day selection, token-guarded busy results
//! - [`busy_query`] — `BusyQuery` trait and the HTTP implementation
//! - [`profile`] — host / event type profiles and the `ProfileSource` lookup
//! - [`config`] — TOML page configuration
//! - [`error`] — Error types

pub mod busy_query;
pub mod config;
pub mod error;
pub mod page;
pub mod profile;

pub use busy_query::{BusyQuery, HttpBusyQuery};
pub use config::PageConfig;
pub use error::{BusyQueryError, ConfigError, PageError, ProfileError};
pub use page::{BookingPage, BusyRequest, DayState, RequestToken, SlotEntry};
pub use profile::{EventType, HostProfile, ProfileSource, StaticProfiles};
