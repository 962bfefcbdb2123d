//! # slot-engine
//!
//! Bookable slot computation for a public scheduling page.
//!
//! Given a host's daily working window (in the host's zone), an event length, the
//! viewer's zone and a day, the engine produces candidate start instants and then
//! removes the ones that collide with the host's busy intervals.
//!
//! ## Modules
//!
//! - [`generator`] — working window + day → ordered candidate slots
//! - [`filter`] — subtract busy intervals from candidate slots
//! - [`model`] — `WorkingWindow`, `EventSpec`, `BusyInterval`, `Slot`, `SlotList`
//! - [`clock`] — injected clock and viewer zone (`DateService`)
//! - [`month`] — month navigation reducer and month grid
//! - [`busy`] — busy-query day range and response body
//! - [`booking`] — booking links for chosen slots
//! - [`display`] — 12h/24h slot labels and day headings
//! - [`error`] — Error types

pub mod booking;
pub mod busy;
pub mod clock;
pub mod display;
pub mod error;
pub mod filter;
pub mod generator;
pub mod model;
pub mod month;

pub use booking::BookingLink;
pub use busy::{BusyResponse, DayRange};
pub use clock::{parse_zone, Clock, DateService, FixedClock, SystemClock};
pub use display::{day_heading, slot_label, HourFormat};
pub use error::SlotError;
pub use filter::{filter_slots, filter_slots_with, StartMatch};
pub use generator::{generate, generate_with_policy, window_bounds, BoundaryPolicy};
pub use model::{parse_time_of_day, BusyInterval, EventSpec, Slot, SlotList, WorkingWindow};
pub use month::{CalendarDay, MonthAction, MonthNav, MonthView};

/// Generate the day's slots and drop those that collide with `busy`.
///
/// Convenience over [`generate`] followed by [`filter_slots`], with the default
/// boundary and start-match rules.
pub fn available_slots(
    date: Option<chrono::NaiveDate>,
    window: &WorkingWindow,
    viewer_zone: chrono_tz::Tz,
    event: &EventSpec,
    busy: &[BusyInterval],
) -> error::Result<SlotList> {
    let candidates = generate(date, window, viewer_zone, event)?;
    Ok(filter_slots(&candidates, busy))
}
