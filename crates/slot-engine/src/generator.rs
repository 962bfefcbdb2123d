//! Slot generation -- turns a working window and an event length into candidate
//! start instants for one day.
//!
//! The window's wall-clock times are resolved in the host's zone, stepped in
//! absolute time, and tagged with the viewer's zone for display.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::model::{EventSpec, Slot, SlotList, WorkingWindow};

/// Longest DST gap we step over when a wall-clock time does not exist.
const MAX_GAP_MINUTES: i64 = 180;

/// Which candidate starts near the end of the window are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Keep every start strictly before the window end, even if the slot runs past it.
    #[default]
    StartBeforeEnd,
    /// Keep only slots that finish at or before the window end.
    FitWithinWindow,
}

/// Absolute bounds of a working window on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Generate the candidate slots for `date`.
///
/// `None` means no day has been picked yet and yields an empty list. The host
/// zone is `window.zone`; slots are tagged with `viewer_zone`.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` for a non-positive or unrepresentable
/// event length and
/// `SlotError::InvalidWindow` when the window does not start before it ends.
pub fn generate(
    date: Option<NaiveDate>,
    window: &WorkingWindow,
    viewer_zone: Tz,
    event: &EventSpec,
) -> Result<SlotList> {
    generate_with_policy(date, window, viewer_zone, event, BoundaryPolicy::default())
}

/// [`generate`] with an explicit [`BoundaryPolicy`].
pub fn generate_with_policy(
    date: Option<NaiveDate>,
    window: &WorkingWindow,
    viewer_zone: Tz,
    event: &EventSpec,
    policy: BoundaryPolicy,
) -> Result<SlotList> {
    let duration = event.duration()?;
    window.validate()?;

    let Some(date) = date else {
        return Ok(SlotList::default());
    };

    let bounds = window_bounds(date, window)?;

    let mut slots = Vec::new();
    let mut cursor = bounds.start;
    while cursor < bounds.end {
        // An overflowing step lands past any representable window end.
        let next = cursor.checked_add_signed(duration);
        if policy == BoundaryPolicy::FitWithinWindow && next.is_none_or(|n| n > bounds.end) {
            break;
        }
        slots.push(Slot::new(cursor, viewer_zone));
        match next {
            Some(n) => cursor = n,
            None => break,
        }
    }

    tracing::debug!(
        %date,
        host_zone = %window.zone,
        %viewer_zone,
        duration_minutes = event.duration_minutes,
        count = slots.len(),
        "generated candidate slots"
    );

    Ok(SlotList::from_sorted(slots))
}

/// Resolve the window's start and end on `date` to absolute instants.
pub fn window_bounds(date: NaiveDate, window: &WorkingWindow) -> Result<WindowBounds> {
    window.validate()?;
    let start = resolve_local(date.and_time(window.day_start), window.zone)?;
    let end = resolve_local(date.and_time(window.day_end), window.zone)?;
    Ok(WindowBounds { start, end })
}

/// Midnight of `date` in `zone`, or the first valid instant of the day when
/// midnight falls in a DST gap.
pub fn start_of_day(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    resolve_local(date.and_time(NaiveTime::MIN), zone)
}

/// Map a wall-clock time in `zone` to an instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// spring-forward gap move to the first valid minute after the gap.
fn resolve_local(local: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>> {
    (0..=MAX_GAP_MINUTES)
        .find_map(|m| {
            zone.from_local_datetime(&(local + Duration::minutes(m)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| SlotError::InvalidTime(format!("{} does not exist in {}", local, zone)))
}
