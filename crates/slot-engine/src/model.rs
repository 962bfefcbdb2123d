//! Core data model: working window, event length, busy intervals and slots.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// The host's recurring daily availability, in the host's own zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingWindow {
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub zone: Tz,
}

impl WorkingWindow {
    /// Build a window, rejecting `day_start >= day_end`.
    pub fn new(day_start: NaiveTime, day_end: NaiveTime, zone: Tz) -> Result<Self> {
        let window = Self {
            day_start,
            day_end,
            zone,
        };
        window.validate()?;
        Ok(window)
    }

    /// Build a window from minutes since midnight, the shape host profiles are stored in.
    pub fn from_minutes(start_minutes: u32, end_minutes: u32, zone: Tz) -> Result<Self> {
        Self::new(
            time_from_minutes(start_minutes)?,
            time_from_minutes(end_minutes)?,
            zone,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.day_start >= self.day_end {
            return Err(SlotError::InvalidWindow {
                start: self.day_start,
                end: self.day_end,
            });
        }
        Ok(())
    }

    /// Offset of `day_start` from midnight.
    pub fn start_offset(&self) -> Duration {
        self.day_start.signed_duration_since(NaiveTime::MIN)
    }

    /// Offset of `day_end` from midnight.
    pub fn end_offset(&self) -> Duration {
        self.day_end.signed_duration_since(NaiveTime::MIN)
    }
}

fn time_from_minutes(minutes: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or_else(|| SlotError::InvalidTime(format!("{} minutes past midnight", minutes)))
}

/// Parse a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| SlotError::InvalidTime(s.to_string()))
}

/// Length of one bookable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub duration_minutes: i64,
}

impl EventSpec {
    pub fn new(duration_minutes: i64) -> Result<Self> {
        let spec = Self { duration_minutes };
        spec.validate()?;
        Ok(spec)
    }

    /// Rejects non-positive lengths and lengths too large to represent as a `Duration`.
    pub fn validate(&self) -> Result<()> {
        self.duration().map(|_| ())
    }

    pub fn duration(&self) -> Result<Duration> {
        if self.duration_minutes <= 0 {
            return Err(SlotError::InvalidDuration(self.duration_minutes));
        }
        Duration::try_minutes(self.duration_minutes)
            .ok_or(SlotError::InvalidDuration(self.duration_minutes))
    }
}

/// A time range during which the host is already committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(SlotError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// True when `instant` lies strictly inside the interval (both ends excluded).
    pub fn strictly_contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }
}

/// Start instant of one bookable period, tagged with the zone it is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub zone: Tz,
}

impl Slot {
    pub(crate) fn new(start: DateTime<Utc>, zone: Tz) -> Self {
        Self { start, zone }
    }

    /// The slot start on the viewer's wall clock.
    pub fn local(&self) -> DateTime<Tz> {
        self.start.with_timezone(&self.zone)
    }

    /// The slot start truncated to the minute.
    pub fn start_minute(&self) -> DateTime<Utc> {
        truncate_to_minute(self.start)
    }
}

pub(crate) fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Strictly increasing list of slots.
///
/// Only [`crate::generator`] and [`crate::filter`] build one, so the ordering
/// invariant holds for every value in circulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotList(Vec<Slot>);

impl SlotList {
    pub(crate) fn from_sorted(slots: Vec<Slot>) -> Self {
        debug_assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
        Self(slots)
    }

    /// Build a list from start instants given in any order, all shown in `zone`.
    /// Duplicate instants collapse to one slot.
    pub fn from_instants(instants: impl IntoIterator<Item = DateTime<Utc>>, zone: Tz) -> Self {
        let mut starts: Vec<DateTime<Utc>> = instants.into_iter().collect();
        starts.sort_unstable();
        starts.dedup();
        Self(starts.into_iter().map(|start| Slot::new(start, zone)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.0
    }

    /// The absolute start instants, in order.
    pub fn instants(&self) -> Vec<DateTime<Utc>> {
        self.0.iter().map(|s| s.start).collect()
    }

    pub fn into_vec(self) -> Vec<Slot> {
        self.0
    }
}

impl<'a> IntoIterator for &'a SlotList {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for SlotList {
    type Item = Slot;
    type IntoIter = std::vec::IntoIter<Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
