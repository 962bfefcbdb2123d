//! Date/time service passed explicitly to everything that needs "now".
//!
//! Nothing in this crate reads the system clock or a process-wide default zone on
//! its own. A [`DateService`] is built once at start-up (from a [`Clock`] and the
//! viewer's zone) and handed to the callers that need "today".

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant. Used by tests and reproducible CLI runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parse an IANA zone identifier (e.g. "America/New_York").
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Clock plus the viewer's time zone.
pub struct DateService {
    clock: Box<dyn Clock>,
    viewer_zone: Tz,
}

impl DateService {
    pub fn new(clock: impl Clock + 'static, viewer_zone: Tz) -> Self {
        Self {
            clock: Box::new(clock),
            viewer_zone,
        }
    }

    /// Service on the system clock.
    pub fn system(viewer_zone: Tz) -> Self {
        Self::new(SystemClock, viewer_zone)
    }

    pub fn viewer_zone(&self) -> Tz {
        self.viewer_zone
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Today's calendar date as seen from the viewer's zone.
    pub fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.viewer_zone).date_naive()
    }
}

impl std::fmt::Debug for DateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateService")
            .field("now", &self.now())
            .field("viewer_zone", &self.viewer_zone)
            .finish()
    }
}
