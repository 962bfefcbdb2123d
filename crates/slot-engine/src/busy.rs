//! The busy-interval query: the day range it is asked for and the response it returns.
//!
//! The query covers the selected day's full 24 hours in the viewer's zone,
//! expressed in UTC. The response wraps the busy list as
//! `{"primary": {"busy": [{"start": ..., "end": ...}]}}`.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::generator::start_of_day;
use crate::model::BusyInterval;

/// Absolute bounds of one viewer-local day: first instant and last second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DayRange {
    pub fn for_date(date: NaiveDate, viewer_zone: Tz) -> Result<Self> {
        let next = date
            .succ_opt()
            .ok_or_else(|| SlotError::InvalidTime(format!("no day after {}", date)))?;
        let from = start_of_day(date, viewer_zone)?;
        let to = start_of_day(next, viewer_zone)? - Duration::milliseconds(1);
        Ok(Self { from, to })
    }

    /// `dateFrom` query value, e.g. `2026-03-02T05:00:00Z`.
    pub fn date_from(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `dateTo` query value, e.g. `2026-03-03T04:59:59Z`.
    pub fn date_to(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Body returned by the busy-interval query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusyResponse {
    pub primary: BusyCalendar,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusyCalendar {
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
}

impl BusyResponse {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The well-formed intervals. Entries whose start is not before their end are
    /// dropped with a warning.
    pub fn into_intervals(self) -> Vec<BusyInterval> {
        self.primary
            .busy
            .into_iter()
            .filter(|b| match b.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "dropping malformed busy interval");
                    false
                }
            })
            .collect()
    }
}

impl From<Vec<BusyInterval>> for BusyResponse {
    fn from(busy: Vec<BusyInterval>) -> Self {
        Self {
            primary: BusyCalendar { busy },
        }
    }
}
