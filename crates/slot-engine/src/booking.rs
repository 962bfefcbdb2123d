//! Links handed to the booking-submission flow.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::Slot;

/// Link to the booking form for one slot of one event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingLink {
    pub username: String,
    pub start: DateTime<Utc>,
    pub event_type_id: i64,
}

impl BookingLink {
    pub fn new(username: impl Into<String>, slot: &Slot, event_type_id: i64) -> Self {
        Self {
            username: username.into(),
            start: slot.start,
            event_type_id,
        }
    }

    /// Path and query, e.g. `/alice/book?date=2026-03-02T14:00:00Z&type=3`.
    pub fn path(&self) -> String {
        format!(
            "/{}/book?date={}&type={}",
            urlencoding::encode(&self.username),
            self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.event_type_id
        )
    }

    /// Absolute URL under `site_base` (a trailing slash on the base is ignored).
    pub fn url(&self, site_base: &str) -> String {
        format!("{}{}", site_base.trim_end_matches('/'), self.path())
    }
}
