//! Human-readable labels for slots and days, in the viewer's zone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Slot;

/// The page's am/pm vs 24h toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HourFormat {
    /// `09:30am`
    #[default]
    #[serde(rename = "12h")]
    Twelve,
    /// `09:30`
    #[serde(rename = "24h")]
    TwentyFour,
}

impl HourFormat {
    fn pattern(self) -> &'static str {
        match self {
            HourFormat::Twelve => "%I:%M%P",
            HourFormat::TwentyFour => "%H:%M",
        }
    }
}

/// Label for a slot start on the viewer's wall clock.
pub fn slot_label(slot: &Slot, format: HourFormat) -> String {
    slot.local().format(format.pattern()).to_string()
}

/// Heading for the selected day, e.g. "Monday 02 March 2026".
pub fn day_heading(date: NaiveDate) -> String {
    date.format("%A %d %B %Y").to_string()
}
