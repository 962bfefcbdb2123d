//! Booking page controller.
//!
//! Holds everything one page view needs: the host's working window, the event
//! length, month navigation and the state of the selected day. Every day
//! selection gets a fresh [`RequestToken`]; a busy-query result is applied only
//! if it carries the latest token, so a slow response for an earlier pick can
//! never overwrite a later one.

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::{
    available_slots, day_heading, slot_label, BookingLink, BusyInterval, DateService, DayRange,
    EventSpec, HourFormat, MonthAction, MonthNav, MonthView, SlotList, WorkingWindow,
};

use crate::busy_query::BusyQuery;
use crate::error::{BusyQueryError, PageError, Result};
use crate::profile::{EventType, HostProfile, ProfileSource};

/// Identifies one busy-interval request. Later selections get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

/// A busy-interval request the caller must run and hand back to
/// [`BookingPage::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyRequest {
    pub token: RequestToken,
    pub date: NaiveDate,
    pub range: DayRange,
}

/// State of the day panel.
#[derive(Debug, Clone, PartialEq)]
pub enum DayState {
    Unselected,
    Loading {
        date: NaiveDate,
        token: RequestToken,
    },
    Ready {
        date: NaiveDate,
        slots: SlotList,
    },
    Failed {
        date: NaiveDate,
        message: String,
    },
}

/// One bookable time as shown to the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotEntry {
    pub label: String,
    pub start: String,
    pub link: String,
}

pub struct BookingPage {
    host: HostProfile,
    event_type: EventType,
    window: WorkingWindow,
    event: EventSpec,
    dates: DateService,
    site_base: String,
    hour_format: HourFormat,
    nav: MonthNav,
    last_token: u64,
    day: DayState,
}

impl BookingPage {
    /// Build a page from already-resolved profiles.
    pub fn new(
        host: HostProfile,
        event_type: EventType,
        dates: DateService,
        site_base: impl Into<String>,
    ) -> Result<Self> {
        let window = host.working_window()?;
        let event = event_type.spec()?;
        Ok(Self {
            host,
            event_type,
            window,
            event,
            dates,
            site_base: site_base.into(),
            hour_format: HourFormat::default(),
            nav: MonthNav::default(),
            last_token: 0,
            day: DayState::Unselected,
        })
    }

    /// Look up the host and event type, then build the page.
    ///
    /// An unknown user or event type is a load failure; there is nothing to show.
    pub async fn load<P>(
        profiles: &P,
        username: &str,
        event_type_id: i64,
        dates: DateService,
        site_base: impl Into<String>,
    ) -> Result<Self>
    where
        P: ProfileSource + Sync + ?Sized,
    {
        let host = profiles.host(username).await?;
        let event_type = profiles.event_type(event_type_id).await?;
        tracing::info!(
            "Loaded booking page for {} / {} ({} minutes)",
            host.username,
            event_type.title,
            event_type.length
        );
        Self::new(host, event_type, dates, site_base)
    }

    pub fn host(&self) -> &HostProfile {
        &self.host
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn dates(&self) -> &DateService {
        &self.dates
    }

    pub fn day(&self) -> &DayState {
        &self.day
    }

    pub fn hour_format(&self) -> HourFormat {
        self.hour_format
    }

    pub fn set_hour_format(&mut self, format: HourFormat) {
        self.hour_format = format;
    }

    // ── Month navigation ────────────────────────────────────────────────────

    pub fn month(&self) -> MonthNav {
        self.nav
    }

    pub fn navigate(&mut self, action: MonthAction) -> MonthNav {
        self.nav = self.nav.apply(action);
        self.nav
    }

    pub fn month_view(&self) -> Result<MonthView> {
        Ok(MonthView::for_service(&self.dates, self.nav)?)
    }

    // ── Day selection ───────────────────────────────────────────────────────

    /// Select a day and issue the busy request for it.
    ///
    /// Days before today (in the viewer's zone) are refused.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<BusyRequest> {
        if date < self.dates.today() {
            return Err(PageError::DateNotSelectable(date));
        }
        let range = DayRange::for_date(date, self.dates.viewer_zone())?;

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.day = DayState::Loading { date, token };

        tracing::debug!(%date, token = token.0, "day selected");
        Ok(BusyRequest { token, date, range })
    }

    /// Apply the outcome of a busy request.
    ///
    /// Returns `false` and leaves the state alone when `token` is not from the
    /// latest selection.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: std::result::Result<Vec<BusyInterval>, BusyQueryError>,
    ) -> bool {
        let date = match &self.day {
            DayState::Loading { date, token: current } if *current == token => *date,
            _ => {
                tracing::debug!(token = token.0, "ignoring stale busy response");
                return false;
            }
        };

        self.day = match outcome {
            Ok(busy) => match available_slots(
                Some(date),
                &self.window,
                self.dates.viewer_zone(),
                &self.event,
                &busy,
            ) {
                Ok(slots) => DayState::Ready { date, slots },
                Err(e) => DayState::Failed {
                    date,
                    message: e.to_string(),
                },
            },
            Err(e) => {
                tracing::warn!(%date, error = %e, "busy query failed");
                DayState::Failed {
                    date,
                    message: format!("Could not load availability: {}", e),
                }
            }
        };
        true
    }

    /// Select `date`, query `busy` for it and apply the result.
    pub async fn show_day<Q>(&mut self, date: NaiveDate, busy: &Q) -> Result<&DayState>
    where
        Q: BusyQuery + Sync + ?Sized,
    {
        let request = self.select_date(date)?;
        let outcome = busy.busy(&self.host.username, request.range).await;
        self.complete(request.token, outcome);
        Ok(&self.day)
    }

    // ── Rendering helpers ───────────────────────────────────────────────────

    /// Heading for the selected day.
    pub fn heading(&self) -> Option<String> {
        match &self.day {
            DayState::Unselected => None,
            DayState::Loading { date, .. }
            | DayState::Ready { date, .. }
            | DayState::Failed { date, .. } => Some(day_heading(*date)),
        }
    }

    /// Bookable times for the selected day; empty unless the day is ready.
    pub fn entries(&self) -> Vec<SlotEntry> {
        let DayState::Ready { slots, .. } = &self.day else {
            return Vec::new();
        };
        slots
            .iter()
            .map(|slot| {
                let link = BookingLink::new(self.host.username.clone(), slot, self.event_type.id);
                SlotEntry {
                    label: slot_label(slot, self.hour_format),
                    start: slot.start.to_rfc3339(),
                    link: link.url(&self.site_base),
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for BookingPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingPage")
            .field("host", &self.host.username)
            .field("event_type", &self.event_type.id)
            .field("nav", &self.nav)
            .field("day", &self.day)
            .finish()
    }
}
