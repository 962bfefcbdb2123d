//! Month navigation for the date picker.
//!
//! Navigation state is an offset from the current month, changed only through
//! [`MonthNav::apply`]. [`MonthView`] lays out one month and marks which days
//! can be picked.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::clock::DateService;
use crate::error::{Result, SlotError};

/// Offset of the displayed month from the current month. Unbounded both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthNav {
    pub offset: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthAction {
    Next,
    Previous,
    Reset,
}

impl MonthNav {
    pub fn new(offset: i32) -> Self {
        Self { offset }
    }

    /// Pure transition: returns the state after `action`.
    #[must_use]
    pub fn apply(self, action: MonthAction) -> Self {
        let offset = match action {
            MonthAction::Next => self.offset.saturating_add(1),
            MonthAction::Previous => self.offset.saturating_sub(1),
            MonthAction::Reset => 0,
        };
        Self { offset }
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for days before today; those cannot be booked.
    pub selectable: bool,
}

/// A laid-out month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    /// Whether the "previous month" control is enabled. Only a hint for the
    /// date picker; [`MonthNav::apply`] never refuses to move.
    pub can_go_back: bool,
}

impl MonthView {
    /// Lay out the month `nav.offset` months away from the month containing `today`.
    pub fn new(today: NaiveDate, nav: MonthNav) -> Result<Self> {
        let first = shift_month(first_of_month(today), nav.offset)
            .ok_or(SlotError::MonthOutOfRange(nav.offset))?;
        let next = shift_month(first, 1).ok_or(SlotError::MonthOutOfRange(nav.offset))?;
        let days_in_month = (next - first).num_days();

        let days = first
            .iter_days()
            .take(days_in_month as usize)
            .map(|date| CalendarDay {
                date,
                selectable: date >= today,
            })
            .collect();

        Ok(Self {
            year: first.year(),
            month: first.month(),
            days,
            can_go_back: nav.offset > 0,
        })
    }

    /// Lay out a month relative to the service's "today".
    pub fn for_service(service: &DateService, nav: MonthNav) -> Result<Self> {
        Self::new(service.today(), nav)
    }

    /// Heading such as "March 2026".
    pub fn label(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    /// Whether `date` is in this month and can be picked.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.days.iter().any(|d| d.date == date && d.selectable)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn shift_month(first: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let months = Months::new(offset.unsigned_abs());
    if offset >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    }
}
