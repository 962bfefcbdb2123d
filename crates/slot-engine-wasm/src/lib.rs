//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, busy-interval filtering, the busy-query day range and
//! the month grid to a browser booking page via `wasm-bindgen`. Complex values
//! cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::{
    filter_slots, generate_with_policy, parse_time_of_day, parse_zone, BoundaryPolicy,
    BusyInterval, BusyResponse, DayRange, EventSpec, MonthNav, MonthView, Slot, SlotList,
    WorkingWindow,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    local: String,
}

impl From<&Slot> for SlotDto {
    fn from(s: &Slot) -> Self {
        Self {
            start: s.start.to_rfc3339(),
            local: s.local().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayRangeDto {
    date_from: String,
    date_to: String,
}

/// Busy interval as passed from JavaScript.
#[derive(Deserialize)]
struct BusyInput {
    start: String,
    end: String,
}

/// Slot as passed back from JavaScript; only `start` is read.
#[derive(Deserialize)]
struct SlotInput {
    start: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

/// Convert a JSON array of `{start, end}` objects into busy intervals.
///
/// Entries whose start is not before their end are dropped, as they are for the
/// HTTP busy query.
fn parse_busy_json(json: &str) -> Result<Vec<BusyInterval>, JsValue> {
    let inputs: Vec<BusyInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid busy JSON: {}", e)))?;

    let busy = inputs
        .into_iter()
        .map(|input| {
            Ok(BusyInterval {
                start: parse_instant(&input.start)?,
                end: parse_instant(&input.end)?,
            })
        })
        .collect::<Result<Vec<_>, JsValue>>()?;
    Ok(BusyResponse::from(busy).into_intervals())
}

/// Convert a JSON array of `{start, ...}` objects into a slot list shown in `zone`.
fn parse_slots_json(json: &str, zone: &str) -> Result<SlotList, JsValue> {
    let zone = parse_zone(zone).map_err(js_err)?;
    let inputs: Vec<SlotInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slots JSON: {}", e)))?;

    let starts = inputs
        .iter()
        .map(|input| parse_instant(&input.start))
        .collect::<Result<Vec<_>, JsValue>>()?;
    Ok(SlotList::from_instants(starts, zone))
}

fn slots_for(
    date: Option<String>,
    day_start: &str,
    day_end: &str,
    host_zone: &str,
    viewer_zone: &str,
    duration_minutes: i32,
    fit_window: bool,
) -> Result<SlotList, JsValue> {
    let date = date.as_deref().map(parse_date).transpose()?;
    let window = WorkingWindow {
        day_start: parse_time_of_day(day_start).map_err(js_err)?,
        day_end: parse_time_of_day(day_end).map_err(js_err)?,
        zone: parse_zone(host_zone).map_err(js_err)?,
    };
    let viewer = parse_zone(viewer_zone).map_err(js_err)?;
    let event = EventSpec {
        duration_minutes: i64::from(duration_minutes),
    };
    let policy = if fit_window {
        BoundaryPolicy::FitWithinWindow
    } else {
        BoundaryPolicy::StartBeforeEnd
    };
    generate_with_policy(date, &window, viewer, &event, policy).map_err(js_err)
}

fn to_json(slots: &SlotList) -> Result<String, JsValue> {
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the candidate slots for one day.
///
/// Returns a JSON array of `{start, local}` objects: `start` in UTC, `local` in
/// the viewer's zone, both RFC 3339. `date` may be omitted, giving `[]`.
///
/// # Arguments
/// - `date` -- Day as "YYYY-MM-DD", or undefined when nothing is selected
/// - `day_start`, `day_end` -- Working window as "HH:MM" in the host zone
/// - `host_zone`, `viewer_zone` -- IANA zones (e.g., "America/New_York")
/// - `duration_minutes` -- Event length
/// - `fit_window` -- Drop a final slot that would run past `day_end`
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(
    date: Option<String>,
    day_start: &str,
    day_end: &str,
    host_zone: &str,
    viewer_zone: &str,
    duration_minutes: i32,
    fit_window: bool,
) -> Result<String, JsValue> {
    let slots = slots_for(
        date,
        day_start,
        day_end,
        host_zone,
        viewer_zone,
        duration_minutes,
        fit_window,
    )?;
    to_json(&slots)
}

/// Generate the day's slots and remove those that collide with `busy_json`.
///
/// `busy_json` is a JSON array of `{start, end}` objects with RFC 3339 instants.
/// Output has the same shape as [`generate_slots`].
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    date: Option<String>,
    day_start: &str,
    day_end: &str,
    host_zone: &str,
    viewer_zone: &str,
    duration_minutes: i32,
    busy_json: &str,
) -> Result<String, JsValue> {
    let candidates = slots_for(
        date,
        day_start,
        day_end,
        host_zone,
        viewer_zone,
        duration_minutes,
        false,
    )?;
    let busy = parse_busy_json(busy_json)?;
    to_json(&filter_slots(&candidates, &busy))
}

/// Remove the slots in `slots_json` that collide with `busy_json`.
///
/// `slots_json` is the output of [`generate_slots`] (only `start` is read);
/// `viewer_zone` sets the zone of `local` in the result.
#[wasm_bindgen(js_name = "filterSlots")]
pub fn filter_slots_json(
    slots_json: &str,
    viewer_zone: &str,
    busy_json: &str,
) -> Result<String, JsValue> {
    let candidates = parse_slots_json(slots_json, viewer_zone)?;
    let busy = parse_busy_json(busy_json)?;
    to_json(&filter_slots(&candidates, &busy))
}

/// Bounds for the busy-interval query: `{dateFrom, dateTo}` for the viewer's day.
#[wasm_bindgen(js_name = "dayRange")]
pub fn day_range(date: &str, viewer_zone: &str) -> Result<String, JsValue> {
    let zone = parse_zone(viewer_zone).map_err(js_err)?;
    let range = DayRange::for_date(parse_date(date)?, zone).map_err(js_err)?;
    serde_json::to_string(&DayRangeDto {
        date_from: range.date_from(),
        date_to: range.date_to(),
    })
    .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Month grid `offset` months away from the month containing `today` ("YYYY-MM-DD").
///
/// Returns `{year, month, days: [{date, selectable}], can_go_back}`.
#[wasm_bindgen(js_name = "monthView")]
pub fn month_view(today: &str, offset: i32) -> Result<String, JsValue> {
    let view = MonthView::new(parse_date(today)?, MonthNav::new(offset)).map_err(js_err)?;
    serde_json::to_string(&view)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
