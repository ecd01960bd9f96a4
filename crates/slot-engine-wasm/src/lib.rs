//! WASM bindings for slot-engine.
//!
//! Exposes day classification and slot generation to the embeddable booking
//! widget via `wasm-bindgen`. All complex types are passed as JSON strings,
//! matching the pattern established by this workspace's other wasm crates.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/widget-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use slot_engine::calendar::{classify_month, DayStatus, MonthAvailability, YearMonth};
use slot_engine::schedule::{format_hhmm, Appointment, Break, Service, Vacation, WorkingHours};
use slot_engine::slots::{generate_slots, StaffDay};

/// One-shot widget initialization flag.
///
/// The embed script may be included more than once on a page; only the first
/// `initWidget()` call wins.
static WIDGET_INITIALIZED: AtomicBool = AtomicBool::new(false);

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for a staff day passed from JavaScript.
#[derive(Deserialize)]
struct StaffDayInput {
    date: NaiveDate,
    salon_hours: WorkingHours,
    staff_hours: WorkingHours,
    #[serde(default)]
    breaks: Vec<Break>,
    #[serde(default)]
    vacations: Vec<Vacation>,
    #[serde(default)]
    appointments: Vec<Appointment>,
}

/// Input format for the authoritative month-availability overlay.
#[derive(Deserialize)]
struct AvailabilityInput {
    #[serde(default)]
    available_dates: Vec<NaiveDate>,
    #[serde(default)]
    unavailable_dates: Vec<NaiveDate>,
}

#[derive(Serialize)]
struct DayCellDto {
    date: String,
    status: &'static str,
    is_today: bool,
}

fn status_name(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Past => "past",
        DayStatus::Closed => "closed",
        DayStatus::Open => "open",
    }
}

// ---------------------------------------------------------------------------
// Helpers: parse JSON inputs from JavaScript
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_services_json(json: &str) -> Result<Vec<Service>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid services JSON: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Claim widget initialization for this page.
///
/// Returns `true` exactly once per instantiation; subsequent calls return
/// `false` and the caller must skip bootstrapping.
#[wasm_bindgen(js_name = "initWidget")]
pub fn init_widget() -> bool {
    !WIDGET_INITIALIZED.swap(true, Ordering::SeqCst)
}

/// Classify every date of a month as `"past"`, `"closed"` or `"open"`.
///
/// # Arguments
/// - `month` -- `"YYYY-MM"`
/// - `today` -- ISO date string, the customer's local calendar date
/// - `salon_hours_json` -- salon [`WorkingHours`] object
/// - `availability_json` -- optional server response
///   `{available_dates, unavailable_dates}`; when present it fully replaces
///   the weekday heuristic
///
/// Returns a JSON array of `{date, status, is_today}` objects.
#[wasm_bindgen(js_name = "classifyMonth")]
pub fn classify_month_js(
    month: &str,
    today: &str,
    salon_hours_json: &str,
    availability_json: Option<String>,
) -> Result<String, JsValue> {
    let month: YearMonth = month
        .parse()
        .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
    let today = parse_date(today)?;
    let salon_hours: WorkingHours = serde_json::from_str(salon_hours_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid working hours JSON: {}", e)))?;

    let overlay = match availability_json.as_deref() {
        Some(json) => {
            let input: AvailabilityInput = serde_json::from_str(json)
                .map_err(|e| JsValue::from_str(&format!("Invalid availability JSON: {}", e)))?;
            Some(MonthAvailability::from_lists(
                input.available_dates,
                input.unavailable_dates,
            ))
        }
        None => None,
    };

    let grid = classify_month(month, today, &salon_hours, overlay.as_ref());

    let dtos: Vec<DayCellDto> = grid
        .cells
        .iter()
        .map(|c| DayCellDto {
            date: c.date.to_string(),
            status: status_name(c.status),
            is_today: c.is_today,
        })
        .collect();

    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Enumerate bookable start times for a staff day and service selection.
///
/// `day_json` must be a JSON object with `date`, `salon_hours`,
/// `staff_hours` and optional `breaks`, `vacations`, `appointments` arrays.
/// `services_json` is the selected services. Returns a JSON array of
/// `"HH:MM"` strings, chronological and duplicate-free.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots_js(
    day_json: &str,
    services_json: &str,
    granularity_minutes: u32,
) -> Result<String, JsValue> {
    let input: StaffDayInput = serde_json::from_str(day_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid staff day JSON: {}", e)))?;
    let services = parse_services_json(services_json)?;

    let day = StaffDay {
        date: input.date,
        salon_hours: &input.salon_hours,
        staff_hours: &input.staff_hours,
        breaks: &input.breaks,
        vacations: &input.vacations,
        appointments: &input.appointments,
    };

    let slots: Vec<String> = generate_slots(&day, &services, granularity_minutes)
        .into_iter()
        .map(format_hhmm)
        .collect();

    serde_json::to_string(&slots)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Total appointment time required by a service selection, in minutes.
///
/// Zero-duration addon services contribute nothing but are accepted.
#[wasm_bindgen(js_name = "effectiveDuration")]
pub fn effective_duration_js(services_json: &str) -> Result<u32, JsValue> {
    let services = parse_services_json(services_json)?;
    Ok(slot_engine::effective_duration(&services))
}
