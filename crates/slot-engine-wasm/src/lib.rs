//! WASM bindings for slot-engine.
//!
//! Exposes time normalization, overlap checks and bookable-slot listing to the
//! booking form via `wasm-bindgen`. Structured arguments cross the boundary as
//! JSON strings using the same field names as the appointments table.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::{Deserialize, Serialize};
use slot_engine::{AppointmentSlot, AvailabilityBlock, SlotQuery, TimeParsing, WorkingHours};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ConflictDto {
    index: usize,
    appointment_time: String,
    duration_minutes: u32,
    overlap_minutes: i64,
}

impl From<&slot_engine::Conflict> for ConflictDto {
    fn from(c: &slot_engine::Conflict) -> Self {
        Self {
            index: c.index,
            appointment_time: c.slot.appointment_time.clone(),
            duration_minutes: c.slot.duration_minutes,
            overlap_minutes: c.overlap_minutes,
        }
    }
}

/// Input for [`bookable_slots`]: the query fields plus the day's context.
#[derive(Deserialize)]
struct BookableSlotsInput {
    #[serde(flatten)]
    query: SlotQuery,
    #[serde(default)]
    working_hours: WorkingHours,
    #[serde(default)]
    existing: Vec<AppointmentSlot>,
    #[serde(default)]
    blocks: Vec<AvailabilityBlock>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_slot_json(json: &str) -> Result<AppointmentSlot, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid appointment JSON: {}", e)))
}

fn parse_slots_json(json: &str) -> Result<Vec<AppointmentSlot>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid appointments JSON: {}", e)))
}

fn parsing_policy(strict: Option<bool>) -> TimeParsing {
    if strict.unwrap_or(false) {
        TimeParsing::Strict
    } else {
        TimeParsing::Lenient
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Convert an `HH:MM` or `HH:MM:SS` string to minutes since midnight.
///
/// Malformed components count as zero. Pass `strict = true` to throw instead.
#[wasm_bindgen(js_name = "timeToMinutes")]
pub fn time_to_minutes(time: &str, strict: Option<bool>) -> Result<i64, JsValue> {
    parsing_policy(strict)
        .minutes(time)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether a candidate appointment overlaps any existing one.
///
/// `candidate_json` is a `{appointment_time, duration_minutes}` object and
/// `existing_json` an array of them, already limited to the professional's
/// non-cancelled appointments on that day.
#[wasm_bindgen(js_name = "hasConflict")]
pub fn has_conflict(
    candidate_json: &str,
    existing_json: &str,
    strict: Option<bool>,
) -> Result<bool, JsValue> {
    let candidate = parse_slot_json(candidate_json)?;
    let existing = parse_slots_json(existing_json)?;

    slot_engine::try_has_conflict(&candidate, &existing, parsing_policy(strict))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// List the existing appointments a candidate overlaps.
///
/// Returns a JSON array of `{index, appointment_time, duration_minutes, overlap_minutes}`.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(candidate_json: &str, existing_json: &str) -> Result<String, JsValue> {
    let candidate = parse_slot_json(candidate_json)?;
    let existing = parse_slots_json(existing_json)?;

    let dtos: Vec<ConflictDto> = slot_engine::find_conflicts(&candidate, &existing)
        .iter()
        .map(ConflictDto::from)
        .collect();

    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// List bookable start times for a day.
///
/// `request_json` holds `date`, `duration_minutes`, and optionally
/// `step_minutes`, `not_before`, `working_hours`, `existing` and `blocks`.
/// Returns a JSON array of `"HH:MM"` strings.
#[wasm_bindgen(js_name = "bookableSlots")]
pub fn bookable_slots(request_json: &str) -> Result<String, JsValue> {
    let input: BookableSlotsInput = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slot request JSON: {}", e)))?;

    let slots = slot_engine::bookable_slots(
        &input.working_hours,
        &input.query,
        &input.existing,
        &input.blocks,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&slots)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
