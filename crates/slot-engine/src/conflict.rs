//! Detect overlapping appointments for a single professional on a single day.
//!
//! Every slot is treated as a half-open interval `[start, start + duration)` in
//! minutes since midnight. Two non-empty slots overlap when
//! `a.start < b.end && a.end > b.start`, so back-to-back appointments (one ends
//! exactly when another starts) are NOT conflicts. A zero-length slot shares no
//! time with anything and never overlaps, not even when it falls inside another.
//!
//! Callers are expected to pass only non-cancelled appointments for the right
//! professional and day; see [`crate::appointment::active_slots_for`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::{minutes_since_midnight, TimeParsing};

/// An appointment's occupancy of a calendar day, as stored by the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlot {
    /// `HH:MM` or `HH:MM:SS`.
    pub appointment_time: String,
    #[serde(default)]
    pub duration_minutes: u32,
}

impl AppointmentSlot {
    pub fn new(appointment_time: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            appointment_time: appointment_time.into(),
            duration_minutes,
        }
    }

    /// Interval covered by this slot, coercing a malformed time to `00:00`.
    pub fn interval(&self) -> SlotInterval {
        SlotInterval::starting_at(
            minutes_since_midnight(&self.appointment_time),
            self.duration_minutes,
        )
    }

    /// Interval covered by this slot under the given parsing policy.
    pub fn try_interval(&self, parsing: TimeParsing) -> Result<SlotInterval> {
        let start = parsing.minutes(&self.appointment_time)?;
        Ok(SlotInterval::starting_at(start, self.duration_minutes))
    }
}

/// Half-open interval `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotInterval {
    pub start: i64,
    pub end: i64,
}

impl SlotInterval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: i64, duration_minutes: u32) -> Self {
        Self {
            start,
            end: start.saturating_add(i64::from(duration_minutes)),
        }
    }

    /// An empty interval never overlaps anything, even inside a longer one.
    pub fn overlaps(&self, other: &SlotInterval) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && self.end > other.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length of the shared portion, or `0` when the intervals do not overlap.
    pub fn overlap_minutes(&self, other: &SlotInterval) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end.min(other.end) - self.start.max(other.start)
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &SlotInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Return `true` if `candidate` overlaps any slot in `existing`.
///
/// Stops at the first overlapping entry. Order and duplicates in `existing` do
/// not matter, and malformed times degrade to `00:00`-anchored arithmetic rather
/// than failing.
pub fn has_conflict(candidate: &AppointmentSlot, existing: &[AppointmentSlot]) -> bool {
    let wanted = candidate.interval();
    existing.iter().any(|slot| wanted.overlaps(&slot.interval()))
}

/// Same predicate as [`has_conflict`], with a selectable parsing policy.
///
/// # Errors
/// Under [`TimeParsing::Strict`], returns `SlotError::InvalidTime` for the first
/// malformed time, checking the candidate before the existing slots. Under
/// [`TimeParsing::Lenient`] this never fails.
pub fn try_has_conflict(
    candidate: &AppointmentSlot,
    existing: &[AppointmentSlot],
    parsing: TimeParsing,
) -> Result<bool> {
    if parsing == TimeParsing::Lenient {
        return Ok(has_conflict(candidate, existing));
    }

    let wanted = candidate.try_interval(parsing)?;
    let intervals = existing
        .iter()
        .map(|slot| slot.try_interval(parsing))
        .collect::<Result<Vec<_>>>()?;

    Ok(intervals.iter().any(|other| wanted.overlaps(other)))
}

/// An existing slot that overlaps the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// Position of the conflicting slot in the `existing` list.
    pub index: usize,
    pub slot: AppointmentSlot,
    pub overlap_minutes: i64,
}

/// Find every slot in `existing` that overlaps `candidate`.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`. Results
/// keep the order of `existing`.
pub fn find_conflicts(candidate: &AppointmentSlot, existing: &[AppointmentSlot]) -> Vec<Conflict> {
    let wanted = candidate.interval();

    existing
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            let other = slot.interval();
            wanted.overlaps(&other).then(|| Conflict {
                index,
                slot: slot.clone(),
                overlap_minutes: wanted.overlap_minutes(&other),
            })
        })
        .collect()
}
