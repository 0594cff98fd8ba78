//! Resolve which start times a professional can still be booked at on a day.
//!
//! Candidates are laid out every `step_minutes` from the start of the working
//! window. A candidate survives when the whole appointment fits in the window,
//! it touches no availability block, and [`has_conflict`] finds no overlap with
//! the day's existing appointments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::blocks::{blocked_intervals, AvailabilityBlock};
use crate::conflict::{has_conflict, AppointmentSlot, SlotInterval};
use crate::error::{Result, SlotError};
use crate::schedule::WorkingHours;
use crate::time::TimeOfDay;

/// Default spacing between candidate start times.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub duration_minutes: u32,
    #[serde(default = "default_step")]
    pub step_minutes: u32,
    /// Earliest acceptable start, e.g. the current time when `date` is today.
    #[serde(default)]
    pub not_before: Option<TimeOfDay>,
}

fn default_step() -> u32 {
    DEFAULT_STEP_MINUTES
}

impl SlotQuery {
    pub fn new(date: NaiveDate, duration_minutes: u32) -> Self {
        Self {
            date,
            duration_minutes,
            step_minutes: DEFAULT_STEP_MINUTES,
            not_before: None,
        }
    }

    pub fn with_step(mut self, step_minutes: u32) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    pub fn with_not_before(mut self, time: TimeOfDay) -> Self {
        self.not_before = Some(time);
        self
    }

    /// # Errors
    /// Returns `SlotError::InvalidQuery` for a zero duration or step.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidQuery(
                "duration_minutes must be greater than zero".to_string(),
            ));
        }
        if self.step_minutes == 0 {
            return Err(SlotError::InvalidQuery(
                "step_minutes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// List every bookable start time for `query`, in ascending order.
///
/// `existing` must already be limited to the professional's non-cancelled
/// appointments on `query.date`. Blocks on other days are ignored.
///
/// # Errors
/// Returns `SlotError::InvalidQuery` for a zero duration or step,
/// `SlotError::InvalidSchedule` for an unusable `hours`, and
/// `SlotError::InvalidBlock` for a malformed block on the queried day.
pub fn bookable_slots(
    hours: &WorkingHours,
    query: &SlotQuery,
    existing: &[AppointmentSlot],
    blocks: &[AvailabilityBlock],
) -> Result<Vec<TimeOfDay>> {
    resolve(hours, query, existing, blocks, usize::MAX)
}

/// The earliest bookable start time for `query`, if any.
///
/// Stops walking the day at the first bookable start.
pub fn first_bookable_slot(
    hours: &WorkingHours,
    query: &SlotQuery,
    existing: &[AppointmentSlot],
    blocks: &[AvailabilityBlock],
) -> Result<Option<TimeOfDay>> {
    Ok(resolve(hours, query, existing, blocks, 1)?.into_iter().next())
}

/// Walk the candidate grid, collecting at most `limit` bookable starts.
fn resolve(
    hours: &WorkingHours,
    query: &SlotQuery,
    existing: &[AppointmentSlot],
    blocks: &[AvailabilityBlock],
    limit: usize,
) -> Result<Vec<TimeOfDay>> {
    query.validate()?;
    hours.validate()?;

    let Some(window) = hours.window_for(query.date) else {
        debug!(date = %query.date, "not a working day");
        return Ok(Vec::new());
    };

    let blocked = blocked_intervals(blocks, query.date)?;
    let duration = query.duration_minutes;
    let step = i64::from(query.step_minutes);
    let earliest = query.not_before.map(|t| i64::from(t.minutes()));

    let mut slots = Vec::new();
    let mut candidates = 0usize;
    let mut start = window.start;

    while slots.len() < limit {
        let interval = SlotInterval::starting_at(start, duration);
        if !window.contains(&interval) {
            break;
        }
        candidates += 1;

        if earliest.is_some_and(|e| start < e) {
            trace!(start, "before earliest start");
        } else if blocked.iter().any(|b| b.overlaps(&interval)) {
            trace!(start, "inside availability block");
        } else {
            let time = TimeOfDay::from_minutes(start as u32)?;
            let candidate = AppointmentSlot::new(time.to_string(), duration);
            if has_conflict(&candidate, existing) {
                trace!(start, "overlaps existing appointment");
            } else {
                slots.push(time);
            }
        }

        start += step;
    }

    debug!(
        date = %query.date,
        candidates,
        bookable = slots.len(),
        "resolved bookable slots"
    );

    Ok(slots)
}
