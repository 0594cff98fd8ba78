//! Availability blocks: periods a professional has marked as unavailable.
//!
//! A block either carries both a start and an end time, or neither, in which
//! case it covers the whole day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conflict::SlotInterval;
use crate::error::{Result, SlotError};
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityBlock {
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl AvailabilityBlock {
    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            date,
            start_time: None,
            end_time: None,
            reason: None,
        }
    }

    pub fn between(date: NaiveDate, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            date,
            start_time: Some(start),
            end_time: Some(end),
            reason: None,
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }

    /// The blocked interval within the block's day.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidBlock` when only one bound is set or the end
    /// is not after the start.
    pub fn interval(&self) -> Result<SlotInterval> {
        match (self.start_time, self.end_time) {
            (None, None) => Ok(SlotInterval::new(0, i64::from(MINUTES_PER_DAY))),
            (Some(start), Some(end)) if start < end => Ok(SlotInterval::new(
                i64::from(start.minutes()),
                i64::from(end.minutes()),
            )),
            (Some(start), Some(end)) => Err(SlotError::InvalidBlock(format!(
                "block on {} ends at {} which is not after its start {}",
                self.date, end, start
            ))),
            _ => Err(SlotError::InvalidBlock(format!(
                "block on {} must set both start_time and end_time, or neither",
                self.date
            ))),
        }
    }
}

/// Blocked intervals falling on `date`, in input order.
pub fn blocked_intervals(blocks: &[AvailabilityBlock], date: NaiveDate) -> Result<Vec<SlotInterval>> {
    blocks
        .iter()
        .filter(|b| b.date == date)
        .map(AvailabilityBlock::interval)
        .collect()
}
