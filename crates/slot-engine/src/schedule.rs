//! Working days and hours of a professional.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::conflict::SlotInterval;
use crate::error::{Result, SlotError};
use crate::time::TimeOfDay;

/// The weekly pattern a professional accepts bookings in.
///
/// Every working day shares the same `[start, end)` window. Fields left out
/// when deserializing take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingHours {
    #[serde(with = "weekday_names")]
    pub days: Vec<Weekday>,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            start: TimeOfDay::at(9, 0),
            end: TimeOfDay::at(18, 0),
        }
    }
}

impl WorkingHours {
    /// # Errors
    /// Returns `SlotError::InvalidSchedule` when no day is listed or the window
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(SlotError::InvalidSchedule(
                "at least one working day is required".to_string(),
            ));
        }
        if self.start >= self.end {
            return Err(SlotError::InvalidSchedule(format!(
                "start {} must be before end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.days.contains(&date.weekday())
    }

    /// The bookable window on `date`, or `None` on a day off.
    pub fn window_for(&self, date: NaiveDate) -> Option<SlotInterval> {
        self.is_working_day(date).then(|| {
            SlotInterval::new(i64::from(self.start.minutes()), i64::from(self.end.minutes()))
        })
    }
}

/// Weekdays as lowercase names (`"mon"`, `"tuesday"`, ...).
mod weekday_names {
    use chrono::Weekday;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(days.iter().map(|d| d.to_string().to_lowercase()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Weekday>, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names
            .iter()
            .map(|name| {
                name.parse::<Weekday>()
                    .map_err(|_| D::Error::custom(format!("unknown weekday '{}'", name)))
            })
            .collect()
    }
}
