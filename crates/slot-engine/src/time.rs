//! Wall-clock time normalization.
//!
//! Appointment times arrive from the booking store as `HH:MM` or `HH:MM:SS`
//! strings. Two normalizers are provided:
//!
//! - [`minutes_since_midnight`] never fails. Missing or non-numeric components
//!   become `0` and nothing is range-checked, so `"99:99"` yields `6039`.
//! - [`TimeOfDay::parse`] rejects anything that is not a valid time of day with
//!   [`SlotError::InvalidTime`].
//!
//! [`TimeParsing`] lets callers pick one of the two at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Convert a time string to minutes since midnight, coercing bad input to `0`.
///
/// The string is trimmed and split on `:`. The first component is the hour and
/// the second the minute; seconds and anything after them are ignored.
///
/// ```
/// use slot_engine::minutes_since_midnight;
///
/// assert_eq!(minutes_since_midnight("09:30"), 570);
/// assert_eq!(minutes_since_midnight(" 14:05:59 "), 845);
/// assert_eq!(minutes_since_midnight("99:99"), 6039);
/// assert_eq!(minutes_since_midnight("noon"), 0);
/// ```
pub fn minutes_since_midnight(time: &str) -> i64 {
    let mut parts = time.trim().split(':');
    let hour = lenient_component(parts.next());
    let minute = lenient_component(parts.next());
    hour.saturating_mul(60).saturating_add(minute)
}

fn lenient_component(part: Option<&str>) -> i64 {
    part.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Which normalizer to apply to incoming time strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeParsing {
    /// Coerce malformed components to zero.
    #[default]
    Lenient,
    /// Reject malformed or out-of-range times.
    Strict,
}

impl TimeParsing {
    /// Normalize `time` to minutes since midnight under this policy.
    pub fn minutes(self, time: &str) -> Result<i64> {
        match self {
            TimeParsing::Lenient => Ok(minutes_since_midnight(time)),
            TimeParsing::Strict => TimeOfDay::parse(time).map(|t| i64::from(t.minutes())),
        }
    }
}

impl FromStr for TimeParsing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(TimeParsing::Lenient),
            "strict" => Ok(TimeParsing::Strict),
            other => Err(format!(
                "unknown time parsing policy '{}' (expected 'lenient' or 'strict')",
                other
            )),
        }
    }
}

/// A validated time of day with minute resolution.
///
/// Serialized as an `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Compile-time constructor for literal times; callers keep `hour < 24`.
    pub(crate) const fn at(hour: u16, minute: u16) -> Self {
        TimeOfDay(hour * 60 + minute)
    }

    /// Parse a strict `HH:MM` or `HH:MM:SS` string.
    ///
    /// Each component must be one or two ASCII digits. Seconds are validated and
    /// then dropped.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` for a wrong component count, non-digit
    /// characters, or a component out of range.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| SlotError::InvalidTime {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = input.trim().split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(invalid("expected HH:MM or HH:MM:SS"));
        }

        let mut values = [0u32; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("each component must be one or two digits"));
            }
            *slot = part
                .parse()
                .map_err(|_| invalid("each component must be one or two digits"))?;
        }

        let [hour, minute, second] = values;
        if second > 59 {
            return Err(invalid("second must be between 00 and 59"));
        }
        Self::from_hm(hour, minute).map_err(|e| match e {
            SlotError::InvalidTime { reason, .. } => invalid(&reason),
            other => other,
        })
    }

    /// Build a time from an hour (`0..=23`) and minute (`0..=59`).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 {
            return Err(SlotError::InvalidTime {
                input: format!("{}:{:02}", hour, minute),
                reason: "hour must be between 00 and 23".to_string(),
            });
        }
        if minute > 59 {
            return Err(SlotError::InvalidTime {
                input: format!("{:02}:{}", hour, minute),
                reason: "minute must be between 00 and 59".to_string(),
            });
        }
        Ok(TimeOfDay((hour * 60 + minute) as u16))
    }

    /// Build a time from minutes since midnight (`0..1440`).
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SlotError::InvalidTime {
                input: minutes.to_string(),
                reason: "minutes since midnight must be below 1440".to_string(),
            });
        }
        Ok(TimeOfDay(minutes as u16))
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        TimeOfDay::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
