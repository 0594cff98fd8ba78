//! `slotcheck` configuration file.
//!
//! ```toml
//! timezone = "Europe/Madrid"
//! time_parsing = "strict"
//! slot_step_minutes = 15
//!
//! [working_hours]
//! days = ["mon", "tue", "wed", "thu", "fri"]
//! start = "09:00"
//! end = "18:00"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use slot_engine::slots::DEFAULT_STEP_MINUTES;
use slot_engine::{TimeParsing, WorkingHours};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// IANA timezone the practice operates in; used to decide what "now" is.
    pub timezone: String,
    pub time_parsing: TimeParsing,
    pub slot_step_minutes: u32,
    pub working_hours: WorkingHours,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            time_parsing: TimeParsing::default(),
            slot_step_minutes: DEFAULT_STEP_MINUTES,
            working_hours: WorkingHours::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.slot_step_minutes == 0 {
            anyhow::bail!("slot_step_minutes must be greater than zero");
        }
        self.working_hours.validate()?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn full_file_overrides_everything() {
        let config = Config::from_toml(
            r#"
            timezone = "Europe/Madrid"
            time_parsing = "strict"
            slot_step_minutes = 15

            [working_hours]
            days = ["sat"]
            start = "10:00"
            end = "14:00"
            "#,
        )
        .unwrap();

        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Madrid);
        assert_eq!(config.time_parsing, TimeParsing::Strict);
        assert_eq!(config.slot_step_minutes, 15);
        assert_eq!(config.working_hours.days, vec![Weekday::Sat]);
    }

    #[test]
    fn partial_working_hours_keep_default_days() {
        let config = Config::from_toml("[working_hours]\nstart = \"10:00\"\nend = \"14:00\"").unwrap();

        let defaults = WorkingHours::default();
        assert_eq!(config.working_hours.days, defaults.days);
        assert_eq!(config.working_hours.start.to_string(), "10:00");
        assert_eq!(config.working_hours.end.to_string(), "14:00");
        assert_eq!(config.slot_step_minutes, Config::default().slot_step_minutes);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Config::from_toml(r#"timezone = "Mars/Olympus""#).is_err());
        assert!(Config::from_toml("slot_step_minutes = 0").is_err());
        assert!(Config::from_toml("unknown_key = 1").is_err());
        assert!(Config::from_toml(
            "[working_hours]\ndays = [\"mon\"]\nstart = \"12:00\"\nend = \"11:00\""
        )
        .is_err());
    }
}
