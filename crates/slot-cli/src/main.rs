//! `slotcheck` CLI — check appointment overlaps and list bookable slots.
//!
//! ## Usage
//!
//! ```sh
//! # Normalize a time string to minutes since midnight
//! slotcheck normalize 09:30
//!
//! # Check a candidate against the day's appointments (stdin → stdout)
//! echo '[{"appointment_time":"09:30","duration_minutes":30}]' \
//!   | slotcheck check --time 09:00 --duration 45
//!
//! # Same, reading from a file and printing every overlap
//! slotcheck check --time 09:00 --duration 45 -i existing.json --details
//!
//! # List bookable start times for a professional on a day
//! slotcheck --config practice.toml slots --date 2026-03-16 --duration 60 -i day.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

mod config;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use clap::{ArgAction, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use slot_engine::{
    active_slots_for, AppointmentSlot, AvailabilityBlock, BookedAppointment, Conflict, SlotQuery,
    TimeOfDay, TimeParsing,
};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "slotcheck",
    version,
    about = "Appointment overlap checks and bookable-slot listing"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true, env = "SLOTCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the minutes since midnight for a time string
    Normalize {
        /// Time in HH:MM or HH:MM:SS form
        time: String,
        /// Reject malformed times instead of treating bad parts as zero
        #[arg(long)]
        strict: bool,
    },
    /// Check whether a candidate appointment overlaps existing ones
    Check {
        /// Candidate start time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: String,
        /// Candidate length in minutes
        #[arg(long, default_value_t = 0)]
        duration: u32,
        /// JSON array of existing appointments (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reject malformed times instead of treating bad parts as zero
        #[arg(long)]
        strict: bool,
        /// Print every overlapping appointment as JSON
        #[arg(long)]
        details: bool,
    },
    /// List the start times still bookable on a day
    Slots {
        /// Day to resolve (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Appointment length in minutes
        #[arg(long)]
        duration: u32,
        /// Minutes between candidate start times (overrides the config file)
        #[arg(long)]
        step: Option<u32>,
        /// Day JSON with appointments and blocks (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Professional whose calendar is resolved (overrides the input file)
        #[arg(long)]
        professional: Option<String>,
        /// Drop start times that have already passed in the configured timezone
        #[arg(long)]
        hide_past: bool,
        /// Reference instant for --hide-past (RFC 3339), defaults to now
        #[arg(long, hide = true)]
        now: Option<String>,
    },
}

/// Input accepted by `slotcheck slots`.
#[derive(Debug, Deserialize)]
struct DayInput {
    #[serde(default)]
    professional_id: Option<String>,
    #[serde(default)]
    appointments: Vec<BookedAppointment>,
    #[serde(default)]
    blocks: Vec<AvailabilityBlock>,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    conflict: bool,
    conflicts: &'a [Conflict],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize { time, strict } => {
            let policy = parsing_policy(strict, &config);
            let minutes = policy
                .minutes(&time)
                .with_context(|| format!("Failed to normalize '{}'", time))?;
            println!("{}", minutes);
        }
        Commands::Check {
            time,
            duration,
            input,
            strict,
            details,
        } => {
            let raw = read_input(input.as_deref())?;
            let existing: Vec<AppointmentSlot> =
                serde_json::from_str(&raw).context("Failed to parse existing appointments JSON")?;
            let candidate = AppointmentSlot::new(time, duration);
            let policy = parsing_policy(strict, &config);

            let conflict = slot_engine::try_has_conflict(&candidate, &existing, policy)
                .context("Failed to check candidate appointment")?;
            tracing::info!(
                time = %candidate.appointment_time,
                duration,
                existing = existing.len(),
                conflict,
                "checked candidate"
            );

            if details {
                let conflicts = slot_engine::find_conflicts(&candidate, &existing);
                let report = CheckReport {
                    conflict,
                    conflicts: &conflicts,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", if conflict { "conflict" } else { "available" });
            }
        }
        Commands::Slots {
            date,
            duration,
            step,
            input,
            professional,
            hide_past,
            now,
        } => {
            let raw = read_input(input.as_deref())?;
            let day: DayInput = serde_json::from_str(&raw).context("Failed to parse day JSON")?;

            let professional = professional
                .or(day.professional_id)
                .context("No professional given: pass --professional or set professional_id in the input")?;
            let existing = active_slots_for(&day.appointments, &professional, date);
            let policy = config.time_parsing;
            for slot in &existing {
                slot.try_interval(policy)
                    .with_context(|| format!("Bad appointment for {} on {}", professional, date))?;
            }

            let mut query = SlotQuery::new(date, duration)
                .with_step(step.unwrap_or(config.slot_step_minutes));
            query.validate().context("Invalid slot query")?;
            if hide_past {
                let now = reference_now(now.as_deref())?;
                match cutoff(&config, date, now)? {
                    Cutoff::Open => {}
                    Cutoff::From(time) => query = query.with_not_before(time),
                    Cutoff::Past => {
                        tracing::info!(%date, "date is in the past, nothing to offer");
                        return Ok(());
                    }
                }
            }

            let slots = slot_engine::bookable_slots(
                &config.working_hours,
                &query,
                &existing,
                &day.blocks,
            )
            .context("Failed to resolve bookable slots")?;

            for slot in slots {
                println!("{}", slot);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// `--strict` wins over the configured policy.
fn parsing_policy(strict: bool, config: &Config) -> TimeParsing {
    if strict {
        TimeParsing::Strict
    } else {
        config.time_parsing
    }
}

fn reference_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now timestamp: {}", raw)),
        None => Ok(Utc::now()),
    }
}

/// How much of `date` is still in the future at `now`.
enum Cutoff {
    Open,
    From(TimeOfDay),
    Past,
}

fn cutoff(config: &Config, date: NaiveDate, now: DateTime<Utc>) -> Result<Cutoff> {
    let local = now.with_timezone(&config.tz()?);
    let today = local.date_naive();

    Ok(if date > today {
        Cutoff::Open
    } else if date < today {
        Cutoff::Past
    } else {
        Cutoff::From(TimeOfDay::from_hm(local.hour(), local.minute())?)
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
