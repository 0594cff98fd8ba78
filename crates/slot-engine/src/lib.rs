//! # slot-engine
//!
//! Appointment overlap checks and bookable-slot resolution for practitioner
//! calendars.
//!
//! The core is a pure predicate: given a candidate appointment and the
//! non-cancelled appointments a professional already has on that day, does the
//! candidate overlap any of them? Around it sit the pieces a booking form needs
//! to offer start times: working hours, availability blocks, and slot listing.
//!
//! ```
//! use slot_engine::{has_conflict, AppointmentSlot};
//!
//! let existing = vec![AppointmentSlot::new("09:30", 30)];
//!
//! assert!(!has_conflict(&AppointmentSlot::new("09:00", 30), &existing));
//! assert!(has_conflict(&AppointmentSlot::new("09:00", 45), &existing));
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM[:SS]` strings → minutes since midnight (lenient and strict)
//! - [`conflict`] — Half-open interval overlap checks against existing slots
//! - [`appointment`] — Booking records and the active-slot filter
//! - [`schedule`] — Working days and hours
//! - [`blocks`] — Availability blocks
//! - [`slots`] — Bookable start times for a day
//! - [`error`] — Error types

pub mod appointment;
pub mod blocks;
pub mod conflict;
pub mod error;
pub mod schedule;
pub mod slots;
pub mod time;

pub use appointment::{active_slots_for, AppointmentStatus, BookedAppointment};
pub use blocks::AvailabilityBlock;
pub use conflict::{
    find_conflicts, has_conflict, try_has_conflict, AppointmentSlot, Conflict, SlotInterval,
};
pub use error::SlotError;
pub use schedule::WorkingHours;
pub use slots::{bookable_slots, first_bookable_slot, SlotQuery};
pub use time::{minutes_since_midnight, TimeOfDay, TimeParsing};
