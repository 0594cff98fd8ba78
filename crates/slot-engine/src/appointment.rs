//! Booking records as they come back from the appointments table.
//!
//! The overlap checker only ever sees non-cancelled slots of one professional on
//! one day. [`active_slots_for`] does that filtering for callers that fetched a
//! wider set of rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conflict::AppointmentSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Whether the appointment still occupies the professional's calendar.
    pub fn is_active(self) -> bool {
        self != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedAppointment {
    pub professional_id: String,
    pub date: NaiveDate,
    pub appointment_time: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl BookedAppointment {
    pub fn slot(&self) -> AppointmentSlot {
        AppointmentSlot::new(self.appointment_time.clone(), self.duration_minutes)
    }
}

/// Slots of the active appointments `professional_id` has on `date`.
pub fn active_slots_for(
    appointments: &[BookedAppointment],
    professional_id: &str,
    date: NaiveDate,
) -> Vec<AppointmentSlot> {
    appointments
        .iter()
        .filter(|a| a.professional_id == professional_id && a.date == date && a.status.is_active())
        .map(BookedAppointment::slot)
        .collect()
}
