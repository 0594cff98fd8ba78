//! Tests for working hours, availability blocks and the active-slot filter.

use chrono::{NaiveDate, Weekday};
use slot_engine::appointment::active_slots_for;
use slot_engine::blocks::blocked_intervals;
use slot_engine::{
    AppointmentSlot, AppointmentStatus, AvailabilityBlock, BookedAppointment, SlotError,
    SlotInterval, TimeOfDay, WorkingHours,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn booked(
    professional: &str,
    day: &str,
    time: &str,
    minutes: u32,
    status: AppointmentStatus,
) -> BookedAppointment {
    BookedAppointment {
        professional_id: professional.to_string(),
        date: date(day),
        appointment_time: time.to_string(),
        duration_minutes: minutes,
        status,
    }
}

// ── Working hours ───────────────────────────────────────────────────────────

#[test]
fn default_hours_are_weekdays_nine_to_six() {
    let hours = WorkingHours::default();
    // 2026-03-16 is a Monday, 2026-03-21 a Saturday.
    assert_eq!(hours.window_for(date("2026-03-16")), Some(SlotInterval::new(540, 1080)));
    assert_eq!(hours.window_for(date("2026-03-21")), None);
    assert!(hours.validate().is_ok());
}

#[test]
fn empty_or_inverted_hours_are_rejected() {
    let no_days = WorkingHours {
        days: vec![],
        ..WorkingHours::default()
    };
    assert!(matches!(no_days.validate(), Err(SlotError::InvalidSchedule(_))));

    let inverted = WorkingHours {
        days: vec![Weekday::Sat],
        start: t("18:00"),
        end: t("09:00"),
    };
    assert!(matches!(inverted.validate(), Err(SlotError::InvalidSchedule(_))));
}

#[test]
fn hours_deserialize_from_weekday_names() {
    let hours: WorkingHours = serde_json::from_str(
        r#"{"days":["sat","Sunday"],"start":"10:00","end":"14:30"}"#,
    )
    .unwrap();
    assert_eq!(hours.days, vec![Weekday::Sat, Weekday::Sun]);
    assert!(hours.is_working_day(date("2026-03-22")));
    assert!(!hours.is_working_day(date("2026-03-23")));

    let json = serde_json::to_string(&hours).unwrap();
    assert!(json.contains(r#""days":["sat","sun"]"#), "got {json}");
}

#[test]
fn partial_hours_fill_missing_fields_with_defaults() {
    let hours: WorkingHours =
        serde_json::from_str(r#"{"start":"10:00","end":"14:00"}"#).unwrap();
    assert_eq!(hours.days, WorkingHours::default().days);
    assert_eq!(hours.start, t("10:00"));
    assert_eq!(hours.end, t("14:00"));

    let saturdays: WorkingHours = serde_json::from_str(r#"{"days":["sat"]}"#).unwrap();
    assert_eq!(saturdays.days, vec![Weekday::Sat]);
    assert_eq!(saturdays.start, t("09:00"));
    assert_eq!(saturdays.end, t("18:00"));
}

#[test]
fn unknown_weekday_name_is_an_error() {
    let result: Result<WorkingHours, _> =
        serde_json::from_str(r#"{"days":["someday"],"start":"10:00","end":"14:00"}"#);
    assert!(result.is_err());
}

// ── Availability blocks ─────────────────────────────────────────────────────

#[test]
fn all_day_block_covers_whole_day() {
    let block = AvailabilityBlock::all_day(date("2026-03-16"));
    assert!(block.is_all_day());
    assert_eq!(block.interval(), Ok(SlotInterval::new(0, 1440)));
}

#[test]
fn partial_block_needs_both_bounds_in_order() {
    let day = date("2026-03-16");
    let half = AvailabilityBlock {
        start_time: Some(t("12:00")),
        ..AvailabilityBlock::all_day(day)
    };
    assert!(matches!(half.interval(), Err(SlotError::InvalidBlock(_))));

    let backwards = AvailabilityBlock::between(day, t("14:00"), t("13:00"));
    assert!(matches!(backwards.interval(), Err(SlotError::InvalidBlock(_))));
}

#[test]
fn blocked_intervals_only_include_the_requested_day() {
    let blocks = vec![
        AvailabilityBlock::between(date("2026-03-16"), t("12:00"), t("13:00")),
        AvailabilityBlock::all_day(date("2026-03-17")),
        AvailabilityBlock::between(date("2026-03-16"), t("17:00"), t("18:00")),
    ];
    let intervals = blocked_intervals(&blocks, date("2026-03-16")).unwrap();
    assert_eq!(intervals, vec![SlotInterval::new(720, 780), SlotInterval::new(1020, 1080)]);
}

#[test]
fn malformed_block_on_other_day_is_ignored() {
    let blocks = vec![AvailabilityBlock::between(date("2026-03-17"), t("14:00"), t("13:00"))];
    assert_eq!(blocked_intervals(&blocks, date("2026-03-16")), Ok(vec![]));
}

// ── Active-slot filter ──────────────────────────────────────────────────────

#[test]
fn active_slots_skip_cancelled_other_days_and_other_professionals() {
    let rows = vec![
        booked("ana", "2026-03-16", "09:00", 60, AppointmentStatus::Confirmed),
        booked("ana", "2026-03-16", "10:00", 60, AppointmentStatus::Cancelled),
        booked("ana", "2026-03-17", "11:00", 60, AppointmentStatus::Pending),
        booked("luis", "2026-03-16", "12:00", 60, AppointmentStatus::Pending),
        booked("ana", "2026-03-16", "13:00", 30, AppointmentStatus::Completed),
        booked("ana", "2026-03-16", "14:00", 30, AppointmentStatus::NoShow),
    ];

    let slots = active_slots_for(&rows, "ana", date("2026-03-16"));

    assert_eq!(
        slots,
        vec![
            AppointmentSlot::new("09:00", 60),
            AppointmentSlot::new("13:00", 30),
            AppointmentSlot::new("14:00", 30),
        ]
    );
}

#[test]
fn status_deserializes_snake_case_and_defaults_to_pending() {
    let row: BookedAppointment = serde_json::from_str(
        r#"{"professional_id":"ana","date":"2026-03-16","appointment_time":"09:00"}"#,
    )
    .unwrap();
    assert_eq!(row.status, AppointmentStatus::Pending);
    assert_eq!(row.duration_minutes, 0);

    let status: AppointmentStatus = serde_json::from_str(r#""no_show""#).unwrap();
    assert_eq!(status, AppointmentStatus::NoShow);
    assert!(status.is_active());
    assert!(!AppointmentStatus::Cancelled.is_active());
}
