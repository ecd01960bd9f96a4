//! Tests for schedule domain types: break recurrence, vacations, effective
//! duration and the wire time format.

use chrono::{NaiveDate, NaiveTime};
use slot_engine::schedule::{
    format_hhmm, parse_hhmm, Appointment, AppointmentStatus, Break, BreakKind, Service, Vacation,
};
use slot_engine::effective_duration;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn break_base(kind: BreakKind) -> Break {
    Break {
        kind,
        start_time: time(12, 0),
        end_time: time(13, 0),
        days: Vec::new(),
        date: None,
        start_date: None,
        end_date: None,
        is_active: true,
    }
}

// ── Break recurrence ────────────────────────────────────────────────────────

#[test]
fn daily_break_applies_every_day() {
    let b = break_base(BreakKind::Daily);

    assert!(b.applies_on(date(2025, 6, 16))); // Monday
    assert!(b.applies_on(date(2025, 6, 21))); // Saturday
}

#[test]
fn weekly_break_applies_on_listed_days_only() {
    let mut b = break_base(BreakKind::Weekly);
    b.days = vec!["monday".to_string(), "wednesday".to_string()];

    assert!(b.applies_on(date(2025, 6, 16))); // Monday
    assert!(b.applies_on(date(2025, 6, 18))); // Wednesday
    assert!(!b.applies_on(date(2025, 6, 17))); // Tuesday
}

#[test]
fn weekly_break_with_no_days_applies_nowhere() {
    let b = break_base(BreakKind::Weekly);

    assert!(!b.applies_on(date(2025, 6, 16)));
}

#[test]
fn specific_date_break_applies_on_that_date_only() {
    let mut b = break_base(BreakKind::SpecificDate);
    b.date = Some(date(2025, 6, 20));

    assert!(b.applies_on(date(2025, 6, 20)));
    assert!(!b.applies_on(date(2025, 6, 21)));
}

#[test]
fn date_range_break_bounds_are_inclusive() {
    let mut b = break_base(BreakKind::DateRange);
    b.start_date = Some(date(2025, 6, 10));
    b.end_date = Some(date(2025, 6, 12));

    assert!(!b.applies_on(date(2025, 6, 9)));
    assert!(b.applies_on(date(2025, 6, 10)));
    assert!(b.applies_on(date(2025, 6, 12)));
    assert!(!b.applies_on(date(2025, 6, 13)));
}

#[test]
fn inactive_break_never_applies() {
    let mut b = break_base(BreakKind::Daily);
    b.is_active = false;

    assert!(!b.applies_on(date(2025, 6, 16)));
}

// ── Vacations ───────────────────────────────────────────────────────────────

#[test]
fn vacation_covers_inclusive_range() {
    let v = Vacation {
        start_date: date(2025, 7, 1),
        end_date: date(2025, 7, 14),
        is_active: true,
    };

    assert!(v.covers(date(2025, 7, 1)));
    assert!(v.covers(date(2025, 7, 14)));
    assert!(!v.covers(date(2025, 6, 30)));
    assert!(!v.covers(date(2025, 7, 15)));
}

#[test]
fn inactive_vacation_covers_nothing() {
    let v = Vacation {
        start_date: date(2025, 7, 1),
        end_date: date(2025, 7, 14),
        is_active: false,
    };

    assert!(!v.covers(date(2025, 7, 7)));
}

// ── Effective duration ──────────────────────────────────────────────────────

#[test]
fn effective_duration_sums_service_durations() {
    let services = vec![
        Service { id: 1, duration: 30, price: 25.0, discount_price: None },
        Service { id: 2, duration: 45, price: 40.0, discount_price: Some(35.0) },
    ];

    assert_eq!(effective_duration(&services), 75);
}

#[test]
fn zero_duration_addons_contribute_no_time() {
    // One 0-minute addon plus one 30-minute service → effective 30.
    let services = vec![
        Service { id: 9, duration: 0, price: 5.0, discount_price: None },
        Service { id: 1, duration: 30, price: 25.0, discount_price: None },
    ];

    assert_eq!(effective_duration(&services), 30);
}

// ── Appointment status ──────────────────────────────────────────────────────

#[test]
fn pending_and_confirmed_block_time() {
    assert!(AppointmentStatus::Pending.blocks_time());
    assert!(AppointmentStatus::Confirmed.blocks_time());
    assert!(!AppointmentStatus::Cancelled.blocks_time());
    assert!(!AppointmentStatus::Completed.blocks_time());
}

// ── Wire time format ────────────────────────────────────────────────────────

#[test]
fn parse_and_format_hhmm_roundtrip() {
    let t = parse_hhmm("09:30").unwrap();
    assert_eq!(t, time(9, 30));
    assert_eq!(format_hhmm(t), "09:30");
}

#[test]
fn parse_hhmm_rejects_garbage() {
    assert!(parse_hhmm("930").is_err());
    assert!(parse_hhmm("25:00").is_err());
    assert!(parse_hhmm("").is_err());
}

#[test]
fn break_deserializes_from_wire_json() {
    let json = r#"{
        "type": "weekly",
        "start_time": "12:00",
        "end_time": "12:30",
        "days": ["monday", "friday"],
        "is_active": true
    }"#;

    let b: Break = serde_json::from_str(json).unwrap();
    assert_eq!(b.kind, BreakKind::Weekly);
    assert_eq!(b.start_time, time(12, 0));
    assert!(b.applies_on(date(2025, 6, 20))); // Friday
}

#[test]
fn appointment_deserializes_from_wire_json() {
    let json = r#"{ "start_time": "10:00", "end_time": "10:45", "status": "confirmed" }"#;

    let a: Appointment = serde_json::from_str(json).unwrap();
    assert_eq!(a.status, AppointmentStatus::Confirmed);
    assert_eq!(a.end_time, time(10, 45));
}
