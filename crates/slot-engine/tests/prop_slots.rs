//! Property-based tests for slot generation using proptest.
//!
//! These verify invariants that should hold for *any* schedule input, not
//! just the specific fixtures in `slots_tests.rs`.

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use slot_engine::intervals::minute_of;
use slot_engine::schedule::{
    Appointment, AppointmentStatus, Break, BreakKind, DayHours, Service, WorkingHours,
};
use slot_engine::slots::{generate_slots, StaffDay};

// ---------------------------------------------------------------------------
// Strategies — generate schedule components
// ---------------------------------------------------------------------------

/// A working window somewhere in 06:00-22:00, at least one hour long.
fn arb_window() -> impl Strategy<Value = (u32, u32)> {
    (360u32..=1200, 60u32..=600)
        .prop_map(|(start, len)| (start, (start + len).min(1320)))
        .prop_filter("window must be non-empty", |(start, end)| start < end)
}

/// A blocked range inside the day, 15 minutes to 3 hours long.
fn arb_blocked() -> impl Strategy<Value = (u32, u32)> {
    (360u32..=1200, 15u32..=180).prop_map(|(start, len)| (start, start + len))
}

fn arb_duration() -> impl Strategy<Value = u32> {
    prop_oneof![Just(15u32), Just(30), Just(45), Just(60), Just(90), Just(120)]
}

fn arb_granularity() -> impl Strategy<Value = u32> {
    prop_oneof![Just(10u32), Just(15), Just(20), Just(30), Just(60)]
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn time_at(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap()
}

fn week(open: u32, close: u32) -> WorkingHours {
    let day = DayHours {
        open: time_at(open),
        close: time_at(close),
        is_open: true,
    };
    WorkingHours {
        monday: day,
        tuesday: day,
        wednesday: day,
        thursday: day,
        friday: day,
        saturday: day,
        sunday: day,
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
}

// ---------------------------------------------------------------------------
// Property 1: slots are sorted chronologically with no duplicates
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_sorted_and_unique(
        (open, close) in arb_window(),
        duration in arb_duration(),
        granularity in arb_granularity(),
    ) {
        let salon = week(open, close);
        let staff = week(open, close);
        let day = StaffDay {
            date: fixed_date(),
            salon_hours: &salon,
            staff_hours: &staff,
            breaks: &[],
            vacations: &[],
            appointments: &[],
        };
        let services = [Service { id: 1, duration, price: 10.0, discount_price: None }];

        let slots = generate_slots(&day, &services, granularity);

        for window in slots.windows(2) {
            prop_assert!(
                window[0] < window[1],
                "slots not strictly ascending: {:?} then {:?}",
                window[0],
                window[1]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: every slot fits inside working hours
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_fit_inside_working_hours(
        (open, close) in arb_window(),
        duration in arb_duration(),
        granularity in arb_granularity(),
    ) {
        let salon = week(open, close);
        let staff = week(open, close);
        let day = StaffDay {
            date: fixed_date(),
            salon_hours: &salon,
            staff_hours: &staff,
            breaks: &[],
            vacations: &[],
            appointments: &[],
        };
        let services = [Service { id: 1, duration, price: 10.0, discount_price: None }];

        for slot in generate_slots(&day, &services, granularity) {
            let start = minute_of(slot);
            prop_assert!(start >= open, "slot {:?} starts before opening", slot);
            prop_assert!(
                start + duration <= close,
                "slot {:?} + {}min extends past closing",
                slot,
                duration
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: slots are aligned to the granularity grid from the open time
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_aligned_to_granularity(
        (open, close) in arb_window(),
        duration in arb_duration(),
        granularity in arb_granularity(),
    ) {
        let salon = week(open, close);
        let staff = week(open, close);
        let day = StaffDay {
            date: fixed_date(),
            salon_hours: &salon,
            staff_hours: &staff,
            breaks: &[],
            vacations: &[],
            appointments: &[],
        };
        let services = [Service { id: 1, duration, price: 10.0, discount_price: None }];

        for slot in generate_slots(&day, &services, granularity) {
            let offset = minute_of(slot) - open;
            prop_assert_eq!(
                offset % granularity,
                0,
                "slot {:?} is off the {}-minute grid anchored at open",
                slot,
                granularity
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: no slot overlaps a break or a blocking appointment
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_never_overlap_blocked_time(
        (open, close) in arb_window(),
        (break_start, break_end) in arb_blocked(),
        (appt_start, appt_end) in arb_blocked(),
        duration in arb_duration(),
        granularity in arb_granularity(),
    ) {
        let salon = week(open, close);
        let staff = week(open, close);
        let breaks = [Break {
            kind: BreakKind::Daily,
            start_time: time_at(break_start),
            end_time: time_at(break_end.min(1439)),
            days: Vec::new(),
            date: None,
            start_date: None,
            end_date: None,
            is_active: true,
        }];
        let appointments = [Appointment {
            start_time: time_at(appt_start),
            end_time: time_at(appt_end.min(1439)),
            status: AppointmentStatus::Confirmed,
        }];
        let day = StaffDay {
            date: fixed_date(),
            salon_hours: &salon,
            staff_hours: &staff,
            breaks: &breaks,
            vacations: &[],
            appointments: &appointments,
        };
        let services = [Service { id: 1, duration, price: 10.0, discount_price: None }];

        for slot in generate_slots(&day, &services, granularity) {
            let start = minute_of(slot);
            let end = start + duration;
            for &(bs, be) in &[(break_start, break_end.min(1439)), (appt_start, appt_end.min(1439))] {
                prop_assert!(
                    end <= bs || be <= start,
                    "slot [{}, {}) overlaps blocked [{}, {})",
                    start,
                    end,
                    bs,
                    be
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: generation never panics on arbitrary inputs
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn generation_never_panics(
        (open, close) in arb_window(),
        (break_start, break_end) in arb_blocked(),
        duration in 0u32..=300,
        granularity in 0u32..=90,
    ) {
        let salon = week(open, close);
        let staff = week(open, close);
        let breaks = [Break {
            kind: BreakKind::Daily,
            start_time: time_at(break_start.min(1439)),
            end_time: time_at(break_end.min(1439)),
            days: Vec::new(),
            date: None,
            start_date: None,
            end_date: None,
            is_active: true,
        }];
        let day = StaffDay {
            date: fixed_date(),
            salon_hours: &salon,
            staff_hours: &staff,
            breaks: &breaks,
            vacations: &[],
            appointments: &[],
        };
        let services = [Service { id: 1, duration, price: 10.0, discount_price: None }];

        // An empty result is acceptable; a panic is not.
        let _slots = generate_slots(&day, &services, granularity);
    }
}
