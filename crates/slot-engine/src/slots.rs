//! Slot generation: enumerate bookable start times on a single day.
//!
//! The open time of a day is the intersection of salon and staff working
//! hours minus breaks, vacations and existing appointments. Candidate start
//! times step through the day window on a fixed granularity; a candidate is
//! a valid slot when the full service duration fits inside one open
//! sub-interval.
//!
//! In the online system this computation is server-delegated (the server
//! holds the authoritative appointment book); this module is the
//! offline-capable reference used by the widget preview and by tests.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::intervals::{self, MinuteSpan};
use crate::schedule::{effective_duration, Appointment, Break, Service, Vacation, WorkingHours};

/// Default slot granularity in minutes.
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;

/// Everything known about one staff member's calendar date.
///
/// `breaks` carries both salon-level and staff-level breaks, pre-combined by
/// the caller; likewise `vacations`. `appointments` are the existing bookings
/// for this staff member on `date`.
#[derive(Debug, Clone)]
pub struct StaffDay<'a> {
    pub date: NaiveDate,
    pub salon_hours: &'a WorkingHours,
    pub staff_hours: &'a WorkingHours,
    pub breaks: &'a [Break],
    pub vacations: &'a [Vacation],
    pub appointments: &'a [Appointment],
}

impl StaffDay<'_> {
    /// The bookable day window: salon hours intersected with staff hours.
    ///
    /// Staff hours are not assumed to be contained in salon hours. Returns
    /// `None` when either side is closed or the intersection is empty.
    fn day_window(&self) -> Option<MinuteSpan> {
        let salon = self.salon_hours.day(self.date.weekday());
        let staff = self.staff_hours.day(self.date.weekday());
        if !salon.is_open || !staff.is_open {
            return None;
        }
        let salon_span = MinuteSpan::from_times(salon.open, salon.close)?;
        let staff_span = MinuteSpan::from_times(staff.open, staff.close)?;
        salon_span.intersect(staff_span)
    }

    /// Spans blocked by breaks applying on this date and by time-blocking
    /// appointments.
    fn blocked_spans(&self) -> Vec<MinuteSpan> {
        let break_spans = self
            .breaks
            .iter()
            .filter(|b| b.applies_on(self.date))
            .filter_map(|b| MinuteSpan::from_times(b.start_time, b.end_time));
        let appointment_spans = self
            .appointments
            .iter()
            .filter(|a| a.status.blocks_time())
            .filter_map(|a| MinuteSpan::from_times(a.start_time, a.end_time));
        break_spans.chain(appointment_spans).collect()
    }
}

/// Enumerate bookable start times for a service selection on a staff day.
///
/// Candidates step from the day window's opening time every
/// `granularity_minutes`; a candidate is emitted when
/// `[candidate, candidate + effective_duration)` lies entirely inside one
/// open sub-interval. The last candidate must still leave room for the full
/// duration before closing time.
///
/// Returns an empty list when the effective duration is zero, any active
/// vacation covers the date, either working-hours side is closed, or no
/// candidate fits. Output is chronological with no duplicates.
pub fn generate_slots(
    day: &StaffDay,
    services: &[Service],
    granularity_minutes: u32,
) -> Vec<NaiveTime> {
    let duration = effective_duration(services);
    if duration == 0 || granularity_minutes == 0 {
        return Vec::new();
    }

    // A vacation day has zero slots regardless of working hours.
    if day.vacations.iter().any(|v| v.covers(day.date)) {
        return Vec::new();
    }

    let Some(window) = day.day_window() else {
        return Vec::new();
    };

    let open = intervals::subtract(window, day.blocked_spans());

    let mut slots = Vec::new();
    let mut candidate = window.start;
    while candidate + duration <= window.end {
        let wanted = MinuteSpan {
            start: candidate,
            end: candidate + duration,
        };
        if open.iter().any(|span| span.contains(wanted)) {
            slots.push(time_at(candidate));
        }
        candidate += granularity_minutes;
    }

    slots
}

/// The earliest bookable start time, if any.
///
/// Convenience for callers that only need a has-any-slot answer for a date.
pub fn first_slot(
    day: &StaffDay,
    services: &[Service],
    granularity_minutes: u32,
) -> Option<NaiveTime> {
    generate_slots(day, services, granularity_minutes)
        .into_iter()
        .next()
}

fn time_at(minute: u32) -> NaiveTime {
    // Minutes within a day by construction (candidate < window.end <= 1440).
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN)
}
