//! Schedule domain types: working hours, breaks, vacations, services and
//! existing appointments.
//!
//! These are read-only snapshots of what the booking API returns per
//! month/day/staff query. The engine never mutates them; it only evaluates
//! them against a concrete calendar date.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One weekday's opening window.
///
/// `is_open == false` means the whole day is closed regardless of the
/// `open`/`close` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
    pub is_open: bool,
}

impl Default for DayHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::MIN,
            close: NaiveTime::MIN,
            is_open: false,
        }
    }
}

/// Weekly opening hours, one entry per weekday.
///
/// Applies at both salon level and staff level. Staff hours are usually a
/// refinement of salon hours, but callers must not rely on containment —
/// availability math always intersects the two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default)]
    pub monday: DayHours,
    #[serde(default)]
    pub tuesday: DayHours,
    #[serde(default)]
    pub wednesday: DayHours,
    #[serde(default)]
    pub thursday: DayHours,
    #[serde(default)]
    pub friday: DayHours,
    #[serde(default)]
    pub saturday: DayHours,
    #[serde(default)]
    pub sunday: DayHours,
}

impl WorkingHours {
    /// Look up the hours for a given weekday.
    pub fn day(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

/// Lowercase weekday name as used on the wire (`"monday"`..`"sunday"`).
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Recurrence kind of a [`Break`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    Daily,
    Weekly,
    SpecificDate,
    DateRange,
}

/// A recurring or one-off unavailability window within the working day.
///
/// Breaks apply to a single staff member or to the whole salon; the engine
/// receives the already-combined list for the queried staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Break {
    #[serde(rename = "type")]
    pub kind: BreakKind,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Weekday names for `Weekly` breaks (`"monday"`..`"sunday"`).
    #[serde(default)]
    pub days: Vec<String>,
    /// The single date of a `SpecificDate` break.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Inclusive range bounds of a `DateRange` break.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Break {
    /// Whether this break blocks time on the given calendar date.
    ///
    /// Inactive breaks never apply. A `Weekly` break with no listed days, or
    /// a `SpecificDate`/`DateRange` break with missing bounds, applies
    /// nowhere.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;

        if !self.is_active {
            return false;
        }
        match self.kind {
            BreakKind::Daily => true,
            BreakKind::Weekly => {
                let name = weekday_name(date.weekday());
                self.days.iter().any(|d| d == name)
            }
            BreakKind::SpecificDate => self.date == Some(date),
            BreakKind::DateRange => match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => start <= date && date <= end,
                _ => false,
            },
        }
    }
}

/// A date-range unavailability, stronger than a [`Break`]: a covered date has
/// zero slots regardless of working hours. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Vacation {
    /// Whether this vacation covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_active && self.start_date <= date && date <= self.end_date
    }
}

/// A bookable service.
///
/// `duration` may be 0 for addon services that consume no appointment time
/// but are still billable and selectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    /// Duration in minutes.
    pub duration: u32,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
}

/// Total appointment time required by a selection of services, in minutes.
///
/// Zero-duration addons contribute nothing but never invalidate the
/// selection.
pub fn effective_duration(services: &[Service]) -> u32 {
    services.iter().map(|s| s.duration).sum()
}

/// Status of an existing appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Whether an appointment in this status blocks its time range.
    pub fn blocks_time(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

/// An existing appointment on the queried day for the queried staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
}

fn default_active() -> bool {
    true
}

/// Parse a wire `"HH:MM"` string into a [`NaiveTime`].
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| EngineError::InvalidTime(s.to_string()))
}

/// Format a [`NaiveTime`] as the wire `"HH:MM"` representation.
pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Serde adapter for the wire time format `"HH:MM"`.
///
/// `chrono`'s default `NaiveTime` serde uses `HH:MM:SS`; the booking API
/// exchanges minute-resolution strings everywhere.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s).map_err(de::Error::custom)
    }
}
