//! Calendar month model: navigation, authoritative availability overlay and
//! per-day classification.
//!
//! Before the server's month-availability response arrives, a date grid is
//! classified by a coarse heuristic (salon weekday hours only). Once loaded,
//! the authoritative response fully replaces the heuristic: a date the
//! server lists as available is open, every other date of the month is
//! closed. Past dates are always disabled, whatever the data says.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::schedule::WorkingHours;

/// A calendar month, `month` in 1-12.
///
/// Wire representation is `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following month, rolling December into January of the next year.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month, rolling January into December of the prior year.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        // Valid by the 1-12 invariant upheld at construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (leap-year aware).
    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month.
    pub fn day_count(self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidMonthString(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

/// The server's authoritative per-date availability for one month.
///
/// Classification over this overlay is total: a date of the month absent
/// from both sets is treated as unavailable (fail safe toward "no slots"
/// rather than falsely implying availability).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAvailability {
    pub available: BTreeSet<NaiveDate>,
    pub unavailable: BTreeSet<NaiveDate>,
}

impl MonthAvailability {
    pub fn from_lists(available: Vec<NaiveDate>, unavailable: Vec<NaiveDate>) -> Self {
        Self {
            available: available.into_iter().collect(),
            unavailable: unavailable.into_iter().collect(),
        }
    }

    /// Whether the server marked this date bookable.
    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.available.contains(&date)
    }
}

/// What produced a month grid's open/closed states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilitySource {
    /// Salon weekday hours only — coarse, used until the server responds.
    Heuristic,
    /// The server's month-availability response.
    Authoritative,
}

/// Rendered state of one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// Strictly before today. Always disabled, styled apart from `Closed`.
    Past,
    /// No bookable slots (heuristically closed weekday, or not listed as
    /// available by the server).
    Closed,
    /// At least one bookable slot (heuristically open weekday, or listed as
    /// available by the server).
    Open,
}

/// One cell of the date grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub is_today: bool,
}

/// A fully classified month of day cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub source: AvailabilitySource,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// The cell for `date`, if it belongs to this month.
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.date == date)
    }
}

/// Classify every date of a month as past / closed / open.
///
/// With `authoritative` data the server response fully replaces the
/// heuristic: open iff listed available, closed otherwise. Without it, a
/// date is open iff the salon's weekday `is_open` flag is set — the
/// heuristic deliberately ignores staff hours and breaks so the grid renders
/// before any per-staff data loads.
///
/// Dates strictly before `today` are `Past` regardless of either source.
pub fn classify_month(
    month: YearMonth,
    today: NaiveDate,
    salon_hours: &WorkingHours,
    authoritative: Option<&MonthAvailability>,
) -> MonthGrid {
    let source = match authoritative {
        Some(_) => AvailabilitySource::Authoritative,
        None => AvailabilitySource::Heuristic,
    };

    let mut cells = Vec::with_capacity(month.day_count() as usize);
    let mut date = month.first_day();
    let last = month.last_day();

    while date <= last {
        let status = if date < today {
            DayStatus::Past
        } else {
            let open = match authoritative {
                Some(overlay) => overlay.is_available(date),
                None => salon_hours.day(date.weekday()).is_open,
            };
            if open {
                DayStatus::Open
            } else {
                DayStatus::Closed
            }
        };
        cells.push(DayCell {
            date,
            status,
            is_today: date == today,
        });
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    MonthGrid {
        month,
        source,
        cells,
    }
}
