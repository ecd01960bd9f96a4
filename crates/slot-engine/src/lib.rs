//! # slot-engine
//!
//! Appointment slot availability engine for salon booking clients.
//!
//! The same availability logic recurs in every client of the booking API —
//! the public web app, the staff dashboard, the embeddable widget. This
//! crate is that logic, once: pure functions over schedule snapshots, no
//! I/O, no clocks ("today" is always an explicit parameter).
//!
//! ## Modules
//!
//! - [`schedule`] — working hours, breaks, vacations, services, appointments
//! - [`intervals`] — minute-resolution interval arithmetic
//! - [`slots`] — bookable start-time enumeration for a staff day
//! - [`calendar`] — month navigation and per-date open/closed classification
//! - [`error`] — error types

pub mod calendar;
pub mod error;
pub mod intervals;
pub mod schedule;
pub mod slots;

pub use calendar::{classify_month, DayStatus, MonthAvailability, MonthGrid, YearMonth};
pub use error::EngineError;
pub use schedule::{effective_duration, Break, Service, Vacation, WorkingHours};
pub use slots::{first_slot, generate_slots, StaffDay, DEFAULT_GRANULARITY_MINUTES};
