//! # booking-flow
//!
//! The booking state machine shared by every interactive client of the
//! booking API: step progression, guest validation, month/slot request
//! lifecycle with stale-response discard, and the conflict rollback that
//! returns the user to time selection when their slot is booked from under
//! them.
//!
//! All network access goes through the [`booking_client::BookingApi`] trait,
//! so the flow is tested against an in-memory fake.

pub mod details;
pub mod flow;
pub mod state;

pub use details::{FieldError, GuestDetails, MIN_NAME_LEN, MIN_PHONE_LEN};
pub use flow::{BookingFlow, FlowError, MonthState, SalonContext, SlotsState, SubmitOutcome};
pub use state::BookingStep;
