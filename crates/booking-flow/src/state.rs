//! The booking step machine.
//!
//! An explicit tagged union rather than a step counter: a flow can only sit
//! in one of these states, and every transition goes through a method that
//! checks the current state, so jumping across steps is unrepresentable.

use booking_client::BookingConfirmation;

/// Where a booking attempt currently stands.
///
/// Forward path:
/// `SelectingServices → SelectingStaff → SelectingDateTime → EnteringDetails
/// → Reviewing → Submitting → Confirmed`, with `Submitting` falling back to
/// `SelectingDateTime` on a slot conflict or to `Reviewing` on any other
/// failure. `Confirmed` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingStep {
    SelectingServices,
    SelectingStaff,
    SelectingDateTime,
    EnteringDetails,
    Reviewing,
    Submitting,
    Confirmed(BookingConfirmation),
}

impl BookingStep {
    /// The step backward navigation returns to, if any.
    ///
    /// `Submitting` and `Confirmed` are not navigable.
    pub fn prior(&self) -> Option<BookingStep> {
        match self {
            Self::SelectingServices => None,
            Self::SelectingStaff => Some(Self::SelectingServices),
            Self::SelectingDateTime => Some(Self::SelectingStaff),
            Self::EnteringDetails => Some(Self::SelectingDateTime),
            Self::Reviewing => Some(Self::EnteringDetails),
            Self::Submitting => None,
            Self::Confirmed(_) => None,
        }
    }

    /// Whether the flow has reached its terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Step name for error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectingServices => "selecting-services",
            Self::SelectingStaff => "selecting-staff",
            Self::SelectingDateTime => "selecting-date-time",
            Self::EnteringDetails => "entering-details",
            Self::Reviewing => "reviewing",
            Self::Submitting => "submitting",
            Self::Confirmed(_) => "confirmed",
        }
    }
}
