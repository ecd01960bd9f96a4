//! The booking flow orchestrator.
//!
//! Owns the per-attempt state (selections, visible month, loaded
//! availability) and drives the remote API through the [`BookingApi`] seam.
//! The request lifecycle is split into `begin_*` / `apply_*` halves: the
//! begin half records what was asked for, the apply half commits a response
//! only if it still matches the current selection, so a response that
//! arrives after the user moved on is discarded rather than applied.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::{debug, warn};

use booking_client::{
    BookingApi, BookingRequest, ClientError, DateAvailabilityResponse, ServiceRef,
    ServiceSelection,
};
use slot_engine::calendar::{classify_month, MonthAvailability, MonthGrid, YearMonth};
use slot_engine::schedule::{format_hhmm, Service, WorkingHours};

use crate::details::{FieldError, GuestDetails};
use crate::state::BookingStep;

/// Salon-level snapshot taken from the bootstrap response.
#[derive(Debug, Clone)]
pub struct SalonContext {
    pub salon_id: i64,
    pub working_hours: WorkingHours,
    pub granularity_minutes: u32,
}

/// State of the month-availability overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthState {
    /// Nothing requested yet; the grid renders by weekday heuristic.
    Heuristic,
    /// A request is in flight; the heuristic keeps rendering meanwhile.
    Loading,
    /// The server response replaced the heuristic for this month.
    Authoritative(MonthAvailability),
    /// The request failed; the grid degrades to the heuristic rather than
    /// rendering blank.
    Failed,
}

/// State of the per-date slot list.
///
/// `Loaded` with an empty list means "nothing available" — a valid result,
/// deliberately distinct from `Failed` ("failed to load").
#[derive(Debug, Clone, PartialEq)]
pub enum SlotsState {
    Idle,
    Loading,
    Loaded(Vec<NaiveTime>),
    Failed,
}

/// Outcome of a booking submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Booked; the flow is now terminal.
    Confirmed(booking_client::BookingConfirmation),
    /// The slot was taken concurrently; the flow rolled back to date/time
    /// selection and already re-requested fresh slots.
    SlotTaken { message: String },
    /// Any other failure; the flow stays at the review step for a retry.
    Failed { message: String },
    /// A submission is already in flight; this call was a no-op.
    InFlight,
}

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Cannot {action} from the {step} step")]
    InvalidTransition {
        action: &'static str,
        step: &'static str,
    },

    #[error("Date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("Time {0} is not among the offered slots")]
    UnknownSlot(NaiveTime),

    #[error("Missing {0} selection")]
    Incomplete(&'static str),
}

pub type Result<T> = std::result::Result<T, FlowError>;

/// A single booking attempt against one salon.
///
/// "Today" is a snapshot taken at construction; the engine never reads a
/// system clock.
pub struct BookingFlow<A> {
    api: A,
    ctx: SalonContext,
    today: NaiveDate,
    step: BookingStep,
    services: Vec<Service>,
    staff_id: Option<i64>,
    details: GuestDetails,
    month: YearMonth,
    month_state: MonthState,
    selected_date: Option<NaiveDate>,
    selected_time: Option<NaiveTime>,
    slots: SlotsState,
    banner: Option<String>,
}

impl<A: BookingApi> BookingFlow<A> {
    pub fn new(api: A, ctx: SalonContext, today: NaiveDate) -> Self {
        Self {
            api,
            ctx,
            today,
            step: BookingStep::SelectingServices,
            services: Vec::new(),
            staff_id: None,
            details: GuestDetails::default(),
            month: YearMonth::of(today),
            month_state: MonthState::Heuristic,
            selected_date: None,
            selected_time: None,
            slots: SlotsState::Idle,
            banner: None,
        }
    }

    // ── Read access ────────────────────────────────────────────────────

    pub fn step(&self) -> &BookingStep {
        &self.step
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn staff_id(&self) -> Option<i64> {
        self.staff_id
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn month_state(&self) -> &MonthState {
        &self.month_state
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<NaiveTime> {
        self.selected_time
    }

    pub fn slots(&self) -> &SlotsState {
        &self.slots
    }

    /// The error banner shown above the current step, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Classify the visible month for rendering.
    ///
    /// Authoritative data is used once loaded; `Loading` and `Failed`
    /// render by the salon-hours heuristic so the grid is never blank.
    pub fn month_grid(&self) -> MonthGrid {
        let authoritative = match &self.month_state {
            MonthState::Authoritative(overlay) => Some(overlay),
            _ => None,
        };
        classify_month(self.month, self.today, &self.ctx.working_hours, authoritative)
    }

    // ── Service and staff selection ────────────────────────────────────

    pub fn set_services(&mut self, services: Vec<Service>) -> Result<()> {
        self.expect_step(&BookingStep::SelectingServices, "set services")?;
        self.services = services;
        Ok(())
    }

    /// Advance to staff selection; at least one service is required.
    pub fn confirm_services(&mut self) -> Result<()> {
        self.expect_step(&BookingStep::SelectingServices, "confirm services")?;
        if self.services.is_empty() {
            return Err(FlowError::Incomplete("service"));
        }
        self.step = BookingStep::SelectingStaff;
        Ok(())
    }

    /// Pick a staff member, advance to date/time selection and load the
    /// visible month's availability.
    pub async fn choose_staff(&mut self, staff_id: i64) -> Result<()> {
        self.expect_step(&BookingStep::SelectingStaff, "choose staff")?;
        self.staff_id = Some(staff_id);
        self.step = BookingStep::SelectingDateTime;
        self.load_month().await;
        Ok(())
    }

    // ── Month availability lifecycle ───────────────────────────────────

    /// Mark a month request as in flight and return its tag.
    ///
    /// Returns `None` — a deliberate no-op — unless a staff member and at
    /// least one service are selected: the server computes availability for
    /// a concrete duration and staff member, so an earlier request would be
    /// meaningless.
    pub fn begin_month_request(&mut self) -> Option<YearMonth> {
        if self.staff_id.is_none() || self.services.is_empty() {
            return None;
        }
        self.month_state = MonthState::Loading;
        Some(self.month)
    }

    /// Commit a month response, unless the user has navigated away from
    /// that month since the request was issued.
    pub fn apply_month_response(
        &mut self,
        month: YearMonth,
        result: booking_client::Result<DateAvailabilityResponse>,
    ) {
        if month != self.month {
            debug!("Discarding stale availability response for {}", month);
            return;
        }
        match result {
            Ok(resp) => {
                self.month_state = MonthState::Authoritative(MonthAvailability::from_lists(
                    resp.available_dates,
                    resp.unavailable_dates,
                ));
            }
            Err(err) => {
                warn!("Month availability load failed for {}: {}", month, err);
                self.month_state = MonthState::Failed;
            }
        }
    }

    /// Request and apply availability for the visible month.
    pub async fn load_month(&mut self) {
        let Some(month) = self.begin_month_request() else {
            return;
        };
        let staff_id = self.staff_id.unwrap_or_default();
        let selections = self.selections();
        let result = self.api.available_dates(staff_id, month, &selections).await;
        self.apply_month_response(month, result);
    }

    /// Show the following month. Resets the selected date and time, clears
    /// loaded slots, and re-requests availability.
    pub async fn next_month(&mut self) -> Result<()> {
        self.expect_step(&BookingStep::SelectingDateTime, "change month")?;
        self.month = self.month.next();
        self.reset_date_selection();
        self.load_month().await;
        Ok(())
    }

    /// Show the preceding month; same resets as [`Self::next_month`].
    pub async fn prev_month(&mut self) -> Result<()> {
        self.expect_step(&BookingStep::SelectingDateTime, "change month")?;
        self.month = self.month.prev();
        self.reset_date_selection();
        self.load_month().await;
        Ok(())
    }

    // ── Slot lifecycle ─────────────────────────────────────────────────

    /// Select a calendar date and request its slot list.
    ///
    /// The previously selected time and slot list are cleared before the
    /// request is issued, so a stale slot can never be carried across
    /// dates.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        self.expect_step(&BookingStep::SelectingDateTime, "select date")?;
        if date < self.today {
            return Err(FlowError::PastDate(date));
        }
        self.selected_date = Some(date);
        self.selected_time = None;
        self.slots = SlotsState::Loading;
        self.load_slots().await;
        Ok(())
    }

    /// Mark a slot request as in flight and return its date tag.
    pub fn begin_slot_request(&mut self) -> Option<NaiveDate> {
        let date = self.selected_date?;
        if self.staff_id.is_none() || self.services.is_empty() {
            return None;
        }
        self.slots = SlotsState::Loading;
        Some(date)
    }

    /// Commit a slot response, unless the user has selected a different
    /// date since the request was issued.
    pub fn apply_slot_response(
        &mut self,
        date: NaiveDate,
        result: booking_client::Result<Vec<NaiveTime>>,
    ) {
        if Some(date) != self.selected_date {
            debug!("Discarding stale slot response for {}", date);
            return;
        }
        match result {
            Ok(slots) => self.slots = SlotsState::Loaded(slots),
            Err(err) => {
                warn!("Slot load failed for {}: {}", date, err);
                self.slots = SlotsState::Failed;
            }
        }
    }

    /// Request and apply the slot list for the selected date.
    pub async fn load_slots(&mut self) {
        let Some(date) = self.begin_slot_request() else {
            return;
        };
        let staff_id = self.staff_id.unwrap_or_default();
        let selections = self.selections();
        let result = self.api.available_slots(staff_id, date, &selections).await;
        self.apply_slot_response(date, result);
    }

    /// Pick one of the loaded slots.
    pub fn select_time(&mut self, time: NaiveTime) -> Result<()> {
        self.expect_step(&BookingStep::SelectingDateTime, "select time")?;
        match &self.slots {
            SlotsState::Loaded(slots) if slots.contains(&time) => {
                self.selected_time = Some(time);
                self.banner = None;
                Ok(())
            }
            _ => Err(FlowError::UnknownSlot(time)),
        }
    }

    /// Advance to the details step; a date and time must be selected.
    pub fn confirm_datetime(&mut self) -> Result<()> {
        self.expect_step(&BookingStep::SelectingDateTime, "confirm date and time")?;
        if self.selected_date.is_none() {
            return Err(FlowError::Incomplete("date"));
        }
        if self.selected_time.is_none() {
            return Err(FlowError::Incomplete("time"));
        }
        self.step = BookingStep::EnteringDetails;
        Ok(())
    }

    // ── Details and review ─────────────────────────────────────────────

    pub fn set_details(&mut self, details: GuestDetails) -> Result<()> {
        self.expect_step(&BookingStep::EnteringDetails, "set details")?;
        self.details = details;
        Ok(())
    }

    pub fn details(&self) -> &GuestDetails {
        &self.details
    }

    /// Validate the entered details and advance to review.
    pub fn confirm_details(&mut self) -> Result<()> {
        self.expect_step(&BookingStep::EnteringDetails, "confirm details")?;
        let errors = self.details.validate();
        if !errors.is_empty() {
            return Err(FlowError::Validation(errors));
        }
        self.step = BookingStep::Reviewing;
        Ok(())
    }

    // ── Navigation ─────────────────────────────────────────────────────

    /// Return to the immediately prior step.
    ///
    /// Moving back from details to date/time selection re-fetches month
    /// availability: once the user left that step, the cached response may
    /// no longer reflect the appointment book.
    pub async fn go_back(&mut self) -> Result<()> {
        let Some(prior) = self.step.prior() else {
            return Err(FlowError::InvalidTransition {
                action: "go back",
                step: self.step.name(),
            });
        };
        let refetch = matches!(self.step, BookingStep::EnteringDetails);
        self.step = prior;
        if refetch {
            self.load_month().await;
        }
        Ok(())
    }

    // ── Submission ─────────────────────────────────────────────────────

    /// Submit the booking.
    ///
    /// Validation failures never reach the network. The submission itself
    /// is sent exactly once per call and at most one is in flight: calling
    /// again while `Submitting` is a no-op.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if matches!(self.step, BookingStep::Submitting) {
            return Ok(SubmitOutcome::InFlight);
        }
        self.expect_step(&BookingStep::Reviewing, "submit")?;

        let errors = self.details.validate();
        if !errors.is_empty() {
            return Err(FlowError::Validation(errors));
        }

        let staff_id = self.staff_id.ok_or(FlowError::Incomplete("staff"))?;
        let date = self.selected_date.ok_or(FlowError::Incomplete("date"))?;
        let time = self.selected_time.ok_or(FlowError::Incomplete("time"))?;

        let request = BookingRequest {
            api_key: None,
            salon_id: self.ctx.salon_id,
            staff_id,
            services: self.services.iter().map(|s| ServiceRef { id: s.id }).collect(),
            date,
            time: format_hhmm(time),
            guest_name: self.details.name.trim().to_string(),
            guest_phone: self.details.phone.trim().to_string(),
            guest_email: self.details.email.clone(),
            guest_address: self.details.address.clone(),
            notes: self.details.notes.clone(),
        };

        self.step = BookingStep::Submitting;

        match self.api.book(&request).await {
            Ok(confirmation) => {
                self.banner = None;
                self.step = BookingStep::Confirmed(confirmation.clone());
                Ok(SubmitOutcome::Confirmed(confirmation))
            }
            Err(ClientError::SlotTaken { message }) => {
                // The slot went to someone else between selection and
                // submission. Roll back to date/time selection and show a
                // corrected slot list right away.
                self.selected_time = None;
                self.step = BookingStep::SelectingDateTime;
                self.banner = Some(message.clone());
                self.slots = SlotsState::Loading;
                self.load_slots().await;
                Ok(SubmitOutcome::SlotTaken { message })
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Booking submission failed: {}", message);
                self.step = BookingStep::Reviewing;
                self.banner = Some(message.clone());
                Ok(SubmitOutcome::Failed { message })
            }
        }
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn selections(&self) -> Vec<ServiceSelection> {
        self.services.iter().map(ServiceSelection::from).collect()
    }

    fn reset_date_selection(&mut self) {
        self.selected_date = None;
        self.selected_time = None;
        self.slots = SlotsState::Idle;
    }

    fn expect_step(&self, expected: &BookingStep, action: &'static str) -> Result<()> {
        if &self.step == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                action,
                step: self.step.name(),
            })
        }
    }
}
