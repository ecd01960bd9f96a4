//! # booking-client
//!
//! Typed HTTP client for the salon booking API.
//!
//! Covers the widget-keyed endpoints: bootstrap, per-month date
//! availability, per-day slot availability, and booking submission. The
//! three read endpoints are safe to repeat and go through the transient
//! retry policy; `book` is sent exactly once.
//!
//! The [`BookingApi`] trait is the seam between this crate and the flow
//! layer — flow tests run against an in-memory fake instead of a network.

pub mod client;
pub mod error;
pub mod models;
pub mod retry;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

pub use client::WidgetClient;
pub use error::{classify_failure, ClientError, Result, TIME_SLOT_TAKEN};
pub use models::{
    BookingConfirmation, BookingRequest, DateAvailabilityResponse, ServiceRef, ServiceSelection,
    WidgetBootstrap, WidgetConfig,
};
pub use retry::{with_retry, INITIAL_BACKOFF, MAX_RETRIES};

use slot_engine::calendar::YearMonth;

/// The remote operations the booking flow depends on.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `POST /widget/dates/available`.
    async fn available_dates(
        &self,
        staff_id: i64,
        month: YearMonth,
        services: &[ServiceSelection],
    ) -> Result<DateAvailabilityResponse>;

    /// `POST /widget/slots/available`.
    async fn available_slots(
        &self,
        staff_id: i64,
        date: NaiveDate,
        services: &[ServiceSelection],
    ) -> Result<Vec<NaiveTime>>;

    /// `POST /widget/book`. Implementations must not auto-retry this call.
    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation>;
}
