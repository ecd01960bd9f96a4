//! Widget API client implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use tracing::{debug, error, info};

use slot_engine::calendar::YearMonth;
use slot_engine::schedule::parse_hhmm;

use crate::error::{classify_failure, ClientError, Result};
use crate::models::{
    BookingConfirmation, BookingRequest, DateAvailabilityRequest, DateAvailabilityResponse,
    ServiceSelection, SlotAvailabilityRequest, SlotAvailabilityResponse, WidgetBootstrap,
    WidgetConfig,
};
use crate::retry::with_retry;
use crate::BookingApi;

/// HTTP client for the widget-keyed booking API.
#[derive(Clone)]
pub struct WidgetClient {
    client: Client,
    config: WidgetConfig,
}

impl WidgetClient {
    /// Create a new widget client.
    pub fn new(config: WidgetConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let mut config = config;
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        info!("Widget client initialized for: {}", config.base_url);

        Ok(Self { client, config })
    }

    /// Add the widget key header.
    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("X-Widget-Key", &self.config.api_key)
    }

    /// Fetch salon, services, staff and settings for the embeddable flow.
    ///
    /// Retried on transient failures.
    pub async fn bootstrap(&self, salon_slug: &str) -> Result<WidgetBootstrap> {
        with_retry("widget bootstrap", || self.fetch_bootstrap(salon_slug)).await
    }

    async fn fetch_bootstrap(&self, salon_slug: &str) -> Result<WidgetBootstrap> {
        let url = format!("{}/widget/{}", self.config.base_url, salon_slug);

        debug!("Fetching widget bootstrap for: {}", salon_slug);

        let response = self
            .add_auth(self.client.get(&url).query(&[("key", &self.config.api_key)]))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let bootstrap: WidgetBootstrap = decode(response).await?;

        info!(
            "Bootstrap loaded: {} ({} services, {} staff)",
            bootstrap.salon.name,
            bootstrap.services.len(),
            bootstrap.staff.len()
        );
        Ok(bootstrap)
    }

    /// Which dates of a month have at least one bookable slot.
    ///
    /// Retried on transient failures.
    pub async fn fetch_available_dates(
        &self,
        staff_id: i64,
        month: YearMonth,
        services: &[ServiceSelection],
    ) -> Result<DateAvailabilityResponse> {
        with_retry("date availability", || {
            self.post_available_dates(staff_id, month, services)
        })
        .await
    }

    async fn post_available_dates(
        &self,
        staff_id: i64,
        month: YearMonth,
        services: &[ServiceSelection],
    ) -> Result<DateAvailabilityResponse> {
        let url = format!("{}/widget/dates/available", self.config.base_url);
        let body = DateAvailabilityRequest {
            key: self.config.api_key.clone(),
            staff_id,
            month: month.to_string(),
            services: services.to_vec(),
        };

        debug!("Fetching date availability: staff {} month {}", staff_id, month);

        let response = self
            .add_auth(self.client.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(response).await
    }

    /// Bookable start times for a date/staff/services combination.
    ///
    /// Retried on transient failures.
    pub async fn fetch_available_slots(
        &self,
        staff_id: i64,
        date: NaiveDate,
        services: &[ServiceSelection],
    ) -> Result<Vec<NaiveTime>> {
        with_retry("slot availability", || {
            self.post_available_slots(staff_id, date, services)
        })
        .await
    }

    async fn post_available_slots(
        &self,
        staff_id: i64,
        date: NaiveDate,
        services: &[ServiceSelection],
    ) -> Result<Vec<NaiveTime>> {
        let url = format!("{}/widget/slots/available", self.config.base_url);
        let body = SlotAvailabilityRequest {
            key: self.config.api_key.clone(),
            staff_id,
            date,
            services: services.to_vec(),
        };

        debug!("Fetching slots: staff {} date {}", staff_id, date);

        let response = self
            .add_auth(self.client.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let payload: SlotAvailabilityResponse = decode(response).await?;

        payload
            .slots
            .iter()
            .map(|s| parse_hhmm(s).map_err(|e| ClientError::Decode(e.to_string())))
            .collect()
    }

    /// Submit a booking.
    ///
    /// Sent exactly once — never auto-retried, whatever the failure. The
    /// server is the sole arbiter of slot conflicts.
    pub async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation> {
        let url = format!("{}/widget/book", self.config.base_url);

        let mut body = request.clone();
        body.api_key = Some(self.config.api_key.clone());

        debug!(
            "Submitting booking: staff {} on {} at {}",
            body.staff_id, body.date, body.time
        );

        let response = self
            .add_auth(self.client.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let confirmation: BookingConfirmation = decode(response).await?;

        info!("Booking confirmed: {}", confirmation.id);
        Ok(confirmation)
    }
}

/// Check the status and decode the JSON body.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        error!("Booking API request failed: {} - {}", status, text);
        return Err(classify_failure(status.as_u16(), &text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl BookingApi for WidgetClient {
    async fn available_dates(
        &self,
        staff_id: i64,
        month: YearMonth,
        services: &[ServiceSelection],
    ) -> Result<DateAvailabilityResponse> {
        self.fetch_available_dates(staff_id, month, services).await
    }

    async fn available_slots(
        &self,
        staff_id: i64,
        date: NaiveDate,
        services: &[ServiceSelection],
    ) -> Result<Vec<NaiveTime>> {
        self.fetch_available_slots(staff_id, date, services).await
    }

    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation> {
        self.submit_booking(request).await
    }
}
