//! Wire types for the booking API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slot_engine::schedule::{Service, WorkingHours};

/// Connection settings for a widget client.
///
/// The embedding page supplies both values; nothing is read from files or
/// the environment.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Versioned API base, e.g. `https://api.example.com/api/v1`.
    pub base_url: String,
    /// Per-salon widget key.
    pub api_key: String,
}

/// Salon record from the bootstrap response.
#[derive(Debug, Clone, Deserialize)]
pub struct Salon {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub working_hours: WorkingHours,
}

/// Staff member record from the bootstrap response.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    /// Absent when the member inherits salon hours.
    #[serde(default)]
    pub working_hours: Option<WorkingHours>,
}

/// Widget display and booking settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetSettings {
    #[serde(default = "default_granularity")]
    pub slot_granularity_minutes: u32,
}

fn default_granularity() -> u32 {
    slot_engine::DEFAULT_GRANULARITY_MINUTES
}

/// Everything the embeddable flow needs to render: salon, catalog, staff,
/// settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetBootstrap {
    pub salon: Salon,
    pub services: Vec<Service>,
    pub staff: Vec<StaffMember>,
    pub settings: WidgetSettings,
}

/// One selected service as sent with availability queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSelection {
    #[serde(rename = "serviceId")]
    pub service_id: i64,
    pub duration: u32,
}

impl From<&Service> for ServiceSelection {
    fn from(service: &Service) -> Self {
        Self {
            service_id: service.id,
            duration: service.duration,
        }
    }
}

/// Body of `POST /widget/dates/available`.
#[derive(Debug, Clone, Serialize)]
pub struct DateAvailabilityRequest {
    pub key: String,
    pub staff_id: i64,
    /// `"YYYY-MM"`.
    pub month: String,
    pub services: Vec<ServiceSelection>,
}

/// Response of `POST /widget/dates/available`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateAvailabilityResponse {
    #[serde(default)]
    pub available_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub unavailable_dates: Vec<NaiveDate>,
}

/// Body of `POST /widget/slots/available`.
#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailabilityRequest {
    pub key: String,
    pub staff_id: i64,
    pub date: NaiveDate,
    pub services: Vec<ServiceSelection>,
}

/// Response of `POST /widget/slots/available` — `"HH:MM"` start times.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotAvailabilityResponse {
    #[serde(default)]
    pub slots: Vec<String>,
}

/// A service reference in a booking submission.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRef {
    pub id: i64,
}

/// Body of `POST /widget/book`.
///
/// `api_key` is filled in by the client; flow code builds the request
/// without it.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub salon_id: i64,
    pub staff_id: i64,
    pub services: Vec<ServiceRef>,
    pub date: NaiveDate,
    /// `"HH:MM"`.
    pub time: String,
    pub guest_name: String,
    pub guest_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Confirmation returned by a successful booking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingConfirmation {
    pub id: i64,
    pub date: NaiveDate,
    /// `"HH:MM"`.
    pub time: String,
    #[serde(default)]
    pub status: Option<String>,
}
