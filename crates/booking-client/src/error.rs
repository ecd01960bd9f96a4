//! Error taxonomy for the booking API client.
//!
//! The retry policy keys off [`ClientError::is_transient`]; the booking flow
//! keys off [`ClientError::SlotTaken`]. Everything else surfaces as a generic
//! retryable failure to the user.

use serde::Deserialize;
use thiserror::Error;

/// Error code the server uses when a slot was booked between selection and
/// submission.
pub const TIME_SLOT_TAKEN: &str = "TIME_SLOT_TAKEN";

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request produced no HTTP status at all (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 401. Observed on newly-issued widget keys before they propagate;
    /// treated as transient and retried.
    #[error("Authentication rejected (HTTP 401)")]
    Unauthorized,

    /// The selected time slot was taken by a concurrent booking. Never
    /// retried automatically; the flow rolls back to time selection.
    #[error("Time slot no longer available: {message}")]
    SlotTaken { message: String },

    /// Any other 4xx — the request itself was rejected.
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// 5xx responses.
    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response payload: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the generic retry policy applies to this failure.
    ///
    /// Only status-less network failures and HTTP 401 qualify; validation
    /// rejections and slot conflicts must surface immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Unauthorized)
    }
}

/// Error payload shape returned by the booking API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    redirect_to_time: bool,
}

/// Map a non-success HTTP response to a [`ClientError`].
///
/// The slot-conflict signal is either the distinguished `code` or an
/// explicit `redirect_to_time` flag in the payload; both take precedence
/// over the status-based classification.
pub fn classify_failure(status: u16, body: &str) -> ClientError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();

    if let Some(payload) = &parsed {
        let slot_taken =
            payload.code.as_deref() == Some(TIME_SLOT_TAKEN) || payload.redirect_to_time;
        if slot_taken {
            let message = payload
                .error
                .clone()
                .unwrap_or_else(|| "the selected time was just booked".to_string());
            return ClientError::SlotTaken { message };
        }
    }

    let message = parsed
        .and_then(|p| p.error)
        .unwrap_or_else(|| body.chars().take(200).collect());

    match status {
        401 => ClientError::Unauthorized,
        400..=499 => ClientError::Rejected { status, message },
        _ => ClientError::Server { status, message },
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
