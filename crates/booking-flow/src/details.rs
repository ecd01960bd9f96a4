//! Guest contact details and their client-side validation.
//!
//! Validation runs before any network call; a failing field surfaces its own
//! message and the submission never leaves the client.

/// Minimum length of the guest name, in characters.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum length of the guest phone number, in characters.
pub const MIN_PHONE_LEN: usize = 8;

/// Contact fields entered at the details step. Name and phone are required;
/// the rest is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// A validation failure tied to a single input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl GuestDetails {
    /// Validate required fields and minimum lengths.
    ///
    /// Lengths are counted over trimmed characters, so whitespace padding
    /// cannot satisfy a minimum.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < MIN_NAME_LEN {
            errors.push(FieldError {
                field: "guest_name",
                message: format!("name must be at least {} characters", MIN_NAME_LEN),
            });
        }
        if self.phone.trim().chars().count() < MIN_PHONE_LEN {
            errors.push(FieldError {
                field: "guest_phone",
                message: format!("phone must be at least {} characters", MIN_PHONE_LEN),
            });
        }

        errors
    }
}
