//! Validation errors for domain input.

use thiserror::Error;

/// A client-visible validation failure.
///
/// Raised before anything is written to storage, so a failed validation never
/// leaves a partially updated collection behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was missing or blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// Prices cannot be negative.
    #[error("price must not be negative")]
    NegativePrice,

    /// Day of week outside 0 (Sunday) ..= 6 (Saturday).
    #[error("invalid day of week: {0}")]
    InvalidWeekday(u8),

    /// More than one hours row for the same weekday.
    #[error("duplicate hours for day of week {0}")]
    DuplicateWeekday(u8),

    /// Opening time is not before closing time.
    #[error("opening time must be before closing time on day of week {0}")]
    InvalidHours(u8),

    /// Upload has an extension outside the allowed image types.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Upload exceeds the size limit.
    #[error("file is too large ({size} bytes, max {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    /// A field could not be parsed.
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ValidationError {
    /// Build an `Invalid` error from any displayable cause.
    pub fn invalid(field: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            field,
            message: message.to_string(),
        }
    }
}

/// Reject blank strings for a required field.
///
/// # Errors
///
/// Returns `ValidationError::Required` if the trimmed value is empty.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}
