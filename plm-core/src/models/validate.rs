use thiserror::Error;

/// Reasons a submitted resource is rejected before it reaches storage.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("{0} is required")]
    Required(&'static str),
    /// A numeric field was negative, NaN or infinite
    #[error("{field} must be a finite, non-negative number (got {value})")]
    NotNonNegative {
        /// The offending field
        field: &'static str,
        /// The submitted value
        value: f64,
    },
    /// A supplier rating outside of 1..=5
    #[error("rating must be between 1 and 5 (got {0})")]
    Rating(u8),
}

/// Checks the invariants a resource must satisfy before it is stored.
pub trait Validate {
    /// Returns the first violated invariant, if any.
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotNonNegative { field, value })
    }
}
