//! Domain error types.
//!
//! These errors represent validation failures on request input. Pricing
//! failures are not errors: they are carried as data on the quote.

/// Domain-level errors for request validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A required text field was empty after trimming
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Margin was NaN or infinite
    #[error("margin must be a finite number: {0}")]
    InvalidMargin(&'static str),
}
