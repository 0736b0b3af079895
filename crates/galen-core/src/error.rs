//! # Error Types
//!
//! Domain-specific error types for galen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  galen-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  galen-store errors (separate crate)                                │
//! │  └── StoreError       - Snapshot/collection failures                │
//! │                                                                     │
//! │  HTTP errors (in server)                                            │
//! │  └── ApiError         - What clients see ({"error": message})       │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → JSON   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (medicine name, quantities, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-facing messages by the HTTP layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Medicine cannot be found.
    ///
    /// ## When This Occurs
    /// - A sale line references a medicine id that does not exist
    /// - A stock receipt targets a deleted medicine
    #[error("Medicine not found: {0}")]
    MedicineNotFound(u64),

    /// Insufficient stock to complete a sale line.
    ///
    /// ## When This Occurs
    /// - The requested quantity exceeds the on-hand quantity
    ///
    /// Selling is never allowed to drive a medicine's quantity negative;
    /// the whole sale is rejected before anything is written.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A sale was submitted with no invoice lines.
    #[error("Sale has no items")]
    EmptySale,

    /// Discount exceeds the sale total (or is negative).
    #[error("Invalid discount: {discount_cents} cents against total {total_cents} cents")]
    InvalidDiscount {
        discount_cents: i64,
        total_cents: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when request input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., bad date, bad characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate username).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Paracetamol 500mg".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Paracetamol 500mg: available 3, requested 5"
        );

        let err = CoreError::MedicineNotFound(42);
        assert_eq!(err.to_string(), "Medicine not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "username".to_string(),
            value: "admin".to_string(),
        };
        assert_eq!(err.to_string(), "username 'admin' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
