//! # Error Types
//!
//! Domain-specific error types for lumina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lumina-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule failures (bad grade, bad billno)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lumina-store errors (separate crate)                                  │
//! │  └── StoreError       - Ledger store failures                          │
//! │                                                                         │
//! │  lumina-billing errors (separate crate)                                │
//! │  └── BillingError     - Orchestration failures (customer missing)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BillingError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (grade key, bill number, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent domain rule violations. They abort the calculation
/// that raised them; no partial result is ever produced alongside one.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Karat grade key is not in the wastage table.
    ///
    /// ## When This Occurs
    /// - Caller passes a karatage string that is not one of the known
    ///   grades (K22, K21, K18, K16, K14, K9, Silver925)
    ///
    /// A lookup miss is a hard input failure, never a silent default.
    #[error("Invalid karatage: {0}")]
    InvalidGrade(String),

    /// A stored bill number does not match the `LJ-YYYYMMDD-NNNN` shape.
    ///
    /// ## When This Occurs
    /// - The latest bill number read back from the store was written by
    ///   something other than this system, or was corrupted
    #[error("Malformed bill number: {0}")]
    MalformedBillNumber(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a boundary payload doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable karatage).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set for its context.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A bill must carry at least one line item.
    #[error("bill must contain at least one item")]
    EmptyBill,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidGrade("K23".to_string());
        assert_eq!(err.to_string(), "Invalid karatage: K23");

        let err = CoreError::MalformedBillNumber("LJ-BAD".to_string());
        assert_eq!(err.to_string(), "Malformed bill number: LJ-BAD");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_id".to_string(),
        };
        assert_eq!(err.to_string(), "customer_id is required");

        let err = ValidationError::MustBeNonNegative {
            field: "weight".to_string(),
        };
        assert_eq!(err.to_string(), "weight must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyBill;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
