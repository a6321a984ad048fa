//! # Billing Error Types
//!
//! Errors surfaced by the orchestration layer. Core and store errors
//! pass through untouched; the only error minted here is the refusal
//! to bill an unknown customer.

use thiserror::Error;

use lumina_core::CoreError;
use lumina_store::StoreError;

/// Billing orchestration errors.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The customer a bill was addressed to does not exist.
    ///
    /// ## When This Occurs
    /// - `create_bill` with a customer id not on file; raised before
    ///   anything is written
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Business-rule failure from the core (validation, unknown grade,
    /// malformed bill number).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure. Propagated as-is everywhere except the customer
    /// listing, which degrades to a placeholder instead.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for billing operations.
pub type BillingResult<T> = Result<T, BillingError>;
