//! # lumina-core: Pure Business Logic for Lumina Billing
//!
//! This crate is the **heart** of the Lumina Jewellers billing system. It
//! contains all business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lumina Billing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 lumina-billing (Orchestrator)                   │   │
//! │  │    create_bill, update_inventory_after_sale, customers          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lumina-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   karat   │  │  wastage  │  │  payment  │  │  billno   │  │   │
//! │  │   │  grades + │  │  engine   │  │ surcharge │  │  format + │  │   │
//! │  │   │  coeffs   │  │           │  │   rule    │  │  sequence │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │   types   │  │ validation│                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  lumina-store (Ledger Store)                    │   │
//! │  │           SQLite repositories + in-memory fixtures              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`karat`] - Karat grades and the coefficient table
//! - [`wastage`] - The wastage engine
//! - [`payment`] - The card surcharge rule
//! - [`billno`] - Bill number formatting and sequencing
//! - [`types`] - Domain types (Customer, Bill, Worksheet, ...)
//! - [`validation`] - Boundary payload validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input,
//!    same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: all errors are typed, never strings or panics
//! 4. **Exact classification**: wastage status is the sign of the exact
//!    difference; display rounding never feeds back into classification
//!
//! ## Example Usage
//!
//! ```rust
//! use lumina_core::wastage::{calculate_wastage, WastageStatus};
//! use lumina_core::payment::calculate_payment_amount;
//! use lumina_core::types::PaymentType;
//!
//! let check = calculate_wastage("K22", 10.0, 9.5, 10.2, None).unwrap();
//! assert_eq!(check.status, WastageStatus::Excess);
//!
//! // Card payments of 20 000 and up carry the bank's 3% charge
//! assert_eq!(calculate_payment_amount(20000.0, PaymentType::Card), 20600.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billno;
pub mod error;
pub mod karat;
pub mod payment;
pub mod types;
pub mod validation;
pub mod wastage;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lumina_core::KaratGrade` instead of
// `use lumina_core::karat::KaratGrade`

pub use error::{CoreError, CoreResult, ValidationError};
pub use karat::KaratGrade;
pub use payment::calculate_payment_amount;
pub use types::*;
pub use wastage::{calculate_wastage, WastageResult, WastageStatus};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Bill total at which a card payment starts carrying the bank charge.
///
/// ## Business Reason
/// The card processor's fee is absorbed on small tickets and passed on to
/// the customer on large ones. The cutoff is inclusive.
pub const CARD_SURCHARGE_THRESHOLD: f64 = 20000.0;

/// Bank charge passed on for large card payments, in percent.
pub const CARD_SURCHARGE_PERCENT: f64 = 3.0;

/// Identity presented when the customer directory cannot be read.
///
/// ## Business Reason
/// A sale must never be blocked by the directory being down; the walk-in
/// identity lets checkout continue and the bill be reconciled later.
pub const WALK_IN_CUSTOMER_NAME: &str = "Walk-in Customer";
