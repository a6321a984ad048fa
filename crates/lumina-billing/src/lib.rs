//! # lumina-billing: Orchestration for Lumina Billing
//!
//! The thin service layer that turns input payloads into persisted
//! ledger records. All business arithmetic lives in `lumina-core`; all
//! persistence lives behind `lumina_store::LedgerStore`; this crate only
//! sequences the two.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lumina_billing::BillingService;
//! use lumina_store::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("lumina.db")).await?;
//! let service = BillingService::new(db);
//!
//! let bill = service.create_bill(input).await?;
//! println!("cut {}", bill.bill_number);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{BillingError, BillingResult};
pub use service::{BillingService, CustomerListing};
