//! # Repository Module
//!
//! SQLite repository implementations behind the [`LedgerStore`] trait.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  BillingService                                                        │
//! │       │                                                                 │
//! │       │  db.bills().latest_bill_number()                               │
//! │       ▼                                                                 │
//! │  BillRepository                                                        │
//! │  ├── latest_bill_number(&self)                                         │
//! │  ├── insert_bill(&self, bill)        ← one transaction, whole tree    │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── list(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  SQL is isolated here; rows are private structs converted into         │
//! │  lumina-core domain types on the way out.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer reads and seeding
//! - [`inventory::InventoryRepository`] - Inventory CRUD and quantity writes
//! - [`bill::BillRepository`] - Bill tree persistence and sequencing
//! - [`worksheet::WorksheetRepository`] - Worksheet passthrough
//!
//! [`LedgerStore`]: crate::LedgerStore

pub mod bill;
pub mod customer;
pub mod inventory;
pub mod worksheet;

use std::str::FromStr;

use crate::error::{StoreError, StoreResult};

/// Parses a textual enum column back into its domain type.
///
/// A failure here means the column was edited outside this system; it
/// surfaces as [`StoreError::CorruptRow`] rather than a panic.
pub(crate) fn parse_column<T>(value: &str) -> StoreResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(StoreError::corrupt)
}
