//! # The LedgerStore Trait
//!
//! The explicit store abstraction the billing orchestrator is written
//! against.
//!
//! ## Why A Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Abstraction                                  │
//! │                                                                         │
//! │                      BillingService<S>                                  │
//! │                            │                                            │
//! │                  S: LedgerStore (this trait)                            │
//! │                   ┌────────┴────────┐                                  │
//! │                   ▼                 ▼                                   │
//! │            ┌────────────┐    ┌─────────────┐                           │
//! │            │  Database  │    │ MemoryStore │                           │
//! │            │  (SQLite)  │    │ (fixtures)  │                           │
//! │            └────────────┘    └─────────────┘                           │
//! │             production        tests / demo                              │
//! │                                                                         │
//! │  The orchestrator never holds module-level state; a store is           │
//! │  injected at construction.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::StoreResult;
use lumina_core::{Bill, Customer, InventoryItem, Worksheet};

/// Create/read/update operations over the four ledger record kinds.
///
/// Every method can fail with [`StoreError::Unavailable`] when the backing
/// database cannot be reached; recovery policy belongs to the caller.
///
/// [`StoreError::Unavailable`]: crate::StoreError::Unavailable
#[async_trait]
pub trait LedgerStore: Send + Sync {
    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Looks up one customer by id.
    async fn find_customer(&self, id: &str) -> StoreResult<Option<Customer>>;

    /// Lists every customer, newest first.
    async fn list_customers(&self) -> StoreResult<Vec<Customer>>;

    // -------------------------------------------------------------------------
    // Bills
    // -------------------------------------------------------------------------

    /// The highest bill number currently on file, ordered by bill_number
    /// descending, or `None` on an empty store.
    async fn latest_bill_number(&self) -> StoreResult<Option<String>>;

    /// Persists a bill together with its nested items and stones as one
    /// unit. Partial creation is not an acceptable outcome: either the
    /// whole tree lands or none of it does.
    async fn create_bill_with_items(&self, bill: &Bill) -> StoreResult<()>;

    /// Looks up one bill (with nested items and stones) by id.
    async fn find_bill(&self, id: &str) -> StoreResult<Option<Bill>>;

    /// Lists all bills with their nested items, newest first.
    async fn list_bills(&self) -> StoreResult<Vec<Bill>>;

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// Looks up one inventory item by id.
    async fn find_inventory_item(&self, id: &str) -> StoreResult<Option<InventoryItem>>;

    /// Lists the whole inventory.
    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Writes an absolute quantity for an item and returns the updated
    /// row, or `None` when the item does not exist. Computing the new
    /// quantity (the floor-at-zero rule) is the orchestrator's job.
    async fn update_inventory_quantity(
        &self,
        id: &str,
        quantity: i64,
    ) -> StoreResult<Option<InventoryItem>>;

    // -------------------------------------------------------------------------
    // Worksheets
    // -------------------------------------------------------------------------

    /// Lists all worksheets with their stone details, newest first.
    async fn list_worksheets(&self) -> StoreResult<Vec<Worksheet>>;

    /// Looks up one worksheet by id.
    async fn find_worksheet(&self, id: &str) -> StoreResult<Option<Worksheet>>;

    /// Persists a worksheet with its stone details as one unit.
    async fn create_worksheet(&self, worksheet: &Worksheet) -> StoreResult<()>;
}
