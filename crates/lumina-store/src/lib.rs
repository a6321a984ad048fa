//! # lumina-store: Ledger Storage for Lumina Billing
//!
//! This crate owns the persistent ledger of the billing system.
//! It uses SQLite for local storage with sqlx for async operations,
//! and exposes the whole surface behind the [`LedgerStore`] trait so
//! the orchestrator never depends on a concrete backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lumina Billing Data Flow                            │
//! │                                                                         │
//! │  BillingService (lumina-billing)                                       │
//! │       │                                                                 │
//! │       ▼  S: LedgerStore                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   lumina-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │  (bill.rs ...) │    │  (embedded)  │ │   │
//! │  │   │               │    │                │    │              │ │   │
//! │  │   │ SqlitePool    │    │ BillRepo       │    │ 001_initial_ │ │   │
//! │  │   │ Connection    │◄───│ CustomerRepo   │    │ schema.sql   │ │   │
//! │  │   │ Management    │    │ InventoryRepo  │    │              │ │   │
//! │  │   └───────────────┘    │ WorksheetRepo  │    └──────────────┘ │   │
//! │  │                        └────────────────┘                      │   │
//! │  │   ┌───────────────┐                                            │   │
//! │  │   │  MemoryStore  │  fixtures for tests and demos              │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (lumina.db)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`ledger`] - The [`LedgerStore`] trait the orchestrator is written against
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Repository implementations (bill, customer, etc.)
//! - [`memory`] - In-memory store with seeded sample data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lumina_store::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/lumina.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let latest = db.bills().latest_bill_number().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use ledger::LedgerStore;
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::bill::BillRepository;
pub use repository::customer::CustomerRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::worksheet::WorksheetRepository;
