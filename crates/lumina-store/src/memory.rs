//! # In-Memory Ledger Store
//!
//! A [`LedgerStore`] backed by plain collections behind an async lock.
//! Used by tests and demos; [`MemoryStore::with_fixtures`] seeds the
//! same sample ledger the shop uses for walkthroughs.
//!
//! The store can be flipped into an unavailable state with
//! [`MemoryStore::set_unavailable`], after which every operation fails
//! with [`StoreError::Unavailable`]. Tests use this to exercise the
//! degraded paths of the orchestrator without a real outage.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::ledger::LedgerStore;
use lumina_core::{
    Bill, BillItem, BillStatus, BillType, Customer, InventoryItem, KaratGrade, MetalType,
    PaymentType, Stone, Worksheet, WorksheetStatus,
};

#[derive(Debug, Default)]
struct Inner {
    customers: Vec<Customer>,
    inventory: Vec<InventoryItem>,
    bills: Vec<Bill>,
    worksheets: Vec<Worksheet>,
}

/// In-memory [`LedgerStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the sample ledger: three customers,
    /// five inventory items, two completed bills and one in-progress
    /// worksheet.
    pub fn with_fixtures() -> Self {
        MemoryStore {
            inner: RwLock::new(Inner {
                customers: fixture_customers(),
                inventory: fixture_inventory(),
                bills: fixture_bills(),
                worksheets: fixture_worksheets(),
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Flips the store into (or out of) the unavailable state.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn find_customer(&self, id: &str) -> StoreResult<Option<Customer>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let mut customers = inner.customers.clone();
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(customers)
    }

    async fn latest_bill_number(&self) -> StoreResult<Option<String>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .bills
            .iter()
            .map(|b| b.bill_number.clone())
            .max())
    }

    async fn create_bill_with_items(&self, bill: &Bill) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        if inner.bills.iter().any(|b| b.bill_number == bill.bill_number) {
            return Err(StoreError::duplicate("bill_number", &bill.bill_number));
        }
        inner.bills.push(bill.clone());
        Ok(())
    }

    async fn find_bill(&self, id: &str) -> StoreResult<Option<Bill>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.bills.iter().find(|b| b.id == id).cloned())
    }

    async fn list_bills(&self) -> StoreResult<Vec<Bill>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let mut bills = inner.bills.clone();
        bills.sort_by(|a, b| b.bill_number.cmp(&a.bill_number));
        Ok(bills)
    }

    async fn find_inventory_item(&self, id: &str) -> StoreResult<Option<InventoryItem>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.inventory.iter().find(|i| i.id == id).cloned())
    }

    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let mut items = inner.inventory.clone();
        items.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(items)
    }

    async fn update_inventory_quantity(
        &self,
        id: &str,
        quantity: i64,
    ) -> StoreResult<Option<InventoryItem>> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        match inner.inventory.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                item.updated_at = Utc::now();
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_worksheets(&self) -> StoreResult<Vec<Worksheet>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let mut worksheets = inner.worksheets.clone();
        worksheets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(worksheets)
    }

    async fn find_worksheet(&self, id: &str) -> StoreResult<Option<Worksheet>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.worksheets.iter().find(|w| w.id == id).cloned())
    }

    async fn create_worksheet(&self, worksheet: &Worksheet) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        inner.worksheets.push(worksheet.clone());
        Ok(())
    }
}

// =============================================================================
// Fixture Data
// =============================================================================

fn seed_time(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).single()
        .unwrap_or_else(Utc::now)
}

fn fixture_customers() -> Vec<Customer> {
    let seeded = seed_time(2025, 1, 10);
    vec![
        Customer {
            id: "1".to_string(),
            name: "Rajesh Kumar".to_string(),
            phone: Some("9876543210".to_string()),
            city: Some("Mumbai".to_string()),
            created_at: seeded,
            updated_at: seeded,
        },
        Customer {
            id: "2".to_string(),
            name: "Priya Sharma".to_string(),
            phone: Some("9876543211".to_string()),
            city: Some("Delhi".to_string()),
            created_at: seeded,
            updated_at: seeded,
        },
        Customer {
            id: "3".to_string(),
            name: "Amit Patel".to_string(),
            phone: Some("9876543212".to_string()),
            city: Some("Ahmedabad".to_string()),
            created_at: seeded,
            updated_at: seeded,
        },
    ]
}

fn fixture_inventory() -> Vec<InventoryItem> {
    let seeded = seed_time(2025, 1, 10);
    let item = |id: &str,
                sku: &str,
                name: &str,
                metal_type: MetalType,
                karatage: KaratGrade,
                weight: f64,
                quantity: i64,
                price: f64| InventoryItem {
        id: id.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        metal_type,
        karatage,
        weight,
        quantity,
        price,
        created_at: seeded,
        updated_at: seeded,
    };

    vec![
        item("1", "GR-22K-001", "Gold Ring 22K", MetalType::Gold, KaratGrade::K22, 5.5, 12, 35000.0),
        item("2", "SB-925-001", "Silver Bracelet", MetalType::Silver, KaratGrade::Silver925, 8.0, 25, 8000.0),
        item("3", "GN-18K-001", "Gold Necklace 18K", MetalType::Gold, KaratGrade::K18, 12.0, 8, 62000.0),
        item("4", "DP-18K-001", "Diamond Pendant", MetalType::Gold, KaratGrade::K18, 2.5, 15, 45000.0),
        item("5", "PE-22K-001", "Pearl Earrings", MetalType::Gold, KaratGrade::K22, 4.0, 20, 28000.0),
    ]
}

fn fixture_bills() -> Vec<Bill> {
    let day_one = seed_time(2025, 1, 25);
    let day_two = seed_time(2025, 1, 26);

    vec![
        Bill {
            id: "b1".to_string(),
            bill_number: "LJ-20250125-0001".to_string(),
            customer_id: "2".to_string(),
            bill_date: day_one,
            bill_type: BillType::ReadyMade,
            subtotal: 62000.0,
            tax: 0.0,
            payment_type: PaymentType::Card,
            payment_amount: 63860.0,
            status: BillStatus::Completed,
            items: vec![BillItem {
                id: "i3".to_string(),
                bill_id: "b1".to_string(),
                description: "Gold Necklace".to_string(),
                metal_type: MetalType::Gold,
                karatage: KaratGrade::K18,
                weight: 12.0,
                pure_weight: 9.0,
                size: None,
                size_value: None,
                quantity: 1,
                rate: Some(6500.0),
                total_value: 62000.0,
                stones: vec![],
            }],
            created_at: day_one,
        },
        Bill {
            id: "b2".to_string(),
            bill_number: "LJ-20250126-0002".to_string(),
            customer_id: "1".to_string(),
            bill_date: day_two,
            bill_type: BillType::ReadyMade,
            subtotal: 43750.0,
            tax: 0.0,
            payment_type: PaymentType::Cash,
            payment_amount: 43750.0,
            status: BillStatus::Completed,
            items: vec![
                BillItem {
                    id: "i1".to_string(),
                    bill_id: "b2".to_string(),
                    description: "Gold Ring".to_string(),
                    metal_type: MetalType::Gold,
                    karatage: KaratGrade::K22,
                    weight: 5.5,
                    pure_weight: 5.0,
                    size: None,
                    size_value: None,
                    quantity: 1,
                    rate: Some(6500.0),
                    total_value: 35750.0,
                    stones: vec![],
                },
                BillItem {
                    id: "i2".to_string(),
                    bill_id: "b2".to_string(),
                    description: "Silver Chain".to_string(),
                    metal_type: MetalType::Silver,
                    karatage: KaratGrade::Silver925,
                    weight: 3.0,
                    pure_weight: 2.775,
                    size: None,
                    size_value: None,
                    quantity: 1,
                    rate: Some(75.0),
                    total_value: 8000.0,
                    stones: vec![],
                },
            ],
            created_at: day_two,
        },
    ]
}

fn fixture_worksheets() -> Vec<Worksheet> {
    let opened = seed_time(2025, 1, 20);
    vec![Worksheet {
        id: "w1".to_string(),
        customer_id: "3".to_string(),
        date: opened,
        description: "Custom Gold Ring".to_string(),
        metal_type: MetalType::Gold,
        karatage: KaratGrade::K22,
        gold_given: 10.0,
        target_weight: 9.5,
        final_weight: 9.5,
        wastage: 0.5,
        status: WorksheetStatus::InProgress,
        stones: vec![Stone {
            id: "s1".to_string(),
            name: "Diamond".to_string(),
            quantity: 1,
            weight: 0.5,
            rate: 25000.0,
            total_value: 25000.0,
        }],
        created_at: opened,
        updated_at: opened,
    }]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixtures_seed_the_sample_ledger() {
        let store = MemoryStore::with_fixtures();

        assert_eq!(store.list_customers().await.unwrap().len(), 3);
        assert_eq!(store.list_inventory_items().await.unwrap().len(), 5);
        assert_eq!(store.list_bills().await.unwrap().len(), 2);
        assert_eq!(store.list_worksheets().await.unwrap().len(), 1);

        let latest = store.latest_bill_number().await.unwrap();
        assert_eq!(latest.as_deref(), Some("LJ-20250126-0002"));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = MemoryStore::with_fixtures();
        store.set_unavailable(true);

        assert!(matches!(
            store.list_customers().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.latest_bill_number().await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_unavailable(false);
        assert!(store.list_customers().await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_bill_number_is_rejected() {
        let store = MemoryStore::with_fixtures();
        let mut bill = store.find_bill("b2").await.unwrap().unwrap();
        bill.id = "b3".to_string();

        let err = store.create_bill_with_items(&bill).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_update_inventory_quantity_is_absolute() {
        let store = MemoryStore::with_fixtures();

        let updated = store.update_inventory_quantity("1", 7).await.unwrap();
        assert_eq!(updated.unwrap().quantity, 7);

        let missing = store.update_inventory_quantity("nope", 7).await.unwrap();
        assert!(missing.is_none());
    }
}
