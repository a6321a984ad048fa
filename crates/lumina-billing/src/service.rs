//! # Billing Service
//!
//! The orchestration layer: sequences core business rules and ledger
//! store calls into the billing flows.
//!
//! ## Bill Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        create_bill sequence                             │
//! │                                                                         │
//! │  CreateBillInput                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. validate input          (lumina-core, pure)                        │
//! │  2. generate bill number    (latest from store + core sequencing)      │
//! │  3. resolve customer        (unknown → CustomerNotFound, NO WRITES)    │
//! │  4. assemble Bill           (pure weights, stone values, surcharge)    │
//! │  5. persist atomically      (bill + items + stones, one transaction)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Bill (as persisted)                                                   │
//! │                                                                         │
//! │  Each await completes before the next store call starts; there is      │
//! │  no reordering inside the flow.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{BillingError, BillingResult};
use lumina_core::billno::{format_bill_number, next_sequence};
use lumina_core::validation::{validate_bill_input, validate_worksheet_input};
use lumina_core::{
    calculate_payment_amount, Bill, BillItem, BillItemInput, BillStatus, CoreError,
    CreateBillInput, Customer, InventoryItem, NewWorksheet, Stone, StoneInput, Worksheet,
    WorksheetStatus, WALK_IN_CUSTOMER_NAME,
};
use lumina_store::LedgerStore;

// =============================================================================
// Customer Listing
// =============================================================================

/// Outcome of listing the customer directory.
///
/// The directory being unreachable must never block a sale, so the
/// listing degrades to a single walk-in placeholder instead of failing.
/// The two cases stay distinguishable for callers that care.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerListing {
    /// The directory answered.
    Live(Vec<Customer>),
    /// The directory could not be read; checkout continues against the
    /// walk-in identity.
    Degraded { placeholder: Customer },
}

impl CustomerListing {
    /// Flattens the listing into customers, hiding the degradation the
    /// way the billing screen shows it.
    pub fn into_customers(self) -> Vec<Customer> {
        match self {
            CustomerListing::Live(customers) => customers,
            CustomerListing::Degraded { placeholder } => vec![placeholder],
        }
    }

    /// True when the directory could not be read.
    pub fn is_degraded(&self) -> bool {
        matches!(self, CustomerListing::Degraded { .. })
    }
}

fn walk_in_customer() -> Customer {
    let now = Utc::now();
    Customer {
        id: "walk-in".to_string(),
        name: WALK_IN_CUSTOMER_NAME.to_string(),
        phone: None,
        city: None,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Billing Service
// =============================================================================

/// The billing orchestrator, generic over the ledger store.
///
/// Holds no state of its own beyond the injected store; every flow is a
/// sequence of pure core calls and awaited store calls.
#[derive(Debug)]
pub struct BillingService<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> BillingService<S> {
    /// Creates a service over the given store.
    pub fn new(store: S) -> Self {
        BillingService { store }
    }

    /// The underlying store (used by tests to stage data and outages).
    pub fn store(&self) -> &S {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Bill numbers
    // -------------------------------------------------------------------------

    /// The next bill number: today's date stamp plus the successor of the
    /// latest stored sequence. The sequence carries across days; only the
    /// date part is today's.
    pub async fn generate_bill_number(&self) -> BillingResult<String> {
        let latest = self.store.latest_bill_number().await?;
        let sequence = next_sequence(latest.as_deref())?;
        Ok(format_bill_number(Local::now().date_naive(), sequence))
    }

    // -------------------------------------------------------------------------
    // Bills
    // -------------------------------------------------------------------------

    /// Creates a bill from a validated input payload.
    ///
    /// ## Returns
    /// * `Err(BillingError::CustomerNotFound)` - unknown customer id;
    ///   raised before anything is written
    /// * `Err(BillingError::Core)` - invalid payload
    /// * `Err(BillingError::Store)` - persistence failure; the atomic
    ///   insert means no partial bill is left behind
    pub async fn create_bill(&self, input: CreateBillInput) -> BillingResult<Bill> {
        validate_bill_input(&input).map_err(CoreError::from)?;

        let bill_number = self.generate_bill_number().await?;

        let customer = self
            .store
            .find_customer(&input.customer_id)
            .await?
            .ok_or_else(|| BillingError::CustomerNotFound(input.customer_id.clone()))?;

        let bill_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let items: Vec<BillItem> = input
            .items
            .iter()
            .map(|item| build_item(&bill_id, item))
            .collect();

        let subtotal: f64 = items.iter().map(|item| item.total_value).sum();
        let payment_amount = calculate_payment_amount(subtotal + input.tax, input.payment_type);

        let bill = Bill {
            id: bill_id,
            bill_number,
            customer_id: customer.id,
            bill_date: now,
            bill_type: input.bill_type,
            subtotal,
            tax: input.tax,
            payment_type: input.payment_type,
            payment_amount,
            status: BillStatus::Completed,
            items,
            created_at: now,
        };

        self.store.create_bill_with_items(&bill).await?;

        info!(
            bill_number = %bill.bill_number,
            customer = %customer.name,
            items = bill.items.len(),
            payment_amount = bill.payment_amount,
            "Bill created"
        );

        Ok(bill)
    }

    /// Looks up one bill.
    pub async fn bill(&self, id: &str) -> BillingResult<Option<Bill>> {
        Ok(self.store.find_bill(id).await?)
    }

    /// Lists all bills, newest first.
    pub async fn bills(&self) -> BillingResult<Vec<Bill>> {
        Ok(self.store.list_bills().await?)
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// Decrements stock after a sale, flooring at zero.
    ///
    /// A missing item is `Ok(None)`, not an error: the sale already
    /// happened and stock bookkeeping must not unwind it.
    pub async fn update_inventory_after_sale(
        &self,
        item_id: &str,
        quantity_sold: i64,
    ) -> BillingResult<Option<InventoryItem>> {
        let Some(item) = self.store.find_inventory_item(item_id).await? else {
            warn!(item_id, "Inventory update for unknown item, skipping");
            return Ok(None);
        };

        let remaining = (item.quantity - quantity_sold).max(0);
        let updated = self
            .store
            .update_inventory_quantity(item_id, remaining)
            .await?;

        Ok(updated)
    }

    /// Lists the whole inventory.
    pub async fn inventory_items(&self) -> BillingResult<Vec<InventoryItem>> {
        Ok(self.store.list_inventory_items().await?)
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Lists the customer directory. Never fails: a store failure is
    /// logged and degraded to the walk-in placeholder so checkout can
    /// proceed.
    pub async fn customers(&self) -> CustomerListing {
        match self.store.list_customers().await {
            Ok(customers) => CustomerListing::Live(customers),
            Err(err) => {
                warn!(error = %err, "Customer directory unavailable, degrading to walk-in");
                CustomerListing::Degraded {
                    placeholder: walk_in_customer(),
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Worksheets
    // -------------------------------------------------------------------------

    /// Lists all worksheets, newest first.
    pub async fn worksheets(&self) -> BillingResult<Vec<Worksheet>> {
        Ok(self.store.list_worksheets().await?)
    }

    /// Looks up one worksheet.
    pub async fn worksheet(&self, id: &str) -> BillingResult<Option<Worksheet>> {
        Ok(self.store.find_worksheet(id).await?)
    }

    /// Opens a custom-order worksheet for an existing customer.
    pub async fn create_worksheet(&self, input: NewWorksheet) -> BillingResult<Worksheet> {
        validate_worksheet_input(&input).map_err(CoreError::from)?;

        let customer = self
            .store
            .find_customer(&input.customer_id)
            .await?
            .ok_or_else(|| BillingError::CustomerNotFound(input.customer_id.clone()))?;

        let now = Utc::now();
        let worksheet = Worksheet {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id,
            date: now,
            description: input.description,
            metal_type: input.metal_type,
            karatage: input.karatage,
            gold_given: input.gold_given,
            target_weight: input.target_weight,
            final_weight: input.final_weight,
            wastage: input.wastage,
            status: WorksheetStatus::InProgress,
            stones: input.stones.iter().map(build_stone).collect(),
            created_at: now,
            updated_at: now,
        };

        self.store.create_worksheet(&worksheet).await?;

        info!(worksheet_id = %worksheet.id, customer = %customer.name, "Worksheet opened");

        Ok(worksheet)
    }
}

// =============================================================================
// Assembly Helpers
// =============================================================================

fn build_item(bill_id: &str, input: &BillItemInput) -> BillItem {
    BillItem {
        id: Uuid::new_v4().to_string(),
        bill_id: bill_id.to_string(),
        description: input.description.clone(),
        metal_type: input.metal_type,
        karatage: input.karatage,
        weight: input.weight,
        pure_weight: input.pure_weight_or_derived(),
        size: input.size.clone(),
        size_value: input.size_value.clone(),
        quantity: input.quantity,
        rate: input.rate,
        total_value: input.price,
        stones: input.stones.iter().map(build_stone).collect(),
    }
}

fn build_stone(input: &StoneInput) -> Stone {
    Stone {
        id: Uuid::new_v4().to_string(),
        name: input.name.clone(),
        quantity: input.quantity,
        weight: input.weight,
        rate: input.rate,
        total_value: input.total_value(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lumina_core::{
        BillType, CreateBillInput, KaratGrade, MetalType, PaymentType,
    };
    use lumina_store::MemoryStore;

    fn service_with_fixtures() -> BillingService<MemoryStore> {
        BillingService::new(MemoryStore::with_fixtures())
    }

    fn ring_input(customer_id: &str) -> CreateBillInput {
        CreateBillInput {
            customer_id: customer_id.to_string(),
            items: vec![BillItemInput {
                description: "Gold Ring".to_string(),
                metal_type: MetalType::Gold,
                karatage: KaratGrade::K22,
                weight: 5.5,
                pure_weight: None,
                size: Some("Ring".to_string()),
                size_value: Some("17".to_string()),
                quantity: 1,
                rate: Some(6500.0),
                price: 35750.0,
                stones: vec![StoneInput {
                    name: "Diamond".to_string(),
                    quantity: 1,
                    weight: 0.5,
                    rate: 25000.0,
                }],
            }],
            bill_type: BillType::ReadyMade,
            tax: 0.0,
            payment_type: PaymentType::Cash,
        }
    }

    #[tokio::test]
    async fn test_create_bill_persists_and_numbers() {
        let service = service_with_fixtures();

        let bill = service.create_bill(ring_input("1")).await.unwrap();

        // Fixtures end at -0002, so this bill carries sequence 3 with
        // today's date stamp.
        let today = Local::now().date_naive().format("%Y%m%d").to_string();
        assert_eq!(bill.bill_number, format!("LJ-{today}-0003"));
        assert_eq!(bill.subtotal, 35750.0);
        assert_eq!(bill.payment_amount, 35750.0);
        assert_eq!(bill.status, BillStatus::Completed);
        assert_eq!(bill.items[0].pure_weight, 5.038);
        assert_eq!(bill.items[0].stones[0].total_value, 25000.0);

        let persisted = service.bill(&bill.id).await.unwrap().unwrap();
        assert_eq!(persisted.bill_number, bill.bill_number);
    }

    #[tokio::test]
    async fn test_card_surcharge_applies_on_the_bill() {
        let service = service_with_fixtures();

        let mut input = ring_input("1");
        input.payment_type = PaymentType::Card;

        let bill = service.create_bill(input).await.unwrap();
        // 35750 ≥ 20000, so the 3% bank charge lands on a card payment
        assert_eq!(bill.payment_amount, 36822.5);
    }

    #[tokio::test]
    async fn test_unknown_customer_writes_nothing() {
        let service = service_with_fixtures();
        let before = service.bills().await.unwrap().len();

        let err = service.create_bill(ring_input("999")).await.unwrap_err();
        assert!(matches!(err, BillingError::CustomerNotFound(id) if id == "999"));

        assert_eq!(service.bills().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_sequence_survives_day_boundaries() {
        let store = MemoryStore::new();
        let stamp = Utc.with_ymd_and_hms(2025, 1, 1, 18, 0, 0).unwrap();
        store
            .create_bill_with_items(&Bill {
                id: "b1".to_string(),
                bill_number: "LJ-20250101-0007".to_string(),
                customer_id: "1".to_string(),
                bill_date: stamp,
                bill_type: BillType::ReadyMade,
                subtotal: 1000.0,
                tax: 0.0,
                payment_type: PaymentType::Cash,
                payment_amount: 1000.0,
                status: BillStatus::Completed,
                items: vec![],
                created_at: stamp,
            })
            .await
            .unwrap();

        let service = BillingService::new(store);
        let number = service.generate_bill_number().await.unwrap();

        let today = Local::now().date_naive().format("%Y%m%d").to_string();
        assert_eq!(number, format!("LJ-{today}-0008"));
    }

    #[tokio::test]
    async fn test_empty_store_starts_at_one() {
        let service = BillingService::new(MemoryStore::new());
        let number = service.generate_bill_number().await.unwrap();
        assert!(number.ends_with("-0001"));
    }

    #[tokio::test]
    async fn test_inventory_floors_at_zero() {
        let service = service_with_fixtures();

        // Item "1" holds 12 pieces; overselling drains it to zero
        let updated = service
            .update_inventory_after_sale("1", 999)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 0);

        let missing = service.update_inventory_after_sale("nope", 1).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_customer_listing_degrades_to_walk_in() {
        let service = service_with_fixtures();

        let live = service.customers().await;
        assert!(!live.is_degraded());
        assert_eq!(live.into_customers().len(), 3);

        service.store().set_unavailable(true);
        let degraded = service.customers().await;
        assert!(degraded.is_degraded());

        let customers = degraded.into_customers();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, WALK_IN_CUSTOMER_NAME);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_lookup() {
        let service = service_with_fixtures();

        let mut input = ring_input("1");
        input.items.clear();

        let err = service.create_bill(input).await.unwrap_err();
        assert!(matches!(err, BillingError::Core(_)));
    }

    #[tokio::test]
    async fn test_worksheet_flow() {
        let service = service_with_fixtures();

        let worksheet = service
            .create_worksheet(NewWorksheet {
                customer_id: "3".to_string(),
                description: "Custom Gold Bangle".to_string(),
                metal_type: MetalType::Gold,
                karatage: KaratGrade::K22,
                gold_given: 10.0,
                target_weight: 9.5,
                final_weight: 9.4,
                wastage: 0.6,
                stones: vec![],
            })
            .await
            .unwrap();

        assert_eq!(worksheet.status, WorksheetStatus::InProgress);

        let fetched = service.worksheet(&worksheet.id).await.unwrap().unwrap();
        assert_eq!(fetched.description, "Custom Gold Bangle");
    }
}
