//! # Bill Repository
//!
//! Database operations for bills and their nested items and stones.
//!
//! ## Bill Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Atomic Bill Creation                              │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                     │
//! │     INSERT INTO bills            (1 row)                               │
//! │     INSERT INTO bill_items       (1 row per line item, ordered)        │
//! │     INSERT INTO bill_item_stones (1 row per embedded stone)            │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure rolls the whole tree back - a bill with half its items    │
//! │  is never visible, not even briefly.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::repository::parse_column;
use lumina_core::{Bill, BillItem, Stone};

/// Row shape for the `bills` table.
#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    id: String,
    bill_number: String,
    customer_id: String,
    bill_date: DateTime<Utc>,
    bill_type: String,
    subtotal: f64,
    tax: f64,
    payment_type: String,
    payment_amount: f64,
    status: String,
    created_at: DateTime<Utc>,
}

impl BillRow {
    fn into_bill(self, items: Vec<BillItem>) -> StoreResult<Bill> {
        Ok(Bill {
            id: self.id,
            bill_number: self.bill_number,
            customer_id: self.customer_id,
            bill_date: self.bill_date,
            bill_type: parse_column(&self.bill_type)?,
            subtotal: self.subtotal,
            tax: self.tax,
            payment_type: parse_column(&self.payment_type)?,
            payment_amount: self.payment_amount,
            status: parse_column(&self.status)?,
            items,
            created_at: self.created_at,
        })
    }
}

/// Row shape for the `bill_items` table.
#[derive(Debug, sqlx::FromRow)]
struct BillItemRow {
    id: String,
    bill_id: String,
    description: String,
    metal_type: String,
    karatage: String,
    weight: f64,
    pure_weight: f64,
    size: Option<String>,
    size_value: Option<String>,
    quantity: i64,
    rate: Option<f64>,
    total_value: f64,
}

impl BillItemRow {
    fn into_item(self, stones: Vec<Stone>) -> StoreResult<BillItem> {
        Ok(BillItem {
            id: self.id,
            bill_id: self.bill_id,
            description: self.description,
            metal_type: parse_column(&self.metal_type)?,
            karatage: parse_column(&self.karatage)?,
            weight: self.weight,
            pure_weight: self.pure_weight,
            size: self.size,
            size_value: self.size_value,
            quantity: self.quantity,
            rate: self.rate,
            total_value: self.total_value,
            stones,
        })
    }
}

/// Row shape shared by `bill_item_stones` and `worksheet_stones`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct StoneRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) quantity: i64,
    pub(crate) weight: f64,
    pub(crate) rate: f64,
    pub(crate) total_value: f64,
}

impl From<StoneRow> for Stone {
    fn from(row: StoneRow) -> Self {
        Stone {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            weight: row.weight,
            rate: row.rate,
            total_value: row.total_value,
        }
    }
}

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// The highest bill number on file, or `None` on an empty store.
    ///
    /// Ordered by `bill_number` descending: the textual format sorts the
    /// way the sequence was issued, and the trailing 4 digits of this
    /// value seed the next bill number.
    pub async fn latest_bill_number(&self) -> StoreResult<Option<String>> {
        let latest: Option<String> = sqlx::query_scalar(
            r#"
            SELECT bill_number
            FROM bills
            ORDER BY bill_number DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(latest)
    }

    /// Persists a bill with its nested items and stones in one transaction.
    ///
    /// ## Returns
    /// * `Err(StoreError::Duplicate)` - bill_number already taken (the
    ///   generation race lost); nothing is written
    pub async fn insert_bill(&self, bill: &Bill) -> StoreResult<()> {
        debug!(id = %bill.id, bill_number = %bill.bill_number, items = bill.items.len(), "Inserting bill");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO bills (
                id, bill_number, customer_id, bill_date, bill_type,
                subtotal, tax, payment_type, payment_amount, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&bill.id)
        .bind(&bill.bill_number)
        .bind(&bill.customer_id)
        .bind(bill.bill_date)
        .bind(bill.bill_type.to_string())
        .bind(bill.subtotal)
        .bind(bill.tax)
        .bind(bill.payment_type.as_str())
        .bind(bill.payment_amount)
        .bind(bill.status.to_string())
        .bind(bill.created_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in bill.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO bill_items (
                    id, bill_id, position, description, metal_type, karatage,
                    weight, pure_weight, size, size_value, quantity, rate, total_value
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
            )
            .bind(&item.id)
            .bind(&bill.id)
            .bind(position as i64)
            .bind(&item.description)
            .bind(item.metal_type.as_str())
            .bind(item.karatage.as_str())
            .bind(item.weight)
            .bind(item.pure_weight)
            .bind(&item.size)
            .bind(&item.size_value)
            .bind(item.quantity)
            .bind(item.rate)
            .bind(item.total_value)
            .execute(&mut *tx)
            .await?;

            for stone in &item.stones {
                sqlx::query(
                    r#"
                    INSERT INTO bill_item_stones (
                        id, bill_item_id, name, quantity, weight, rate, total_value
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(&stone.id)
                .bind(&item.id)
                .bind(&stone.name)
                .bind(stone.quantity)
                .bind(stone.weight)
                .bind(stone.rate)
                .bind(stone.total_value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets a bill (with nested items and stones) by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Bill>> {
        let row: Option<BillRow> = sqlx::query_as(
            r#"
            SELECT id, bill_number, customer_id, bill_date, bill_type,
                   subtotal, tax, payment_type, payment_amount, status, created_at
            FROM bills
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.load_items(&row.id).await?;
        row.into_bill(items).map(Some)
    }

    /// Lists all bills with nested items, highest bill number first.
    pub async fn list(&self) -> StoreResult<Vec<Bill>> {
        let rows: Vec<BillRow> = sqlx::query_as(
            r#"
            SELECT id, bill_number, customer_id, bill_date, bill_type,
                   subtotal, tax, payment_type, payment_amount, status, created_at
            FROM bills
            ORDER BY bill_number DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut bills = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.load_items(&row.id).await?;
            bills.push(row.into_bill(items)?);
        }

        Ok(bills)
    }

    /// Loads the ordered line items (and their stones) of one bill.
    async fn load_items(&self, bill_id: &str) -> StoreResult<Vec<BillItem>> {
        let item_rows: Vec<BillItemRow> = sqlx::query_as(
            r#"
            SELECT id, bill_id, description, metal_type, karatage,
                   weight, pure_weight, size, size_value, quantity, rate, total_value
            FROM bill_items
            WHERE bill_id = ?1
            ORDER BY position
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(item_rows.len());
        for item_row in item_rows {
            let stone_rows: Vec<StoneRow> = sqlx::query_as(
                r#"
                SELECT id, name, quantity, weight, rate, total_value
                FROM bill_item_stones
                WHERE bill_item_id = ?1
                ORDER BY name
                "#,
            )
            .bind(&item_row.id)
            .fetch_all(&self.pool)
            .await?;

            let stones = stone_rows.into_iter().map(Stone::from).collect();
            items.push(item_row.into_item(stones)?);
        }

        Ok(items)
    }

    /// Counts bills (for diagnostics).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use lumina_core::{BillStatus, BillType, Customer, KaratGrade, MetalType, PaymentType};

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let now = Utc::now();
        db.customers()
            .insert(&Customer {
                id: "c1".to_string(),
                name: "Rajesh Kumar".to_string(),
                phone: None,
                city: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        db
    }

    fn sample_bill(id: &str, bill_number: &str) -> Bill {
        let now = Utc::now();
        Bill {
            id: id.to_string(),
            bill_number: bill_number.to_string(),
            customer_id: "c1".to_string(),
            bill_date: now,
            bill_type: BillType::ReadyMade,
            subtotal: 43750.0,
            tax: 0.0,
            payment_type: PaymentType::Card,
            payment_amount: 45062.5,
            status: BillStatus::Completed,
            items: vec![
                BillItem {
                    id: format!("{id}-i1"),
                    bill_id: id.to_string(),
                    description: "Gold Ring".to_string(),
                    metal_type: MetalType::Gold,
                    karatage: KaratGrade::K22,
                    weight: 5.5,
                    pure_weight: 5.038,
                    size: Some("Ring".to_string()),
                    size_value: Some("17".to_string()),
                    quantity: 1,
                    rate: Some(6500.0),
                    total_value: 35750.0,
                    stones: vec![Stone {
                        id: format!("{id}-s1"),
                        name: "Diamond".to_string(),
                        quantity: 1,
                        weight: 0.5,
                        rate: 25000.0,
                        total_value: 25000.0,
                    }],
                },
                BillItem {
                    id: format!("{id}-i2"),
                    bill_id: id.to_string(),
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
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_bill_round_trips_with_nested_items_and_stones() {
        let db = test_db().await;
        let bill = sample_bill("b1", "LJ-20250126-0001");

        db.bills().insert_bill(&bill).await.unwrap();

        let fetched = db.bills().get_by_id("b1").await.unwrap().unwrap();
        assert_eq!(fetched.bill_number, bill.bill_number);
        assert_eq!(fetched.subtotal, bill.subtotal);
        assert_eq!(fetched.payment_type, PaymentType::Card);
        // Items come back in ring-up order with their stones intact
        assert_eq!(fetched.items, bill.items);
    }

    #[tokio::test]
    async fn test_duplicate_bill_number_fails_loudly() {
        let db = test_db().await;

        db.bills()
            .insert_bill(&sample_bill("b1", "LJ-20250126-0001"))
            .await
            .unwrap();

        let err = db
            .bills()
            .insert_bill(&sample_bill("b2", "LJ-20250126-0001"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        // The losing transaction left nothing behind
        assert_eq!(db.bills().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_latest_bill_number_tracks_highest() {
        let db = test_db().await;

        assert_eq!(db.bills().latest_bill_number().await.unwrap(), None);

        db.bills()
            .insert_bill(&sample_bill("b1", "LJ-20250125-0001"))
            .await
            .unwrap();
        db.bills()
            .insert_bill(&sample_bill("b2", "LJ-20250126-0002"))
            .await
            .unwrap();

        let latest = db.bills().latest_bill_number().await.unwrap();
        assert_eq!(latest.as_deref(), Some("LJ-20250126-0002"));
    }
}
