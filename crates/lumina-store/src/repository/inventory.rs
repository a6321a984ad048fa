//! # Inventory Repository
//!
//! Database operations for shelf stock. The only write the billing flow
//! performs here is the absolute quantity update after a sale; the
//! floor-at-zero arithmetic happens in the orchestrator, not in SQL.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::repository::parse_column;
use lumina_core::InventoryItem;

/// Row shape for the `inventory_items` table; enum columns stay textual
/// until conversion.
#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    id: String,
    sku: String,
    name: String,
    metal_type: String,
    karatage: String,
    weight: f64,
    quantity: i64,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InventoryRow {
    fn into_item(self) -> StoreResult<InventoryItem> {
        Ok(InventoryItem {
            id: self.id,
            sku: self.sku,
            name: self.name,
            metal_type: parse_column(&self.metal_type)?,
            karatage: parse_column(&self.karatage)?,
            weight: self.weight,
            quantity: self.quantity,
            price: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Gets an inventory item by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<InventoryItem>> {
        let row: Option<InventoryRow> = sqlx::query_as(
            r#"
            SELECT id, sku, name, metal_type, karatage,
                   weight, quantity, price, created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(InventoryRow::into_item).transpose()
    }

    /// Lists the whole inventory, by SKU.
    pub async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows: Vec<InventoryRow> = sqlx::query_as(
            r#"
            SELECT id, sku, name, metal_type, karatage,
                   weight, quantity, price, created_at, updated_at
            FROM inventory_items
            ORDER BY sku
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(InventoryRow::into_item).collect()
    }

    /// Inserts a new inventory item.
    ///
    /// ## Returns
    /// * `Err(StoreError::Duplicate)` - SKU already exists
    pub async fn insert(&self, item: &InventoryItem) -> StoreResult<()> {
        debug!(sku = %item.sku, "Inserting inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, sku, name, metal_type, karatage,
                weight, quantity, price, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.metal_type.as_str())
        .bind(item.karatage.as_str())
        .bind(item.weight)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Writes an absolute quantity and returns the updated item, or
    /// `None` when the item does not exist.
    pub async fn set_quantity(&self, id: &str, quantity: i64) -> StoreResult<Option<InventoryItem>> {
        debug!(id = %id, quantity = %quantity, "Updating inventory quantity");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET quantity = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use lumina_core::{KaratGrade, MetalType};

    fn sample_item(id: &str, sku: &str) -> InventoryItem {
        let now = Utc::now();
        InventoryItem {
            id: id.to_string(),
            sku: sku.to_string(),
            name: "Gold Ring 22K".to_string(),
            metal_type: MetalType::Gold,
            karatage: KaratGrade::K22,
            weight: 5.5,
            quantity: 12,
            price: 35000.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_inventory_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory()
            .insert(&sample_item("1", "GR-22K-001"))
            .await
            .unwrap();

        let item = db.inventory().get_by_id("1").await.unwrap().unwrap();
        assert_eq!(item.sku, "GR-22K-001");
        assert_eq!(item.karatage, KaratGrade::K22);
        assert_eq!(item.quantity, 12);
    }

    #[tokio::test]
    async fn test_set_quantity_writes_absolute_value() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory()
            .insert(&sample_item("1", "GR-22K-001"))
            .await
            .unwrap();

        let updated = db.inventory().set_quantity("1", 7).await.unwrap().unwrap();
        assert_eq!(updated.quantity, 7);

        let missing = db.inventory().set_quantity("missing", 7).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_sku() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory()
            .insert(&sample_item("2", "SB-925-001"))
            .await
            .unwrap();
        db.inventory()
            .insert(&sample_item("1", "GR-22K-001"))
            .await
            .unwrap();

        let items = db.inventory().list().await.unwrap();
        let skus: Vec<&str> = items.iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["GR-22K-001", "SB-925-001"]);
    }
}
