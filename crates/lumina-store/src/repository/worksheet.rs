//! # Worksheet Repository
//!
//! Database operations for custom-order worksheets and their stones.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::repository::bill::StoneRow;
use crate::repository::parse_column;
use lumina_core::{Stone, Worksheet};

/// Row shape for the `worksheets` table.
#[derive(Debug, sqlx::FromRow)]
struct WorksheetRow {
    id: String,
    customer_id: String,
    date: DateTime<Utc>,
    description: String,
    metal_type: String,
    karatage: String,
    gold_given: f64,
    target_weight: f64,
    final_weight: f64,
    wastage: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorksheetRow {
    fn into_worksheet(self, stones: Vec<Stone>) -> StoreResult<Worksheet> {
        Ok(Worksheet {
            id: self.id,
            customer_id: self.customer_id,
            date: self.date,
            description: self.description,
            metal_type: parse_column(&self.metal_type)?,
            karatage: parse_column(&self.karatage)?,
            gold_given: self.gold_given,
            target_weight: self.target_weight,
            final_weight: self.final_weight,
            wastage: self.wastage,
            status: parse_column(&self.status)?,
            stones,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for worksheet database operations.
#[derive(Debug, Clone)]
pub struct WorksheetRepository {
    pool: SqlitePool,
}

impl WorksheetRepository {
    /// Creates a new WorksheetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WorksheetRepository { pool }
    }

    /// Gets a worksheet (with its stones) by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Worksheet>> {
        let row: Option<WorksheetRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, date, description, metal_type, karatage,
                   gold_given, target_weight, final_weight, wastage, status,
                   created_at, updated_at
            FROM worksheets
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stones = self.load_stones(&row.id).await?;
        row.into_worksheet(stones).map(Some)
    }

    /// Lists all worksheets, most recently opened first.
    pub async fn list(&self) -> StoreResult<Vec<Worksheet>> {
        let rows: Vec<WorksheetRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, date, description, metal_type, karatage,
                   gold_given, target_weight, final_weight, wastage, status,
                   created_at, updated_at
            FROM worksheets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut worksheets = Vec::with_capacity(rows.len());
        for row in rows {
            let stones = self.load_stones(&row.id).await?;
            worksheets.push(row.into_worksheet(stones)?);
        }

        Ok(worksheets)
    }

    /// Persists a worksheet with its stones in one transaction.
    pub async fn insert(&self, worksheet: &Worksheet) -> StoreResult<()> {
        debug!(id = %worksheet.id, customer_id = %worksheet.customer_id, "Inserting worksheet");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO worksheets (
                id, customer_id, date, description, metal_type, karatage,
                gold_given, target_weight, final_weight, wastage, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&worksheet.id)
        .bind(&worksheet.customer_id)
        .bind(worksheet.date)
        .bind(&worksheet.description)
        .bind(worksheet.metal_type.as_str())
        .bind(worksheet.karatage.as_str())
        .bind(worksheet.gold_given)
        .bind(worksheet.target_weight)
        .bind(worksheet.final_weight)
        .bind(worksheet.wastage)
        .bind(worksheet.status.to_string())
        .bind(worksheet.created_at)
        .bind(worksheet.updated_at)
        .execute(&mut *tx)
        .await?;

        for stone in &worksheet.stones {
            sqlx::query(
                r#"
                INSERT INTO worksheet_stones (
                    id, worksheet_id, name, quantity, weight, rate, total_value
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&stone.id)
            .bind(&worksheet.id)
            .bind(&stone.name)
            .bind(stone.quantity)
            .bind(stone.weight)
            .bind(stone.rate)
            .bind(stone.total_value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Loads the stones tracked on one worksheet.
    async fn load_stones(&self, worksheet_id: &str) -> StoreResult<Vec<Stone>> {
        let rows: Vec<StoneRow> = sqlx::query_as(
            r#"
            SELECT id, name, quantity, weight, rate, total_value
            FROM worksheet_stones
            WHERE worksheet_id = ?1
            ORDER BY name
            "#,
        )
        .bind(worksheet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Stone::from).collect())
    }
}
