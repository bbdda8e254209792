//! # History Repository
//!
//! Database operations for the bounded calculation history.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       History Entry Lifecycle                           │
//! │                                                                         │
//! │  1. INSERT                                                              │
//! │     └── insert(&entry) → row stored, oldest rows beyond the            │
//! │         capacity evicted in the same transaction                        │
//! │                                                                         │
//! │  2. (OPTIONAL) ATTACH ADVICE                                            │
//! │     └── set_advice(id, text) → advisory verdict recorded               │
//! │                                                                         │
//! │  3. READ                                                                │
//! │     └── list(limit) / get_by_id(id) → newest first                     │
//! │                                                                         │
//! │  4. (OPTIONAL) CLEAR                                                    │
//! │     └── clear() → all entries deleted                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bounded Retention
//! At most [`HISTORY_CAPACITY`] entries are kept. Eviction happens inside
//! the insert transaction, ordered by `created_at` (rowid breaks ties for
//! entries created in the same instant), so the table can never exceed the
//! cap between calls. No durability promises beyond that.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use dealcalc_core::{
    CalculationMode, DealType, DiscountType, HistoryEntry, PricingInput, PricingResult,
    HISTORY_CAPACITY,
};

/// Repository for calculation history operations.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    /// Creates a new HistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HistoryRepository { pool }
    }

    /// Inserts a history entry, evicting the oldest entries beyond the
    /// retention capacity in the same transaction.
    pub async fn insert(&self, entry: &HistoryEntry) -> DbResult<()> {
        debug!(id = %entry.id, mode = entry.result.calculation_mode.as_str(), "Inserting history entry");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO calculation_history (
                id, created_at,
                original_price, discount_value, discount_type, quantity,
                tax_rate, shipping_cost, additional_coupon, currency,
                item_name, target_price, deal_type,
                final_price, total_cost, total_saving, tax_amount,
                price_per_unit, effective_discount_rate, calculation_mode,
                ai_advice
            ) VALUES (
                ?1, ?2,
                ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12, ?13,
                ?14, ?15, ?16, ?17,
                ?18, ?19, ?20,
                ?21
            )
            "#,
        )
        .bind(&entry.id)
        .bind(entry.timestamp)
        .bind(entry.input.original_price)
        .bind(entry.input.discount_value)
        .bind(entry.input.discount_type.as_str())
        .bind(entry.input.quantity)
        .bind(entry.input.tax_rate)
        .bind(entry.input.shipping_cost)
        .bind(entry.input.additional_coupon)
        .bind(&entry.input.currency)
        .bind(&entry.input.item_name)
        .bind(entry.input.target_price)
        .bind(entry.input.deal_type.as_str())
        // NaN binds as NULL in SQLite; read back as NaN in map_row.
        .bind(entry.result.final_price)
        .bind(entry.result.total_cost)
        .bind(entry.result.total_saving)
        .bind(entry.result.tax_amount)
        .bind(entry.result.price_per_unit)
        .bind(entry.result.effective_discount_rate)
        .bind(entry.result.calculation_mode.as_str())
        .bind(&entry.ai_advice)
        .execute(&mut *tx)
        .await?;

        // Keep only the newest HISTORY_CAPACITY rows.
        sqlx::query(
            r#"
            DELETE FROM calculation_history
            WHERE id NOT IN (
                SELECT id FROM calculation_history
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?1
            )
            "#,
        )
        .bind(HISTORY_CAPACITY)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Lists history entries, newest first.
    ///
    /// ## Arguments
    /// * `limit` - Maximum number of entries to return
    pub async fn list(&self, limit: i64) -> DbResult<Vec<HistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM calculation_history
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Gets a single history entry by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<HistoryEntry>> {
        let row = sqlx::query("SELECT * FROM calculation_history WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    /// Attaches advisory text to an existing entry.
    ///
    /// The advisory call happens after the calculation is already stored,
    /// so the verdict arrives as an update, not part of the insert.
    pub async fn set_advice(&self, id: &str, advice: &str) -> DbResult<()> {
        debug!(id = %id, "Attaching advisory text");

        let result = sqlx::query("UPDATE calculation_history SET ai_advice = ?1 WHERE id = ?2")
            .bind(advice)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        Ok(())
    }

    /// Deletes all history entries.
    pub async fn clear(&self) -> DbResult<u64> {
        debug!("Clearing calculation history");

        let result = sqlx::query("DELETE FROM calculation_history")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Returns the number of stored entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calculation_history")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Decodes one row into a HistoryEntry.
///
/// Runtime-checked by column name (the schema is owned by this crate's
/// migrations). Enum TEXT columns that hold unknown values surface as
/// [`DbError::Decode`].
fn map_row(row: &SqliteRow) -> DbResult<HistoryEntry> {
    let id: String = row.try_get("id")?;

    let discount_type = parse_enum(&id, "discount_type", row, DiscountType::parse)?;
    let deal_type = parse_enum(&id, "deal_type", row, DealType::parse)?;
    let calculation_mode = parse_enum(&id, "calculation_mode", row, CalculationMode::parse)?;

    let timestamp: DateTime<Utc> = row.try_get("created_at")?;

    Ok(HistoryEntry {
        id,
        timestamp,
        input: PricingInput {
            original_price: row.try_get("original_price")?,
            discount_value: row.try_get("discount_value")?,
            discount_type,
            quantity: row.try_get("quantity")?,
            tax_rate: row.try_get("tax_rate")?,
            shipping_cost: row.try_get("shipping_cost")?,
            additional_coupon: row.try_get("additional_coupon")?,
            currency: row.try_get("currency")?,
            item_name: row.try_get("item_name")?,
            target_price: row.try_get("target_price")?,
            deal_type,
        },
        result: PricingResult {
            final_price: real_or_nan(row, "final_price")?,
            total_cost: real_or_nan(row, "total_cost")?,
            total_saving: real_or_nan(row, "total_saving")?,
            tax_amount: real_or_nan(row, "tax_amount")?,
            price_per_unit: real_or_nan(row, "price_per_unit")?,
            effective_discount_rate: real_or_nan(row, "effective_discount_rate")?,
            calculation_mode,
        },
        ai_advice: row.try_get("ai_advice")?,
    })
}

/// Reads a nullable REAL column, mapping NULL back to NaN (SQLite stores
/// NaN as NULL; see the schema comment).
fn real_or_nan(row: &SqliteRow, column: &str) -> DbResult<f64> {
    Ok(row.try_get::<Option<f64>, _>(column)?.unwrap_or(f64::NAN))
}

/// Parses an enum TEXT column with the given parser.
fn parse_enum<T>(
    id: &str,
    column: &str,
    row: &SqliteRow,
    parse: fn(&str) -> Option<T>,
) -> DbResult<T> {
    let text: String = row.try_get(column)?;
    parse(&text).ok_or_else(|| DbError::Decode {
        id: id.to_string(),
        reason: format!("unknown {column} '{text}'"),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
