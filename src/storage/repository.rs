use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::{
    Amount, DATE_FORMAT, LEGACY_INCOME_LABEL, NewRecord, Record, RecordId, RecordType, Summary,
};

use super::MIGRATION_001_RECORDS;

const RECORD_COLUMNS: &str = "id, date, item, record_type, amount";

/// Repository for persisting and querying ledger records.
///
/// The pool holds exactly one connection that is never reaped, so statements
/// are serialized and in-memory databases live as long as the repository.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database URL.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }

    /// Run database migrations. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(MIGRATION_001_RECORDS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Release the underlying connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert a new record and return its assigned id.
    pub async fn insert_record(&self, record: &NewRecord) -> Result<RecordId> {
        let result = sqlx::query(
            r#"
            INSERT INTO records (date, item, record_type, amount)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(record.date.format(DATE_FORMAT).to_string())
        .bind(&record.item)
        .bind(record.record_type.as_str())
        .bind(record.amount)
        .execute(&self.pool)
        .await
        .context("Failed to save record")?;

        Ok(result.last_insert_rowid())
    }

    /// Get a record by ID.
    pub async fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM records WHERE id = ?",
            RECORD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch record")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// List all records, newest date first; same-date records newest id first.
    pub async fn list_records(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM records ORDER BY date DESC, id DESC",
            RECORD_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list records")?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Delete a record by ID. Returns the number of rows removed (0 or 1).
    pub async fn delete_record(&self, id: RecordId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete record")?;
        Ok(result.rows_affected())
    }

    /// Compute the balance using SQL aggregation.
    /// Income adds, every other label deducts. TOTAL() yields 0.0 on an empty table.
    pub async fn compute_balance(&self) -> Result<Amount> {
        let row = sqlx::query(
            r#"
            SELECT TOTAL(CASE WHEN record_type IN (?, ?) THEN amount ELSE -amount END) AS balance
            FROM records
            "#,
        )
        .bind(RecordType::Income.as_str())
        .bind(LEGACY_INCOME_LABEL)
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute balance")?;

        Ok(row.get("balance"))
    }

    /// Income and expense totals in a single query.
    pub async fn compute_summary(&self) -> Result<Summary> {
        let row = sqlx::query(
            r#"
            SELECT
                TOTAL(CASE WHEN record_type IN (?, ?) THEN amount ELSE 0 END) AS income,
                TOTAL(CASE WHEN record_type IN (?, ?) THEN 0 ELSE amount END) AS expense,
                COUNT(*) AS count
            FROM records
            "#,
        )
        .bind(RecordType::Income.as_str())
        .bind(LEGACY_INCOME_LABEL)
        .bind(RecordType::Income.as_str())
        .bind(LEGACY_INCOME_LABEL)
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute summary")?;

        let count: i64 = row.get("count");
        Ok(Summary {
            income: row.get("income"),
            expense: row.get("expense"),
            count: count as usize,
        })
    }

    /// Map a row without rejecting it: NULL columns from other writers
    /// degrade the same way the aggregation queries treat them.
    fn row_to_record(row: &SqliteRow) -> Result<Record> {
        let id: RecordId = row.try_get("id").context("Invalid record ID")?;
        let label: Option<String> = row
            .try_get("record_type")
            .context("Invalid record type")?;
        let label = label.unwrap_or_default();

        if !RecordType::is_known_label(&label) {
            tracing::warn!(id, label = %label, "unknown record type, treating as expense");
        }

        let date: Option<String> = row.try_get("date").context("Invalid record date")?;
        let date = date.unwrap_or_default();
        if NaiveDate::parse_from_str(&date, DATE_FORMAT).is_err() {
            tracing::warn!(id, date = %date, "record date is not YYYY-MM-DD");
        }

        let item: Option<String> = row.try_get("item").context("Invalid record item")?;
        let amount: Option<Amount> = row.try_get("amount").context("Invalid record amount")?;

        Ok(Record {
            id,
            date,
            item: item.unwrap_or_default(),
            record_type: RecordType::from_stored(&label),
            amount: amount.unwrap_or_default(),
        })
    }
}
