use chrono::NaiveDate;

use crate::domain::{Amount, NewRecord, Record, RecordId, RecordType, Summary};
use crate::storage::{IN_MEMORY_URL, Repository};

use super::StoreError;

/// Lifecycle of a store. Closing consumes the store, so there is no `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Ready,
}

/// The ledger: owns the record table, validates input and derives the balance.
/// This is the only interface presentation code should use.
///
/// Operations run one at a time over a single connection. Callers that open a
/// store must call [`LedgerStore::close`] on every exit path.
pub struct LedgerStore {
    repo: Repository,
    state: StoreState,
    location: String,
}

impl LedgerStore {
    /// Open (creating if missing) a database file. The store is not usable
    /// until [`LedgerStore::initialize`] has run.
    pub async fn open(database_path: &str) -> Result<Self, StoreError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        tracing::debug!(path = database_path, "opened ledger database");
        Ok(Self::with_repository(repo, database_path))
    }

    /// Open a private in-memory database, gone once the store is closed.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let repo = Repository::connect(IN_MEMORY_URL).await?;
        Ok(Self::with_repository(repo, ":memory:"))
    }

    fn with_repository(repo: Repository, location: &str) -> Self {
        Self {
            repo,
            state: StoreState::Uninitialized,
            location: location.to_string(),
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Ensure the schema exists. Idempotent.
    pub async fn initialize(&mut self) -> Result<(), StoreError> {
        self.repo.migrate().await?;
        self.state = StoreState::Ready;
        tracing::info!(location = %self.location, "ledger initialized");
        Ok(())
    }

    /// Record a new entry and return its id.
    ///
    /// The description is trimmed and must not be empty; the amount must be a
    /// finite, non-negative number. Invalid input never reaches storage.
    pub async fn add(
        &self,
        date: NaiveDate,
        item: &str,
        record_type: RecordType,
        amount: Amount,
    ) -> Result<RecordId, StoreError> {
        self.ensure_ready()?;

        let item = item.trim();
        if item.is_empty() {
            tracing::warn!("rejected record with empty description");
            return Err(StoreError::empty_description());
        }
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!(amount, "rejected record with invalid amount");
            return Err(StoreError::invalid_amount());
        }

        let record = NewRecord {
            date,
            item: item.to_string(),
            record_type,
            amount,
        };
        let id = self.repo.insert_record(&record).await?;
        tracing::debug!(id, %date, %record_type, amount, "record added");
        Ok(id)
    }

    /// Snapshot of every record, newest date first, ties broken by newest id.
    pub async fn list(&self) -> Result<Vec<Record>, StoreError> {
        self.ensure_ready()?;
        Ok(self.repo.list_records().await?)
    }

    /// Look up a single record.
    pub async fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        self.ensure_ready()?;
        Ok(self.repo.get_record(id).await?)
    }

    /// Delete a record. Deleting an unknown id succeeds and changes nothing.
    pub async fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        self.ensure_ready()?;
        let removed = self.repo.delete_record(id).await?;
        tracing::debug!(id, removed, "record deleted");
        Ok(())
    }

    /// Total income minus everything else, recomputed from all records.
    pub async fn balance(&self) -> Result<Amount, StoreError> {
        self.ensure_ready()?;
        Ok(self.repo.compute_balance().await?)
    }

    /// Income and expense totals alongside the record count.
    pub async fn summary(&self) -> Result<Summary, StoreError> {
        self.ensure_ready()?;
        Ok(self.repo.compute_summary().await?)
    }

    /// Release the database connection. The store cannot be used afterwards.
    pub async fn close(self) {
        self.repo.close().await;
        tracing::info!(location = %self.location, "ledger closed");
    }

    fn ensure_ready(&self) -> Result<(), StoreError> {
        match self.state {
            StoreState::Ready => Ok(()),
            StoreState::Uninitialized => Err(StoreError::NotInitialized),
        }
    }
}
