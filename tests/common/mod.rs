// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use tally::application::LedgerStore;
use tempfile::TempDir;

/// Helper to create an initialized in-memory store
pub async fn memory_store() -> Result<LedgerStore> {
    let mut store = LedgerStore::in_memory().await?;
    store.initialize().await?;
    Ok(store)
}

/// Helper to create an initialized store backed by a temporary database file
pub async fn file_store() -> Result<(LedgerStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = open_in(&temp_dir).await?;
    Ok((store, temp_dir))
}

/// Open (and initialize) the database file inside an existing temp dir
pub async fn open_in(temp_dir: &TempDir) -> Result<LedgerStore> {
    let db_path = db_path(temp_dir);
    let mut store = LedgerStore::open(&db_path).await?;
    store.initialize().await?;
    Ok(store)
}

pub fn db_path(temp_dir: &TempDir) -> String {
    temp_dir.path().join("test.db").to_str().unwrap().to_string()
}

/// Helper to parse a date string into a NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}
