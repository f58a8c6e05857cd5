mod repository;

pub use repository::*;

/// SQL migration for the records table
pub const MIGRATION_001_RECORDS: &str = include_str!("migrations/001_records.sql");

/// Connection string for a throwaway in-memory database.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";
