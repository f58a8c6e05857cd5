use thiserror::Error;

/// Message reported when a record description is empty after trimming.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "description must not be empty";

/// Message reported when an amount is negative, NaN or infinite.
pub const INVALID_AMOUNT_MESSAGE: &str = "amount must be a non-negative number";

#[derive(Error, Debug)]
pub enum StoreError {
    /// Input broke a store-enforced rule. Nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("Ledger store is not initialized")]
    NotInitialized,

    /// The persistence layer failed.
    #[error("{}", storage_message(.0))]
    Storage(anyhow::Error),
}

// Not a `#[source]`: the message already carries the cause.
impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Storage(err)
    }
}

impl StoreError {
    pub fn empty_description() -> Self {
        StoreError::Validation(EMPTY_DESCRIPTION_MESSAGE.to_string())
    }

    pub fn invalid_amount() -> Self {
        StoreError::Validation(INVALID_AMOUNT_MESSAGE.to_string())
    }
}

/// Outermost context plus the root cause. The middle of the chain is skipped:
/// sqlx errors repeat the database message one level down.
fn storage_message(err: &anyhow::Error) -> String {
    let context = err.to_string();
    let root = err.root_cause().to_string();
    if context == root {
        context
    } else {
        format!("{}: {}", context, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_validation_message() {
        assert_eq!(
            StoreError::empty_description().to_string(),
            "description must not be empty"
        );
        assert_eq!(
            StoreError::invalid_amount().to_string(),
            "amount must be a non-negative number"
        );
    }

    #[test]
    fn test_storage_error_keeps_underlying_message() {
        let result: anyhow::Result<()> =
            Err(anyhow::anyhow!("disk I/O error")).context("Failed to save record");
        let err = StoreError::from(result.unwrap_err());
        assert_eq!(err.to_string(), "Failed to save record: disk I/O error");
    }

    #[test]
    fn test_storage_error_skips_repeated_middle_of_chain() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("(code: 1) no such table: records"))
            .context("error returned from database: (code: 1) no such table: records")
            .context("Failed to delete record");
        let err = StoreError::from(result.unwrap_err());
        assert_eq!(
            err.to_string(),
            "Failed to delete record: (code: 1) no such table: records"
        );
    }

    #[test]
    fn test_storage_error_without_context() {
        let err = StoreError::from(anyhow::anyhow!("database is locked"));
        assert_eq!(err.to_string(), "database is locked");
    }
}
