use super::StoreError;

pub const ADDED_MESSAGE: &str = "added successfully";
pub const DELETED_MESSAGE: &str = "deleted successfully";

/// Success flag plus a human-readable message, as shown to the user
/// after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(error: &StoreError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
        }
    }

    pub fn from_add<T>(result: &Result<T, StoreError>) -> Self {
        match result {
            Ok(_) => Self::ok(ADDED_MESSAGE),
            Err(err) => Self::failed(err),
        }
    }

    pub fn from_delete(result: &Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self::ok(DELETED_MESSAGE),
            Err(err) => Self::failed(err),
        }
    }

    pub fn as_tuple(&self) -> (bool, &str) {
        (self.success, &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_outcomes() {
        let ok: Result<i64, StoreError> = Ok(7);
        assert_eq!(
            Outcome::from_add(&ok).as_tuple(),
            (true, "added successfully")
        );

        let err: Result<i64, StoreError> = Err(StoreError::empty_description());
        assert_eq!(
            Outcome::from_add(&err).as_tuple(),
            (false, "description must not be empty")
        );
    }

    #[test]
    fn test_delete_outcomes() {
        assert_eq!(
            Outcome::from_delete(&Ok(())).as_tuple(),
            (true, "deleted successfully")
        );

        let err = Err(StoreError::Storage(anyhow::anyhow!("database is locked")));
        let outcome = Outcome::from_delete(&err);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "database is locked");
    }
}
