use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Amount;

/// Database-assigned record identifier. Never supplied by callers.
pub type RecordId = i64;

/// Date format used for the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Labels written by the original desktop ledger.
pub const LEGACY_INCOME_LABEL: &str = "收入";
pub const LEGACY_EXPENSE_LABEL: &str = "支出";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// Money coming in; adds to the balance
    Income,
    /// Money going out; deducted from the balance
    Expense,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Income => "income",
            RecordType::Expense => "expense",
        }
    }

    /// Parse a user-supplied label. Lenient about case, whitespace and the
    /// localized labels.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            LEGACY_INCOME_LABEL => return Some(RecordType::Income),
            LEGACY_EXPENSE_LABEL => return Some(RecordType::Expense),
            _ => {}
        }
        match s.trim().to_lowercase().as_str() {
            "income" => Some(RecordType::Income),
            "expense" => Some(RecordType::Expense),
            _ => None,
        }
    }

    /// Classify a label read back from the `records` table.
    ///
    /// Only the exact income labels count as income; this must agree with the
    /// balance query, which deducts every other label.
    pub fn from_stored(label: &str) -> Self {
        match label {
            "income" | LEGACY_INCOME_LABEL => RecordType::Income,
            _ => RecordType::Expense,
        }
    }

    /// True for the labels `from_stored` recognizes without falling back.
    pub fn is_known_label(label: &str) -> bool {
        matches!(
            label,
            "income" | "expense" | LEGACY_INCOME_LABEL | LEGACY_EXPENSE_LABEL
        )
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry. Immutable once stored.
///
/// `date` is the column text as stored. Rows written through the store are
/// always `YYYY-MM-DD`; rows from other writers are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub date: String,
    pub item: String,
    pub record_type: RecordType,
    pub amount: Amount,
}

/// Validated input for a new record, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub item: String,
    pub record_type: RecordType,
    pub amount: Amount,
}
