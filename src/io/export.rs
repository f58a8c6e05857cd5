use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerStore;
use crate::domain::{Amount, Record};

/// Ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub balance: Amount,
    pub records: Vec<Record>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    store: &'a LedgerStore,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Export records to CSV format, in list order
    pub async fn export_records_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let records = self.store.list().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "item", "record_type", "amount"])?;

        for record in &records {
            csv_writer.write_record([
                record.id.to_string(),
                record.date.clone(),
                record.item.clone(),
                record.record_type.as_str().to_string(),
                record.amount.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(records.len())
    }

    /// Export the whole ledger as a JSON snapshot
    pub async fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let records = self.store.list().await?;
        let balance = self.store.balance().await?;

        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            balance,
            records,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
