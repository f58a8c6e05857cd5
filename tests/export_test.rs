mod common;

use anyhow::Result;
use common::{date, memory_store};
use tally::domain::RecordType;
use tally::io::{Exporter, LedgerSnapshot};

#[tokio::test]
async fn test_export_records_csv() -> Result<()> {
    let store = memory_store().await?;
    store
        .add(date("2023-10-01"), "Paycheck", RecordType::Income, 200.0)
        .await?;
    store
        .add(date("2023-10-02"), "Milk tea, large", RecordType::Expense, 15.5)
        .await?;

    let mut buffer = Vec::new();
    let count = Exporter::new(&store)
        .export_records_csv(&mut buffer)
        .await?;
    assert_eq!(count, 2);

    let output = String::from_utf8(buffer)?;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "id,date,item,record_type,amount");
    assert_eq!(lines[1], "2,2023-10-02,\"Milk tea, large\",expense,15.5");
    assert_eq!(lines[2], "1,2023-10-01,Paycheck,income,200");

    Ok(())
}

#[tokio::test]
async fn test_export_json_snapshot() -> Result<()> {
    let store = memory_store().await?;
    store
        .add(date("2023-10-27"), "Milk tea", RecordType::Expense, 15.0)
        .await?;

    let mut buffer = Vec::new();
    let snapshot = Exporter::new(&store).export_json(&mut buffer).await?;
    assert_eq!(snapshot.records.len(), 1);
    assert_eq!(snapshot.balance, -15.0);

    let parsed: LedgerSnapshot = serde_json::from_slice(&buffer)?;
    assert_eq!(parsed.records, snapshot.records);
    assert_eq!(parsed.records[0].record_type, RecordType::Expense);
    assert_eq!(parsed.balance, -15.0);

    Ok(())
}
