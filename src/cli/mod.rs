use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::application::{LedgerStore, Outcome};
use crate::domain::{
    Amount, DATE_FORMAT, Record, RecordId, RecordType, format_amount, parse_amount,
};

/// Database file used when none is given.
pub const DEFAULT_DATABASE: &str = "my_ledger.db";

/// Accepted range for amounts entered on the command line.
pub const MIN_AMOUNT: Amount = 0.01;
pub const MAX_AMOUNT: Amount = 10_000_000.0;

/// Tally - Personal Income/Expense Ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Record dated income and expenses and keep a running balance")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, global = true, env = "TALLY_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an income or expense
    Add {
        /// Description (e.g., "Groceries", "Paycheck")
        item: String,

        /// Amount (e.g., "15.00" or "15")
        amount: String,

        /// Record type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        record_type: String,

        /// Date of the record (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all records, newest first, with the balance
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a record by ID
    Delete {
        /// Record ID (see `list`)
        id: RecordId,
    },

    /// Show the current balance
    Balance,

    /// Export records to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    /// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_tracing(&self) {
        let default_filter = if self.verbose {
            "tally=debug"
        } else {
            "tally=warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Open the store, run the command and close the store on every path.
    pub async fn run(self) -> Result<()> {
        let mut store = LedgerStore::open(&self.database)
            .await
            .with_context(|| format!("Failed to open database: {}", self.database))?;

        let result = match store.initialize().await {
            Ok(()) => run_command(&store, self.command).await,
            Err(err) => Err(err).context("Failed to initialize database"),
        };

        store.close().await;
        result
    }
}

async fn run_command(store: &LedgerStore, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {
            println!("Database initialized: {}", store.location());
        }

        Commands::Add {
            item,
            amount,
            record_type,
            date,
        } => {
            let amount =
                parse_amount(&amount).context("Invalid amount format. Use '15.00' or '15'")?;
            if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
                anyhow::bail!(
                    "Amount must be between {} and {}",
                    format_amount(MIN_AMOUNT),
                    format_amount(MAX_AMOUNT)
                );
            }

            let record_type = RecordType::from_str(&record_type).ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid record type '{}'. Valid types: income, expense",
                    record_type
                )
            })?;

            let date = match date {
                Some(date_str) => parse_date(&date_str).with_context(|| {
                    format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                })?,
                None => Local::now().date_naive(),
            };

            let result = store.add(date, &item, record_type, amount).await;
            report(&Outcome::from_add(&result))?;
            render_ledger(store).await?;
        }

        Commands::List { json } => {
            if json {
                let records = store.list().await?;
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                render_ledger(store).await?;
            }
        }

        Commands::Delete { id } => {
            if let Some(record) = store.get(id).await? {
                println!(
                    "Deleting #{}: {} {} {}",
                    record.id,
                    record.date,
                    record.item,
                    format_amount(record.amount)
                );
            }

            let result = store.delete(id).await;
            report(&Outcome::from_delete(&result))?;
            render_ledger(store).await?;
        }

        Commands::Balance => {
            let summary = store.summary().await?;
            let balance = store.balance().await?;
            println!("Income:  {:>12}", format_amount(summary.income));
            println!("Expense: {:>12}", format_amount(summary.expense));
            println!("Balance: {:>12}", format_amount(balance));
        }

        Commands::Export { format, output } => {
            run_export_command(store, &format, output.as_deref()).await?;
        }
    }

    Ok(())
}

/// Print the outcome of a mutation; a failure becomes the command's error.
fn report(outcome: &Outcome) -> Result<()> {
    if outcome.success {
        println!("{}", outcome.message);
        Ok(())
    } else {
        anyhow::bail!("{}", outcome.message)
    }
}

/// Re-read records and balance and print them.
async fn render_ledger(store: &LedgerStore) -> Result<()> {
    let records = store.list().await?;
    let balance = store.balance().await?;

    if records.is_empty() {
        println!("No records found.");
    } else {
        println!(
            "{:>6}  {:<10}  {:<30}  {:<8}  {:>12}",
            "ID", "DATE", "ITEM", "TYPE", "AMOUNT"
        );
        println!("{}", "-".repeat(74));
        for record in &records {
            println!("{}", format_row(record));
        }
        println!("{}", "-".repeat(74));
    }

    println!("Balance: {}", format_amount(balance));
    Ok(())
}

fn format_row(record: &Record) -> String {
    format!(
        "{:>6}  {:<10}  {:<30}  {:<8}  {:>12}",
        record.id,
        record.date,
        truncate(&record.item, 30),
        record.record_type.as_str(),
        format_amount(record.amount)
    )
}

async fn run_export_command(
    store: &LedgerStore,
    format: &str,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(store);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_records_csv(writer).await?;
            if output.is_some() {
                eprintln!("Exported {} records", count);
            }
        }
        "json" => {
            let snapshot = exporter.export_json(writer).await?;
            if output.is_some() {
                eprintln!(
                    "Exported {} records (balance {})",
                    snapshot.records.len(),
                    format_amount(snapshot.balance)
                );
            }
        }
        _ => {
            anyhow::bail!("Invalid export format '{}'. Valid formats: csv, json", format);
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
        .context("Date must be in YYYY-MM-DD format")
}
