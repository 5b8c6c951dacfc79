use clap::{Parser, Subcommand, ValueEnum};
use finboard::application::service::TransactionService;
use finboard::domain::country::Country;
use finboard::domain::ports::TransactionStore;
use finboard::infrastructure::in_memory::{InMemoryTransactionStore, StoreOptions};
use finboard::interfaces::csv::transaction_reader::TransactionReader;
use finboard::interfaces::report_writer::{OutputFormat, ReportWriter};
use finboard::log::init_logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about = "Multi-country transaction ledger", long_about = None)]
struct Cli {
    /// Transactions CSV file (description,amount,currency,date,country).
    /// Sample data is loaded when omitted.
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Simulated backend latency per store call, in milliseconds
    #[arg(long, global = true, default_value_t = 0)]
    latency_ms: u64,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List supported countries and their currencies
    Countries,
    /// List a country's transactions, newest first
    List {
        #[arg(short, long, default_value = "BR")]
        country: String,
    },
    /// Per-day totals for a country
    Daily {
        #[arg(short, long, default_value = "BR")]
        country: String,
    },
    /// Per-currency balance for a country
    Balance {
        #[arg(short, long, default_value = "BR")]
        country: String,
    },
    /// Transaction statistics, optionally for a single country
    Stats {
        #[arg(short, long)]
        country: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let latency = (cli.latency_ms > 0).then(|| Duration::from_millis(cli.latency_ms));
    let store = InMemoryTransactionStore::from_options(StoreOptions {
        latency,
        seed: cli.input.is_none(),
    })
    .into_diagnostic()?;

    if let Some(path) = &cli.input {
        let file = File::open(path).into_diagnostic()?;
        let reader = TransactionReader::new(file);
        for (row, entry) in reader.transactions().enumerate() {
            let outcome = match entry {
                Ok(data) => store.create(data).await.map(|_| ()),
                Err(e) => Err(e),
            };
            if let Err(e) = outcome {
                debug!(row = row + 1, error = %e, "Skipping transaction");
                eprintln!("Skipping row {}: {}", row + 1, e);
            }
        }
    }

    let service = TransactionService::new(Box::new(store));
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), cli.format.into());

    match cli.command {
        Commands::Countries => {
            writer.write_countries(&Country::supported()).into_diagnostic()?;
        }
        Commands::List { country } => {
            let country = Country::from_code(&country).into_diagnostic()?;
            let transactions = service.by_country(country.code()).await.into_diagnostic()?;
            writer
                .write_transactions(&transactions, &country)
                .into_diagnostic()?;
        }
        Commands::Daily { country } => {
            let country = Country::from_code(&country).into_diagnostic()?;
            let days = service
                .daily_summary_by_country(country.code())
                .await
                .into_diagnostic()?;
            writer.write_daily_summary(&days, &country).into_diagnostic()?;
        }
        Commands::Balance { country } => {
            let country = Country::from_code(&country).into_diagnostic()?;
            let balance = service.country_balance(country.code()).await.into_diagnostic()?;
            writer
                .write_country_balance(balance.as_ref(), &country)
                .into_diagnostic()?;
        }
        Commands::Stats { country } => {
            let display_country = match &country {
                Some(code) => Country::from_code(code).into_diagnostic()?,
                None => Country::from_code("BR").into_diagnostic()?,
            };
            let stats = service
                .statistics(country.as_deref())
                .await
                .into_diagnostic()?;
            writer
                .write_statistics(&stats, &display_country)
                .into_diagnostic()?;
        }
    }

    Ok(())
}
