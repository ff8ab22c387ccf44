use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use ioi_core::{
    IoiContract, Order, Party, TimeWindow, TransactionBuilder, TransactionSnapshot,
    VerificationReport,
};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ioi")]
#[command(about = "Indication-of-interest transaction verifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a transaction snapshot (.yaml, .yml or .json). Exits 1 on rejection.
    Verify {
        /// Snapshot file
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Build a Place proposal, check it locally, and print it for counterparties
    Propose {
        #[arg(long)]
        buyer: String,

        #[arg(long)]
        seller: String,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,

        #[arg(long)]
        ticker: String,

        /// Price per unit, e.g. 10.25
        #[arg(long)]
        price: Decimal,

        /// Half-width of the time window around now
        #[arg(long, default_value_t = 30)]
        tolerance_secs: i64,

        #[arg(long, value_enum, default_value_t = SnapshotFormat::Yaml)]
        format: SnapshotFormat,
    },

    /// Print the hash of the legal prose this contract implements
    ContractRef,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum SnapshotFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Verify { file, format } => {
            let accepted = verify(&file, format)?;
            if !accepted {
                std::process::exit(1);
            }
        }
        Commands::Propose {
            buyer,
            seller,
            quantity,
            ticker,
            price,
            tolerance_secs,
            format,
        } => {
            let order = Order::new(quantity, ticker, price);
            let tolerance = Duration::try_seconds(tolerance_secs)
                .with_context(|| format!("tolerance of {}s is out of range", tolerance_secs))?;
            let window = TimeWindow::with_tolerance(Utc::now(), tolerance)
                .context("building the proposal time window")?;
            propose(Party::new(buyer), Party::new(seller), order, window, format)?;
        }
        Commands::ContractRef => {
            println!("{}", IoiContract::legal_contract_reference());
        }
    }

    Ok(())
}

fn verify(file: &Path, format: ReportFormat) -> Result<bool> {
    let tx = TransactionSnapshot::from_file(file)
        .with_context(|| format!("loading snapshot {}", file.display()))?;
    info!(
        file = %file.display(),
        inputs = tx.inputs.len(),
        outputs = tx.outputs.len(),
        "loaded snapshot"
    );

    let report = VerificationReport::from_result(&IoiContract::new().verify(&tx));
    match format {
        ReportFormat::Text => println!("{}", report.summary()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(report.accepted)
}

fn propose(
    buyer: Party,
    seller: Party,
    order: Order,
    window: TimeWindow,
    format: SnapshotFormat,
) -> Result<()> {
    let tx = TransactionBuilder::place(buyer, seller, order, window).build();

    // Never hand counterparties a proposal the contract rejects.
    if let Err(err) = IoiContract::new().verify(&tx) {
        bail!("proposal rejected locally: {}", err);
    }
    info!(midpoint = %window.midpoint(), "proposal verified locally");

    let rendered = match format {
        SnapshotFormat::Yaml => tx.to_yaml().context("rendering proposal as YAML")?,
        SnapshotFormat::Json => serde_json::to_string_pretty(&tx)?,
    };
    println!("{}", rendered);

    Ok(())
}
