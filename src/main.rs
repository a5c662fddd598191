use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use csv::{ReaderBuilder, Trim};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod bank;

/// The size of the channel for processing transactions.
const CHANNEL_SIZE: usize = 100;

/// Applies customer operations from a CSV file to the bank's accounts and
/// prints the resulting balances.
#[derive(Parser, Debug)]
#[command(name = "bank", version)]
struct Cli {
    /// CSV with the columns type, cpf, password, amount, destination, movement
    input: PathBuf,

    /// Capacity of the ledger request queue
    #[arg(long, default_value_t = CHANNEL_SIZE)]
    channel_size: usize,

    /// Also write every account's movement history to this CSV file
    #[arg(long)]
    history: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = bank::bootstrap().context("Failed to build the bootstrap data")?;
    anyhow::ensure!(!seed.directory.is_empty(), "Bootstrap produced no customers");
    info!(
        bank = seed.bank.name(),
        code = seed.bank.code(),
        number = seed.bank.number(),
        customers = seed.directory.len(),
        "ledger bootstrapped"
    );
    for branch in &seed.branches {
        info!(bank = branch.bank().code(), branch = branch.number(), "branch open");
    }

    let (mut state, handle) = bank::State::channel(seed.directory, cli.channel_size.max(1));
    let ledger = tokio::spawn(async move {
        state.run().await;
        state
    });

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(&cli.input)
        .with_context(|| format!("Failed to read CSV file {}", cli.input.display()))?;

    let mut failed = 0usize;
    for (line, row) in reader.deserialize::<bank::Transaction>().enumerate() {
        let transaction = match row {
            Ok(transaction) => transaction,
            Err(err) => {
                warn!(line = line + 1, "Skipping malformed row: {err}");
                failed += 1;
                continue;
            }
        };
        if handle.submit(transaction).await.is_err() {
            failed += 1;
        }
    }

    drop(handle); // Close the channel to signal no more transactions will be sent
    let state = ledger
        .await
        .context("Failed to join the state handling task")?;
    info!(failed, "all transactions processed");

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for customer in state.directory().customers() {
        let Some(account) = customer.account() else {
            continue;
        };
        let holder = customer.name().unwrap_or_default();
        if let Err(err) = writer.serialize(account.summary(holder)) {
            warn!("Error writing account: {err}");
        }
    }
    writer.flush()?;

    if let Some(path) = &cli.history {
        write_history(state.directory(), path)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
    }
    Ok(())
}

/// Writes one row per movement, grouped by account number.
fn write_history(directory: &bank::Directory, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for customer in directory.customers() {
        let Some(account) = customer.account() else {
            continue;
        };
        let number = account.number().unwrap_or_default();
        for (index, movement) in account.movements().iter().enumerate() {
            writer.serialize(movement.record(number, index))?;
        }
    }
    writer.flush()?;
    Ok(())
}
