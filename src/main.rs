mod config;
mod form;
mod ledger;
mod logging;
mod models;
mod run;
mod seed;
mod ui;

use anyhow::Result;
use clap::Parser;

use config::{Cli, Config};
use models::Transaction;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    logging::setup_logging(&config.log_file)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        user = %config.user,
        "starting expensetui"
    );

    let transactions = load_transactions(&config)?;

    match &cli.command {
        None => run::as_tui(&config, transactions),
        Some(command) => run::as_cli(command, transactions),
    }
}

fn load_transactions(config: &Config) -> Result<Vec<Transaction>> {
    match &config.data {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading transactions from CSV");
            seed::load_csv(path)
        }
        None => {
            tracing::info!("using built-in sample transactions");
            Ok(seed::mock_transactions())
        }
    }
}
