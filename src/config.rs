use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::ledger::{SortKey, SortOrder, TypeFilter};

/// ExpenseTUI - a personal finance dashboard for the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// CSV file to load transactions from instead of the built-in sample data.
    #[arg(long, global = true)]
    pub(crate) data: Option<PathBuf>,

    /// Name shown in the greeting and on the card.
    #[arg(long, global = true, default_value = "Santhosh")]
    pub(crate) user: String,

    /// Log file path. Defaults to `expensetui.log` in the user data directory.
    #[arg(long, global = true)]
    pub(crate) log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print totals and the expense breakdown
    Summary,
    /// Print the filtered, sorted transaction list
    List {
        /// Case-insensitive text matched against description or category
        #[arg(long, default_value = "")]
        search: String,
        /// all, income or expense
        #[arg(long = "type", default_value = "all", value_parser = parse_type_filter)]
        type_filter: TypeFilter,
        /// date, amount or category
        #[arg(long, default_value = "date", value_parser = parse_sort_key)]
        sort: SortKey,
        /// asc or desc
        #[arg(long, default_value = "desc", value_parser = parse_sort_order)]
        order: SortOrder,
    },
    /// Write all transactions to a CSV file
    Export {
        path: PathBuf,
    },
}

fn parse_type_filter(s: &str) -> Result<TypeFilter, String> {
    TypeFilter::parse(s).ok_or_else(|| format!("expected all, income or expense, got '{s}'"))
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| format!("expected date, amount or category, got '{s}'"))
}

fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    SortOrder::parse(s).ok_or_else(|| format!("expected asc or desc, got '{s}'"))
}

/// Static details shown on the credit card panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CardProfile {
    pub(crate) holder: String,
    pub(crate) last_four: String,
    pub(crate) expires: String,
    pub(crate) issuer: String,
    pub(crate) service_line: String,
    pub(crate) available_credit: Decimal,
    pub(crate) cashback: Decimal,
}

impl CardProfile {
    pub(crate) fn for_holder(holder: &str) -> Self {
        Self {
            holder: holder.to_string(),
            last_four: "1234".into(),
            expires: "12/27".into(),
            issuer: "ExpenseTracker Bank".into(),
            service_line: "1-800-EXPENSE".into(),
            available_credit: Decimal::new(8750, 0),
            cashback: Decimal::new(12750, 2),
        }
    }
}

/// Settings resolved from the command line.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) user: String,
    pub(crate) card: CardProfile,
    pub(crate) data: Option<PathBuf>,
    pub(crate) log_file: PathBuf,
}

impl Config {
    pub(crate) fn from_cli(cli: &Cli) -> Result<Self> {
        let log_file = match &cli.log_file {
            Some(path) => path.clone(),
            None => default_log_path()?,
        };
        Ok(Self {
            user: cli.user.clone(),
            card: CardProfile::for_holder(&cli.user),
            data: cli.data.clone(),
            log_file,
        })
    }
}

fn default_log_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("expensetui.log"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
