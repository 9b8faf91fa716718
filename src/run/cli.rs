use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Command;
use crate::ledger::{Ledger, TransactionQuery};
use crate::models::Transaction;
use crate::ui::util::{format_amount, format_date, format_signed, truncate};

pub(crate) fn as_cli(command: &Command, transactions: Vec<Transaction>) -> Result<()> {
    let ledger = Ledger::new(transactions);
    let mut out = std::io::stdout().lock();
    match command {
        Command::Summary => cli_summary(&mut out, &ledger),
        Command::List {
            search,
            type_filter,
            sort,
            order,
        } => {
            let query = TransactionQuery {
                search: search.clone(),
                type_filter: *type_filter,
                sort_key: *sort,
                order: *order,
            };
            cli_list(&mut out, &ledger, &query)
        }
        Command::Export { path } => cli_export(&mut out, &ledger, path),
    }
}

fn cli_summary(out: &mut impl Write, ledger: &Ledger) -> Result<()> {
    let totals = ledger.totals();
    let breakdown = ledger.expense_breakdown();

    writeln!(out, "ExpenseTUI Summary")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Income:     {}", format_signed(totals.income, true))?;
    writeln!(out, "  Expenses:   {}", format_amount(totals.expenses))?;
    writeln!(
        out,
        "  Balance:    {}",
        format_signed(totals.balance, totals.balance >= rust_decimal::Decimal::ZERO)
    )?;
    writeln!(out, "  Total Txns: {}", ledger.len())?;

    if !breakdown.is_empty() {
        writeln!(out)?;
        writeln!(out, "Expenses by Category:")?;
        for cat in &breakdown.categories {
            writeln!(
                out,
                "  {:<16} {:>12} {:>6.1}%",
                cat.name,
                format_amount(cat.value),
                breakdown.percent_of(cat.value)
            )?;
        }
    }

    if let Some(insight) = breakdown.insight() {
        writeln!(out)?;
        writeln!(out, "{insight}")?;
    }

    Ok(())
}

fn cli_list(out: &mut impl Write, ledger: &Ledger, query: &TransactionQuery) -> Result<()> {
    let rows = query.apply(ledger.transactions());
    if rows.is_empty() {
        writeln!(out, "No transactions found")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<4} {:<13} {:<30} {:<14} {:>14}",
        "ID", "Date", "Description", "Category", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(79))?;
    for txn in &rows {
        writeln!(
            out,
            "{:<4} {:<13} {:<30} {:<14} {:>14}",
            txn.id,
            format_date(txn.date),
            truncate(&txn.description, 30),
            truncate(&txn.category, 14),
            format_signed(txn.amount, txn.is_income()),
        )?;
    }
    writeln!(
        out,
        "\n{} transactions ({}, sorted by {} {})",
        rows.len(),
        query.type_filter,
        query.sort_key,
        query.order.arrow()
    )?;
    Ok(())
}

fn cli_export(out: &mut impl Write, ledger: &Ledger, path: &Path) -> Result<()> {
    let path = shellexpand(&path.to_string_lossy());
    let count = crate::seed::export_csv(&path, ledger.transactions())?;
    if count == 0 {
        writeln!(out, "No transactions to export")?;
    } else {
        writeln!(out, "Exported {count} transactions to {}", path.display())?;
    }
    Ok(())
}

/// Expand a leading `~/` to `$HOME`.
pub(crate) fn shellexpand(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
