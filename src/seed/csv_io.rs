use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Transaction, TransactionType};

const HEADER: [&str; 6] = ["id", "date", "type", "category", "description", "amount"];

/// Load transactions from a CSV with header `id,date,type,category,description,amount`.
/// Row order is kept, so the file should list the newest transaction first.
pub(crate) fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .with_context(|| format!("Missing column '{name}'"))
    };
    let id_col = column("id")?;
    let date_col = column("date")?;
    let type_col = column("type")?;
    let category_col = column("category")?;
    let description_col = column("description")?;
    let amount_col = column("amount")?;

    let mut seen = HashSet::new();
    let mut transactions = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = result.with_context(|| format!("Line {line}: failed to read CSV record"))?;
        let field = |col: usize| record.get(col).unwrap_or("");

        let id: u64 = field(id_col)
            .parse()
            .with_context(|| format!("Line {line}: invalid id '{}'", field(id_col)))?;
        if id == u64::MAX {
            anyhow::bail!("Line {line}: id {id} is out of range");
        }
        if !seen.insert(id) {
            anyhow::bail!("Line {line}: duplicate id {id}");
        }

        let date = NaiveDate::parse_from_str(field(date_col), "%Y-%m-%d")
            .with_context(|| format!("Line {line}: invalid date '{}'", field(date_col)))?;

        let kind = TransactionType::parse(field(type_col)).with_context(|| {
            format!("Line {line}: unknown type '{}' (expected income or expense)", field(type_col))
        })?;

        let amount = Decimal::from_str(field(amount_col))
            .with_context(|| format!("Line {line}: invalid amount '{}'", field(amount_col)))?;

        transactions.push(Transaction {
            id,
            amount: kind.signed(amount),
            category: field(category_col).to_string(),
            kind,
            date,
            description: field(description_col).to_string(),
        });
    }

    tracing::info!(path = %path.display(), count = transactions.len(), "loaded seed data");
    Ok(transactions)
}

/// Write transactions in the same format `load_csv` reads. Returns the row count.
pub(crate) fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    wtr.write_record(HEADER)?;
    for txn in transactions {
        wtr.write_record([
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            txn.description.clone(),
            txn.amount.to_string(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV file")?;

    tracing::info!(path = %path.display(), count = transactions.len(), "exported transactions");
    Ok(transactions.len())
}

#[cfg(test)]
#[path = "csv_io_tests.rs"]
mod tests;
