mod csv_io;

pub(crate) use csv_io::{export_csv, load_csv};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};

/// The built-in sample ledger shown when no `--data` file is given.
pub(crate) fn mock_transactions() -> Vec<Transaction> {
    vec![
        mock(1, -4550, "Food", TransactionType::Expense, (2025, 1, 20), "Lunch at restaurant"),
        mock(2, 250000, "Salary", TransactionType::Income, (2025, 1, 15), "Monthly salary"),
        mock(3, -12000, "Shopping", TransactionType::Expense, (2025, 1, 18), "Clothing purchase"),
        mock(4, -8530, "Travel", TransactionType::Expense, (2025, 1, 19), "Gas station"),
    ]
}

fn mock(
    id: u64,
    cents: i64,
    category: &str,
    kind: TransactionType,
    (y, m, d): (i32, u32, u32),
    description: &str,
) -> Transaction {
    Transaction {
        id,
        amount: Decimal::new(cents, 2),
        category: category.into(),
        kind,
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        description: description.into(),
    }
}
