mod breakdown;
mod query;
mod totals;

pub(crate) use breakdown::{expense_breakdown, ExpenseBreakdown};
pub(crate) use query::{SortKey, SortOrder, TransactionQuery, TypeFilter};
pub(crate) use totals::{totals, Totals};

use chrono::NaiveDate;

use crate::models::{NewTransaction, Transaction};

/// In-memory transaction collection, newest first by insertion.
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Ledger {
    /// Ids continue from the largest existing one. Seed loading rejects
    /// `u64::MAX`, so the counter never wraps onto an existing id.
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            transactions,
            next_id,
        }
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Record a new transaction dated `date`, prepending it to the collection.
    pub(crate) fn add(&mut self, new: NewTransaction, date: NaiveDate) -> &Transaction {
        let txn = Transaction {
            id: self.next_id,
            amount: new.kind.signed(new.amount),
            category: new.category,
            kind: new.kind,
            date,
            description: new.description.trim().to_string(),
        };
        self.next_id = self.next_id.saturating_add(1);
        tracing::info!(
            id = txn.id,
            category = %txn.category,
            amount = %txn.amount,
            "transaction added"
        );
        self.transactions.insert(0, txn);
        &self.transactions[0]
    }

    pub(crate) fn totals(&self) -> Totals {
        totals(&self.transactions)
    }

    pub(crate) fn expense_breakdown(&self) -> ExpenseBreakdown {
        expense_breakdown(&self.transactions)
    }
}
