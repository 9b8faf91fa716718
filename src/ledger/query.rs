use std::cmp::Ordering;

use crate::models::{Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            other => TransactionType::parse(other).map(|t| match t {
                TransactionType::Income => Self::Income,
                TransactionType::Expense => Self::Expense,
            }),
        }
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.is_income(),
            Self::Expense => txn.is_expense(),
        }
    }

    pub(crate) fn next(&self) -> Self {
        match self {
            Self::All => Self::Income,
            Self::Income => Self::Expense,
            Self::Expense => Self::All,
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All Types"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortKey {
    #[default]
    Date,
    Amount,
    Category,
}

impl SortKey {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [SortKey] {
        &[Self::Date, Self::Amount, Self::Category]
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::Amount => a.abs_amount().cmp(&b.abs_amount()),
            Self::Category => a.category.cmp(&b.category),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "Date"),
            Self::Amount => write!(f, "Amount"),
            Self::Category => write!(f, "Category"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub(crate) fn flipped(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub(crate) fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Search text, type filter and sort settings for the transaction list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TransactionQuery {
    pub(crate) search: String,
    pub(crate) type_filter: TypeFilter,
    pub(crate) sort_key: SortKey,
    pub(crate) order: SortOrder,
}

impl TransactionQuery {
    /// Selecting the active key flips direction; a new key starts descending.
    pub(crate) fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.order = self.order.flipped();
        } else {
            self.sort_key = key;
            self.order = SortOrder::Desc;
        }
    }

    fn matches_search(&self, txn: &Transaction) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        txn.description.to_lowercase().contains(&needle)
            || txn.category.to_lowercase().contains(&needle)
    }

    /// Filter then sort. The sort is stable, so equal keys keep collection order.
    pub(crate) fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut matched: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| self.matches_search(t) && self.type_filter.matches(t))
            .collect();

        matched.sort_by(|a, b| {
            let ord = self.sort_key.compare(a, b);
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        matched
    }
}
