use rust_decimal::Decimal;

use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) name: String,
    pub(crate) value: Decimal,
}

/// Expense totals per category, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExpenseBreakdown {
    pub(crate) categories: Vec<CategoryTotal>,
    pub(crate) total: Decimal,
}

impl ExpenseBreakdown {
    pub(crate) fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Percentage of the total for `value`; zero when there are no expenses.
    pub(crate) fn percent_of(&self, value: Decimal) -> Decimal {
        if self.total.is_zero() {
            return Decimal::ZERO;
        }
        value / self.total * Decimal::ONE_HUNDRED
    }

    /// Fraction of the total in `[0, 1]`, for drawing.
    pub(crate) fn fraction_of(&self, value: Decimal) -> f64 {
        use rust_decimal::prelude::ToPrimitive;

        (self.percent_of(value) / Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Largest category; the earliest seen wins a tie.
    pub(crate) fn top(&self) -> Option<&CategoryTotal> {
        self.categories
            .iter()
            .fold(None, |best: Option<&CategoryTotal>, c| match best {
                Some(b) if b.value >= c.value => Some(b),
                _ => Some(c),
            })
    }

    /// One-line note about the largest category, when there are expenses.
    pub(crate) fn insight(&self) -> Option<String> {
        let top = self.top()?;
        Some(format!(
            "Your highest expense category is {} at ${:.2} ({:.1}% of total expenses)",
            top.name,
            top.value,
            self.percent_of(top.value)
        ))
    }
}

pub(crate) fn expense_breakdown(transactions: &[Transaction]) -> ExpenseBreakdown {
    let mut categories: Vec<CategoryTotal> = Vec::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match categories.iter_mut().find(|c| c.name == txn.category) {
            Some(existing) => existing.value += txn.abs_amount(),
            None => categories.push(CategoryTotal {
                name: txn.category.clone(),
                value: txn.abs_amount(),
            }),
        }
    }

    let total = categories.iter().map(|c| c.value).sum();
    ExpenseBreakdown { categories, total }
}
