use rust_decimal::Decimal;

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
}

impl Totals {
    /// Share of total flow (income + expenses) that is income, in `[0, 1]`.
    pub(crate) fn income_share(&self) -> f64 {
        ratio(self.income, self.income + self.expenses)
    }

    pub(crate) fn expense_share(&self) -> f64 {
        ratio(self.expenses, self.income + self.expenses)
    }

    /// Balance as a fraction of income, clamped to `[0, 1]`.
    pub(crate) fn savings_rate(&self) -> f64 {
        ratio(self.balance, self.income)
    }
}

fn ratio(part: Decimal, whole: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;

    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (part / whole).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
}

/// Income is summed as stored; expenses contribute their magnitude.
pub(crate) fn totals(transactions: &[Transaction]) -> Totals {
    let income: Decimal = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expenses: Decimal = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.abs_amount())
        .sum();

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}
