use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::models::BudgetEntry;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
}

/// Adds amounts, clamping at `Decimal::MAX`/`Decimal::MIN` instead of
/// panicking on overflow.
pub fn saturating_total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Every entry lands in exactly one bucket; entries whose category is not in
/// the catalog are counted as expenses.
pub fn compute_summary(entries: &[BudgetEntry], catalog: &Catalog) -> Summary {
    let (total_income, total_expenses) =
        entries
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(income, expenses), entry| {
                if catalog.is_income(&entry.category) {
                    (income.saturating_add(entry.amount), expenses)
                } else {
                    (income, expenses.saturating_add(entry.amount))
                }
            });

    Summary {
        total_income,
        total_expenses,
        net: total_income.saturating_sub(total_expenses),
    }
}
