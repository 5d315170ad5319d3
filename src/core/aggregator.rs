//! Category aggregation and balance summarization
//!
//! A single pass over the parsed transactions accumulates `amount` per
//! `category`, then the category totals are partitioned into income and
//! expense by a classification predicate. All accumulation happens in
//! exact decimal arithmetic, so the totals do not depend on transaction
//! order and reconcile to the cent.
//!
//! # Classification policy
//!
//! One policy only: a category is income-bearing when its name is in the
//! fixed short-list (salary, savings, deposits), everything else counts as
//! expense. Expenses are stored as negative amounts, so
//! `balance = income + expense`. Callers with different bookkeeping can
//! supply their own predicate via [`summarize_with`].

use crate::types::{BalanceSummary, CategorySummary, Transaction};
use rust_decimal::Decimal;
use tracing::debug;

/// Categories whose accumulated totals count as income
pub const INCOME_CATEGORIES: [&str; 3] = ["salary", "savings", "deposits"];

/// Default classification predicate
///
/// Case-insensitive membership in [`INCOME_CATEGORIES`]. The empty
/// category (uncategorized transfers) is never income-bearing.
pub fn is_income_category(category: &str) -> bool {
    INCOME_CATEGORIES
        .iter()
        .any(|income| category.eq_ignore_ascii_case(income))
}

/// Accumulate signed amounts per category in one pass
///
/// The empty category is a real key: transfers without a category must
/// still be aggregated, not dropped.
pub fn accumulate(transactions: &[Transaction]) -> CategorySummary {
    let mut categories = CategorySummary::new();
    for transaction in transactions {
        categories.add(&transaction.category, transaction.amount);
    }
    categories
}

/// Summarize transactions with a caller-supplied income classifier
///
/// An empty transaction sequence yields an empty category map and an
/// all-zero summary; it is not an error.
pub fn summarize_with<F>(transactions: &[Transaction], is_income: F) -> BalanceSummary
where
    F: Fn(&str) -> bool,
{
    let categories = accumulate(transactions);

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for (category, total) in categories.iter() {
        if is_income(category) {
            income += total;
        } else {
            expense += total;
        }
    }
    debug!(%income, %expense, "partitioned category totals");

    BalanceSummary {
        income,
        expense,
        balance: income + expense,
        categories,
    }
}

/// Summarize transactions with the default classification policy
pub fn summarize(transactions: &[Transaction]) -> BalanceSummary {
    summarize_with(transactions, is_income_category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn transaction(category: &str, amount: i64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            account: "Cash".to_string(),
            category: category.to_string(),
            amount: Decimal::new(amount, 0),
            currency: "USD".to_string(),
            converted_amount: Decimal::new(amount, 0),
            converted_currency: "USD".to_string(),
            description: None,
        }
    }

    #[rstest]
    #[case::salary("Salary", true)]
    #[case::savings("savings", true)]
    #[case::deposits("DEPOSITS", true)]
    #[case::food("Food", false)]
    #[case::uncategorized("", false)]
    #[case::unseen_label("Dog grooming", false)]
    fn test_is_income_category(#[case] category: &str, #[case] expected: bool) {
        assert_eq!(is_income_category(category), expected);
    }

    #[test]
    fn test_summarize_worked_example() {
        let transactions = vec![
            transaction("Salary", 1111),
            transaction("Food", -200),
            transaction("Food", -50),
        ];

        let summary = summarize(&transactions);
        assert_eq!(summary.categories.get("Salary"), Some(Decimal::new(1111, 0)));
        assert_eq!(summary.categories.get("Food"), Some(Decimal::new(-250, 0)));
        assert_eq!(summary.income, Decimal::new(1111, 0));
        assert_eq!(summary.expense, Decimal::new(-250, 0));
        assert_eq!(summary.balance, Decimal::new(861, 0));
    }

    #[test]
    fn test_summarize_empty_sequence() {
        let summary = summarize(&[]);
        assert!(summary.categories.is_empty());
        assert_eq!(summary.income, Decimal::ZERO);
        assert_eq!(summary.expense, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let mut transactions = vec![
            transaction("Salary", 1111),
            transaction("Food", -200),
            transaction("Savings", 500),
            transaction("Food", -50),
            transaction("", -30),
        ];
        let forward = summarize(&transactions);
        transactions.reverse();
        let backward = summarize(&transactions);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_category_totals_reconcile_with_partition() {
        let transactions = vec![
            transaction("Salary", 2500),
            transaction("Deposits", 120),
            transaction("Bills", -900),
            transaction("Food", -320),
            transaction("", -55),
        ];

        let summary = summarize(&transactions);
        assert_eq!(summary.categories.total(), summary.income + summary.expense);
        assert_eq!(summary.balance, summary.income + summary.expense);
    }

    #[test]
    fn test_uncategorized_transfers_are_kept() {
        let summary = summarize(&[transaction("", -42)]);
        assert_eq!(summary.categories.get(""), Some(Decimal::new(-42, 0)));
        assert_eq!(summary.expense, Decimal::new(-42, 0));
    }

    #[test]
    fn test_caller_supplied_classifier() {
        let transactions = vec![transaction("Allowance", 100), transaction("Food", -60)];
        let summary = summarize_with(&transactions, |category| category == "Allowance");

        assert_eq!(summary.income, Decimal::new(100, 0));
        assert_eq!(summary.expense, Decimal::new(-60, 0));
        assert_eq!(summary.balance, Decimal::new(40, 0));
    }

    #[test]
    fn test_fractional_amounts_accumulate_exactly() {
        // 0.1 + 0.2 must be exactly 0.3, not a binary-float neighborhood.
        let mut first = transaction("Food", 0);
        first.amount = Decimal::new(-1, 1);
        let mut second = transaction("Food", 0);
        second.amount = Decimal::new(-2, 1);

        let summary = summarize(&[first, second]);
        assert_eq!(summary.categories.get("Food"), Some(Decimal::new(-3, 1)));
    }
}
