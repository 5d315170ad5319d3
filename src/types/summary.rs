//! Category and balance summary types
//!
//! A `CategorySummary` accumulates signed totals per category name; a
//! `BalanceSummary` partitions those totals into income and expense and
//! carries the resulting balance. Both are produced by the aggregator and
//! immutable afterwards.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated signed amount per category name
///
/// Backed by an ordered map so serialization order is deterministic. Keys
/// are unique and the empty string is a valid key: Monefy transfers carry
/// no category, and their totals must not be dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategorySummary {
    totals: BTreeMap<String, Decimal>,
}

impl CategorySummary {
    /// Create an empty summary
    pub fn new() -> Self {
        CategorySummary::default()
    }

    /// Add a signed amount to a category's running total
    ///
    /// Unseen categories are inserted with the amount as their first total.
    pub fn add(&mut self, category: &str, amount: Decimal) {
        let total = self
            .totals
            .entry(category.to_string())
            .or_insert(Decimal::ZERO);
        *total += amount;
    }

    /// Accumulated total for a category, if the category was seen
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.totals.get(category).copied()
    }

    /// Number of distinct categories seen
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether no category has been seen
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Iterate over `(category, total)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }

    /// Sum of every category total
    pub fn total(&self) -> Decimal {
        self.totals.values().copied().sum()
    }
}

/// Income/expense/balance view over a category summary
///
/// Sign convention: expenses are stored as negative amounts, so
/// `balance = income + expense` and the category totals reconcile exactly
/// with `income + expense`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceSummary {
    /// Sum of totals for income-classified categories
    pub income: Decimal,

    /// Sum of totals for every other category (negative by convention)
    pub expense: Decimal,

    /// `income + expense`
    pub balance: Decimal,

    /// The per-category totals the partition was derived from
    #[serde(flatten)]
    pub categories: CategorySummary,
}
