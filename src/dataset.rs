use crate::key::{make_key, AmountKey};
use crate::utils::YearMonth;
use std::collections::BTreeMap;

/// Sparse `(month, account) -> amount` accumulator.
///
/// Every contribution routed to a key is summed into it. A key that was never
/// written reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyAmounts {
    cells: BTreeMap<AmountKey, i64>,
}

impl MonthlyAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, month: YearMonth, account_id: i64, amount: i64) {
        *self.cells.entry(make_key(month, account_id)).or_insert(0) += amount;
    }

    /// Value of a cell, `None` when nothing was ever posted to it.
    pub fn get(&self, month: YearMonth, account_id: i64) -> Option<i64> {
        self.cells.get(&make_key(month, account_id)).copied()
    }

    pub fn value_or_zero(&self, month: YearMonth, account_id: i64) -> i64 {
        self.get(month, account_id).unwrap_or(0)
    }

    pub fn contains(&self, month: YearMonth, account_id: i64) -> bool {
        self.cells.contains_key(&make_key(month, account_id))
    }

    /// Earliest month present across all accounts.
    pub fn earliest_month(&self) -> Option<YearMonth> {
        self.cells.keys().next().map(AmountKey::month)
    }

    /// Folds `other` into `self`, summing cells that exist in both.
    pub fn merge(&mut self, other: MonthlyAmounts) {
        for (key, amount) in other.cells {
            *self.cells.entry(key).or_insert(0) += amount;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AmountKey, &i64)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(YearMonth, i64, i64)> for MonthlyAmounts {
    fn from_iter<I: IntoIterator<Item = (YearMonth, i64, i64)>>(iter: I) -> Self {
        let mut amounts = Self::new();
        for (month, account_id, amount) in iter {
            amounts.add(month, account_id, amount);
        }
        amounts
    }
}
