use crate::error::{MonthlyAmountError, Result};
use crate::utils::YearMonth;
use std::fmt;
use std::str::FromStr;

/// Composite key of the sparse dataset: one cell per (month, account).
///
/// Keys order by month first, so the first key of an ordered map carries the
/// earliest populated month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountKey {
    month: YearMonth,
    account_id: i64,
}

impl AmountKey {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn account_id(&self) -> i64 {
        self.account_id
    }
}

pub fn make_key(month: YearMonth, account_id: i64) -> AmountKey {
    AmountKey { month, account_id }
}

impl fmt::Display for AmountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.month, self.account_id)
    }
}

impl FromStr for AmountKey {
    type Err = MonthlyAmountError;

    fn from_str(s: &str) -> Result<Self> {
        let (month, account_id) = s
            .split_once(':')
            .ok_or_else(|| MonthlyAmountError::InvalidKey(s.to_string()))?;
        let month = month
            .parse::<YearMonth>()
            .map_err(|_| MonthlyAmountError::InvalidKey(s.to_string()))?;
        let account_id = account_id
            .trim()
            .parse::<i64>()
            .map_err(|_| MonthlyAmountError::InvalidKey(s.to_string()))?;
        Ok(make_key(month, account_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_keys_equal_iff_both_components_equal() {
        assert_eq!(make_key(ym("2024-01"), 10), make_key(ym("2024-01"), 10));
        assert_ne!(make_key(ym("2024-01"), 10), make_key(ym("2024-01"), 11));
        assert_ne!(make_key(ym("2024-01"), 10), make_key(ym("2024-02"), 10));
    }

    #[test]
    fn test_key_orders_by_month_first() {
        let early = make_key(ym("2023-12"), 99);
        let late = make_key(ym("2024-01"), 1);
        assert!(early < late);
    }

    #[test]
    fn test_key_text_form() {
        let key = make_key(ym("2024-03"), 42);
        assert_eq!(key.to_string(), "2024-03:42");
        assert_eq!("2024-03:42".parse::<AmountKey>().unwrap(), key);
        assert_eq!(key.month().to_string(), "2024-03");
    }

    #[test]
    fn test_key_parse_rejects_malformed_input() {
        assert!("2024-03".parse::<AmountKey>().is_err());
        assert!("2024-03:abc".parse::<AmountKey>().is_err());
        assert!("24:1".parse::<AmountKey>().is_err());
    }
}
