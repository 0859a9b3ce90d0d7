use crate::dataset::MonthlyAmounts;
use crate::schema::Account;
use crate::utils::{iter_between, today_plus_one, YearMonth};
use chrono::NaiveDate;
use log::debug;

/// Turns monthly deltas of asset and liability accounts into running balances.
pub struct BalanceAccumulator<'a> {
    accounts: &'a [Account],
    as_of: NaiveDate,
}

impl<'a> BalanceAccumulator<'a> {
    pub fn new(accounts: &'a [Account], as_of: NaiveDate) -> Self {
        Self { accounts, as_of }
    }

    /// Rewrites every balance-sheet cell from the globally earliest month
    /// through the month of `as_of` as the cumulative balance of that month.
    ///
    /// Must run after all aggregation: the cells are read as deltas and
    /// overwritten in place.
    pub fn accumulate(&self, amounts: &mut MonthlyAmounts) {
        let Some(start) = amounts.earliest_month().and_then(|m| m.first_day()) else {
            return;
        };
        let end = today_plus_one(self.as_of);

        for account in self
            .accounts
            .iter()
            .filter(|a| a.account_type.is_balance_sheet())
        {
            let carried = Self::carry_forward(amounts, account.id, iter_between(start, end));
            debug!(
                "Carried balance of account {} ({}) through {} months",
                account.id, account.name, carried
            );
        }
    }

    fn carry_forward(
        amounts: &mut MonthlyAmounts,
        account_id: i64,
        months: impl Iterator<Item = YearMonth>,
    ) -> usize {
        let mut previous: Option<YearMonth> = None;
        let mut carried = 0;

        for month in months {
            // The first month has no predecessor and starts from zero.
            if let Some(balance) = previous.and_then(|p| amounts.get(p, account_id)) {
                amounts.add(month, account_id, balance);
                carried += 1;
            }
            previous = Some(month);
        }

        carried
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AccountType;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn account(id: i64, account_type: AccountType) -> Account {
        Account {
            id,
            account_type,
            name: format!("account-{}", id),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_asset_deltas_become_running_balance() {
        let accounts = vec![account(5, AccountType::Asset)];
        let mut amounts: MonthlyAmounts = vec![(ym("2024-01"), 5, 1000), (ym("2024-02"), 5, -200)]
            .into_iter()
            .collect();

        BalanceAccumulator::new(&accounts, as_of()).accumulate(&mut amounts);

        assert_eq!(amounts.get(ym("2024-01"), 5), Some(1000));
        assert_eq!(amounts.get(ym("2024-02"), 5), Some(800));
        assert_eq!(amounts.get(ym("2024-03"), 5), Some(800));
        assert_eq!(amounts.get(ym("2024-04"), 5), Some(800));
        assert_eq!(amounts.get(ym("2024-05"), 5), Some(800));
        assert_eq!(amounts.get(ym("2024-06"), 5), None);
    }

    #[test]
    fn test_balance_is_prefix_sum_of_deltas() {
        let deltas = [300, -50, 0, 125, -400];
        let months = ["2024-01", "2024-02", "2024-03", "2024-04", "2024-05"];
        let accounts = vec![account(2, AccountType::Liability)];
        let mut amounts: MonthlyAmounts = months
            .iter()
            .zip(deltas)
            .map(|(m, d)| (ym(m), 2, d))
            .collect();

        BalanceAccumulator::new(&accounts, as_of()).accumulate(&mut amounts);

        let mut running = 0;
        for (month, delta) in months.iter().zip(deltas) {
            running += delta;
            assert_eq!(amounts.get(ym(month), 2), Some(running), "month {}", month);
        }
    }

    #[test]
    fn test_late_account_has_no_entries_before_first_delta() {
        let accounts = vec![account(1, AccountType::Asset), account(2, AccountType::Asset)];
        let mut amounts: MonthlyAmounts = vec![(ym("2024-01"), 1, 10), (ym("2024-03"), 2, 70)]
            .into_iter()
            .collect();

        BalanceAccumulator::new(&accounts, as_of()).accumulate(&mut amounts);

        assert_eq!(amounts.get(ym("2024-01"), 2), None);
        assert_eq!(amounts.get(ym("2024-02"), 2), None);
        assert_eq!(amounts.get(ym("2024-03"), 2), Some(70));
        assert_eq!(amounts.get(ym("2024-05"), 2), Some(70));
        assert_eq!(amounts.get(ym("2024-05"), 1), Some(10));
    }

    #[test]
    fn test_flow_accounts_are_left_untouched() {
        let accounts = vec![account(8, AccountType::Expense), account(9, AccountType::Income)];
        let mut amounts: MonthlyAmounts = vec![(ym("2024-01"), 8, 400), (ym("2024-01"), 9, -900)]
            .into_iter()
            .collect();
        let before = amounts.clone();

        BalanceAccumulator::new(&accounts, as_of()).accumulate(&mut amounts);

        assert_eq!(amounts, before);
    }

    #[test]
    fn test_empty_dataset_stays_empty() {
        let accounts = vec![account(5, AccountType::Asset)];
        let mut amounts = MonthlyAmounts::new();

        BalanceAccumulator::new(&accounts, as_of()).accumulate(&mut amounts);

        assert!(amounts.is_empty());
    }
}
