use crate::dataset::MonthlyAmounts;
use crate::schema::{MonthlyAmountInput, PointRecord, SpanRecord};
use crate::utils::{iter_between, today_plus_one, YearMonth};
use log::debug;

/// Sums already-dated records into a fresh partial dataset.
pub fn aggregate_points(records: &[PointRecord]) -> MonthlyAmounts {
    let mut amounts = MonthlyAmounts::new();
    for record in records {
        amounts.add(record.month, record.account_id, record.amount);
    }
    amounts
}

/// Floor of `amount / months`. The remainder is dropped, never carried into
/// the last month.
pub fn installment(amount: i64, months: i64) -> i64 {
    amount.div_euclid(months)
}

/// Posts one span record.
///
/// Balance-sheet accounts receive the full amount in the start month; the
/// accumulator carries it forward later. Every other account receives an equal
/// installment in each month from start through end.
pub fn allocate_span(amounts: &mut MonthlyAmounts, record: &SpanRecord) {
    debug_assert!(
        record.start_date <= record.end_date,
        "span for account {} ends before it starts",
        record.account_id
    );

    if record.account_type.is_balance_sheet() {
        amounts.add(
            YearMonth::from_date(record.start_date),
            record.account_id,
            record.amount,
        );
        return;
    }

    let months = record.months();
    let per_month = installment(record.amount, months);
    for month in iter_between(record.start_date, today_plus_one(record.end_date)) {
        amounts.add(month, record.account_id, per_month);
    }
}

pub fn allocate_spans(records: &[SpanRecord]) -> MonthlyAmounts {
    let mut amounts = MonthlyAmounts::new();
    for record in records {
        allocate_span(&mut amounts, record);
    }
    amounts
}

/// Runs the four aggregation stages in their fixed order (point debits, point
/// credits, span debits, span credits) and merges the partial results.
pub fn aggregate_records(input: &MonthlyAmountInput) -> MonthlyAmounts {
    let stages = [
        ("point debits", aggregate_points(&input.point_debits)),
        ("point credits", aggregate_points(&input.point_credits)),
        ("span debits", allocate_spans(&input.span_debits)),
        ("span credits", allocate_spans(&input.span_credits)),
    ];

    let mut amounts = MonthlyAmounts::new();
    for (stage, partial) in stages {
        debug!("Aggregated {}: {} cells", stage, partial.len());
        amounts.merge(partial);
    }
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AccountType;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn span(account_type: AccountType, amount: i64, start: NaiveDate, end: NaiveDate) -> SpanRecord {
        SpanRecord {
            account_id: 10,
            account_type,
            amount,
            start_date: start,
            end_date: end,
        }
    }

    fn point(month: &str, account_id: i64, amount: i64) -> PointRecord {
        PointRecord {
            month: ym(month),
            account_id,
            account_type: AccountType::Expense,
            amount,
        }
    }

    #[test]
    fn test_points_are_summed_per_key() {
        let amounts = aggregate_points(&[
            point("2024-01", 4, 1500),
            point("2024-01", 4, 250),
            point("2024-02", 4, 80),
            point("2024-01", 6, 9),
        ]);

        assert_eq!(amounts.get(ym("2024-01"), 4), Some(1750));
        assert_eq!(amounts.get(ym("2024-02"), 4), Some(80));
        assert_eq!(amounts.get(ym("2024-01"), 6), Some(9));
        assert_eq!(amounts.len(), 3);
    }

    #[test]
    fn test_expense_span_is_spread_evenly() {
        let mut amounts = MonthlyAmounts::new();
        allocate_span(
            &mut amounts,
            &span(AccountType::Expense, 1200, date(2024, 1, 1), date(2024, 3, 31)),
        );

        assert_eq!(amounts.len(), 3);
        assert_eq!(amounts.get(ym("2024-01"), 10), Some(400));
        assert_eq!(amounts.get(ym("2024-02"), 10), Some(400));
        assert_eq!(amounts.get(ym("2024-03"), 10), Some(400));
    }

    #[test]
    fn test_span_rounding_loss_is_not_redistributed() {
        let record = span(AccountType::Income, 1000, date(2024, 1, 15), date(2024, 3, 1));
        let amounts = allocate_spans(std::slice::from_ref(&record));

        let months = record.months();
        let total: i64 = amounts.iter().map(|(_, v)| *v).sum();

        assert_eq!(months, 3);
        assert_eq!(amounts.len(), 3);
        assert_eq!(amounts.get(ym("2024-03"), 10), Some(333));
        assert_eq!(total, 999);
        assert!(total <= record.amount);
        assert!(record.amount - total < months);
    }

    #[test]
    fn test_negative_span_floors_toward_negative_infinity() {
        let record = span(AccountType::Expense, -100, date(2024, 1, 1), date(2024, 3, 31));
        let amounts = allocate_spans(std::slice::from_ref(&record));

        assert_eq!(amounts.get(ym("2024-01"), 10), Some(-34));
        let total: i64 = amounts.iter().map(|(_, v)| *v).sum();
        assert!(total <= record.amount);
        assert!(record.amount - total < 3);
    }

    #[test]
    fn test_single_month_span_posts_full_amount() {
        let amounts = allocate_spans(&[span(
            AccountType::Other,
            777,
            date(2024, 5, 3),
            date(2024, 5, 3),
        )]);

        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts.get(ym("2024-05"), 10), Some(777));
        assert_eq!(installment(777, 1), 777);
    }

    #[test]
    fn test_span_across_year_boundary() {
        let amounts = allocate_spans(&[span(
            AccountType::Expense,
            12000,
            date(2023, 4, 1),
            date(2024, 3, 31),
        )]);

        assert_eq!(amounts.len(), 12);
        assert_eq!(amounts.earliest_month(), Some(ym("2023-04")));
        assert_eq!(amounts.get(ym("2023-12"), 10), Some(1000));
        assert_eq!(amounts.get(ym("2024-03"), 10), Some(1000));
        assert_eq!(amounts.get(ym("2024-04"), 10), None);
    }

    #[test]
    fn test_balance_sheet_span_is_not_spread() {
        for account_type in [AccountType::Asset, AccountType::Liability] {
            let amounts = allocate_spans(&[span(
                account_type,
                -5000,
                date(2024, 2, 10),
                date(2024, 8, 31),
            )]);

            assert_eq!(amounts.len(), 1, "{:?} span must post once", account_type);
            assert_eq!(amounts.get(ym("2024-02"), 10), Some(-5000));
        }
    }

    #[test]
    fn test_aggregate_records_merges_all_four_sets() {
        let input = MonthlyAmountInput {
            accounts: vec![],
            point_debits: vec![point("2024-01", 10, 500)],
            point_credits: vec![point("2024-01", 10, -200)],
            span_debits: vec![span(AccountType::Expense, 300, date(2024, 1, 1), date(2024, 3, 31))],
            span_credits: vec![span(AccountType::Expense, -30, date(2024, 2, 1), date(2024, 2, 28))],
        };

        let amounts = aggregate_records(&input);

        assert_eq!(amounts.get(ym("2024-01"), 10), Some(400));
        assert_eq!(amounts.get(ym("2024-02"), 10), Some(70));
        assert_eq!(amounts.get(ym("2024-03"), 10), Some(100));
    }
}
