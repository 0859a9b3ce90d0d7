//! # Monthly Amount
//!
//! Builds the monthly time series behind a household ledger's charts
//! (`monthly_amount.tsv`) from the debit and credit records of a double-entry
//! bookkeeping database.
//!
//! ## Core Concepts
//!
//! - **Point records**: debit/credit totals already bucketed to one month
//! - **Span records**: transactions covering a date range (prepaid insurance,
//!   annual subscriptions) whose amount is amortized over the months they cover
//! - **Balance Sheet Accounts**: Assets and Liabilities are never amortized; their
//!   monthly deltas are carried forward into running balances
//! - **Flow Accounts**: Income, Expense and everything else are reported as
//!   monthly amounts
//!
//! ## Example
//!
//! ```rust,ignore
//! use monthly_amount::*;
//! use chrono::NaiveDate;
//!
//! let input = MonthlyAmountInput {
//!     accounts: vec![Account {
//!         id: 10,
//!         account_type: AccountType::Expense,
//!         name: "Insurance".to_string(),
//!     }],
//!     span_debits: vec![SpanRecord {
//!         account_id: 10,
//!         account_type: AccountType::Expense,
//!         amount: 1200,
//!         start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//!     }],
//!     ..Default::default()
//! };
//!
//! let config = MonthlyAmountConfig::default().as_of(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
//! let report = build_monthly_amount(&input, &config).unwrap();
//! print!("{}", report.grid.to_tsv(config.delimiter).unwrap());
//! ```

pub mod accumulator;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod export;
pub mod key;
pub mod schema;
pub mod utils;

pub use accumulator::BalanceAccumulator;
pub use config::MonthlyAmountConfig;
pub use dataset::MonthlyAmounts;
pub use engine::{aggregate_points, aggregate_records, allocate_span, allocate_spans, installment};
pub use error::{MonthlyAmountError, Result};
pub use export::{export_grid, MonthlyGrid};
pub use key::{make_key, AmountKey};
pub use schema::*;
pub use utils::*;

use log::{debug, info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct MonthlyAmountReport {
    /// Sparse dataset after balance carry-forward.
    pub amounts: MonthlyAmounts,
    pub grid: MonthlyGrid,
}

pub struct MonthlyAmountProcessor {
    config: MonthlyAmountConfig,
}

impl MonthlyAmountProcessor {
    pub fn new(config: MonthlyAmountConfig) -> Self {
        Self { config }
    }

    pub fn process(&self, input: &MonthlyAmountInput) -> Result<MonthlyAmountReport> {
        validate_input(input)?;

        let as_of = self.config.resolve_as_of();
        info!(
            "Building monthly amounts for {} accounts from {} records (as of {})",
            input.accounts.len(),
            input.record_count(),
            as_of
        );

        let mut amounts = aggregate_records(input);
        debug!("Aggregation produced {} cells", amounts.len());

        BalanceAccumulator::new(&input.accounts, as_of).accumulate(&mut amounts);
        debug!("Balance carry-forward produced {} cells", amounts.len());

        let mut accounts = input.accounts.clone();
        accounts.sort_by_key(Account::sort_key);

        let start = self
            .config
            .start_date
            .or_else(|| amounts.earliest_month().and_then(|m| m.first_day()));

        let grid = match start {
            Some(start) => export_grid(&amounts, &accounts, start, as_of),
            None => MonthlyGrid::default(),
        };

        if grid.is_empty() {
            warn!("No qualifying transactions; monthly amount export is empty");
        } else {
            info!("Exported {} months", grid.body().len());
        }

        Ok(MonthlyAmountReport { amounts, grid })
    }
}

pub fn build_monthly_amount(
    input: &MonthlyAmountInput,
    config: &MonthlyAmountConfig,
) -> Result<MonthlyAmountReport> {
    MonthlyAmountProcessor::new(config.clone()).process(input)
}

fn validate_input(input: &MonthlyAmountInput) -> Result<()> {
    let types: HashMap<i64, AccountType> = input
        .accounts
        .iter()
        .map(|a| (a.id, a.account_type))
        .collect();

    let check_account = |account_id: i64, found: AccountType| -> Result<()> {
        let expected = *types
            .get(&account_id)
            .ok_or(MonthlyAmountError::UnknownAccount(account_id))?;
        if expected != found {
            return Err(MonthlyAmountError::AccountTypeMismatch {
                account_id,
                expected,
                found,
            });
        }
        Ok(())
    };

    for record in input.point_debits.iter().chain(&input.point_credits) {
        check_account(record.account_id, record.account_type)?;
    }

    for record in input.span_debits.iter().chain(&input.span_credits) {
        check_account(record.account_id, record.account_type)?;
        if record.end_date < record.start_date {
            return Err(MonthlyAmountError::InvalidSpan {
                account_id: record.account_id,
                start: record.start_date,
                end: record.end_date,
            });
        }
    }

    Ok(())
}
