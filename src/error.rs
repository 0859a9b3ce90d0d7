use chrono::NaiveDate;
use thiserror::Error;

use crate::schema::AccountType;

#[derive(Error, Debug)]
pub enum MonthlyAmountError {
    #[error("Invalid span for account {account_id}: end date {end} is before start date {start}")]
    InvalidSpan {
        account_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Record references unknown account: {0}")]
    UnknownAccount(i64),

    #[error("Account {account_id} is {expected:?} but a record reports it as {found:?}")]
    AccountTypeMismatch {
        account_id: i64,
        expected: AccountType,
        found: AccountType,
    },

    #[error("Invalid account type code {0}: must be between 1 and 5")]
    InvalidAccountType(i32),

    #[error("Invalid month: {0}. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid amount key: {0}. Expected YYYY-MM:<account id>")]
    InvalidKey(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MonthlyAmountError>;
