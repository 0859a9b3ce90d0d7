use crate::error::{MonthlyAmountError, Result};
use crate::utils::YearMonth;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Variant order mirrors the ledger's integer codes, so sorting by type gives
/// assets, liabilities, income, expense, then everything else.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "PascalCase")]
pub enum AccountType {
    #[schemars(description = "Resources owned: cash, bank deposits, receivables (Balance Sheet, debit balance)")]
    Asset,

    #[schemars(description = "Obligations owed: credit cards, loans, payables (Balance Sheet, credit balance)")]
    Liability,

    #[schemars(description = "Earnings recognized over time: salary, interest (Profit and Loss)")]
    Income,

    #[schemars(description = "Costs recognized over time: rent, insurance, utilities (Profit and Loss)")]
    Expense,

    #[schemars(description = "Any other account, e.g. equity. Treated as a flow account.")]
    Other,
}

impl AccountType {
    /// Maps the ledger's stored code (1 = asset, 2 = liability, 3 = income,
    /// 4 = expense, 5 = equity).
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::Asset),
            2 => Ok(Self::Liability),
            3 => Ok(Self::Income),
            4 => Ok(Self::Expense),
            5 => Ok(Self::Other),
            _ => Err(MonthlyAmountError::InvalidAccountType(code)),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Asset => 1,
            Self::Liability => 2,
            Self::Income => 3,
            Self::Expense => 4,
            Self::Other => 5,
        }
    }

    /// Asset and liability amounts are balance changes: they are booked once
    /// and carried forward instead of being spread over a span.
    pub fn is_balance_sheet(&self) -> bool {
        matches!(self, Self::Asset | Self::Liability)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Account {
    #[schemars(description = "Primary key of the account in the ledger")]
    pub id: i64,

    pub account_type: AccountType,

    #[schemars(description = "Display name, e.g. 'Bank', 'Rent', 'Salary'")]
    pub name: String,
}

impl Account {
    pub fn sort_key(&self) -> (AccountType, i64) {
        (self.account_type, self.id)
    }
}

/// A debit or credit total already bucketed to a single month by the query
/// layer. Credit-side records carry negated amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct PointRecord {
    #[schemars(description = "Month in YYYY-MM format")]
    pub month: YearMonth,

    pub account_id: i64,

    pub account_type: AccountType,

    #[schemars(description = "Signed amount in the smallest currency unit. Positive for debit, negative for credit.")]
    pub amount: i64,
}

/// A transaction whose amount covers an inclusive date range, e.g. an annual
/// insurance premium paid up front.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct SpanRecord {
    pub account_id: i64,

    pub account_type: AccountType,

    #[schemars(description = "Signed amount in the smallest currency unit. Positive for debit, negative for credit.")]
    pub amount: i64,

    #[schemars(description = "First day covered, YYYY-MM-DD")]
    pub start_date: NaiveDate,

    #[schemars(description = "Last day covered (inclusive), YYYY-MM-DD. Must not be before start_date.")]
    pub end_date: NaiveDate,
}

impl SpanRecord {
    pub fn months(&self) -> i64 {
        crate::utils::months_in_span(self.start_date, self.end_date)
    }
}

/// The four record sets fetched by the query layer plus the chart of accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyAmountInput {
    #[schemars(description = "All accounts, ordered by account type then id")]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub point_debits: Vec<PointRecord>,

    #[serde(default)]
    #[schemars(description = "Credit-side point records. Amounts are already negated.")]
    pub point_credits: Vec<PointRecord>,

    #[serde(default)]
    pub span_debits: Vec<SpanRecord>,

    #[serde(default)]
    #[schemars(description = "Credit-side span records. Amounts are already negated.")]
    pub span_credits: Vec<SpanRecord>,
}

impl MonthlyAmountInput {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(MonthlyAmountInput)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn record_count(&self) -> usize {
        self.point_debits.len()
            + self.point_credits.len()
            + self.span_debits.len()
            + self.span_credits.len()
    }
}
