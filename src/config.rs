use crate::error::Result;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_delimiter() -> u8 {
    b'\t'
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyAmountConfig {
    #[serde(default)]
    #[schemars(description = "First exported month (YYYY-MM-DD, day is ignored). Defaults to the earliest month with data.")]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Date treated as today. The export runs through this date's month. Defaults to the local date.")]
    pub as_of: Option<NaiveDate>,

    #[serde(default = "default_delimiter")]
    #[schemars(description = "Field delimiter byte of the TSV output. Defaults to a tab (9).")]
    pub delimiter: u8,
}

impl Default for MonthlyAmountConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            as_of: None,
            delimiter: default_delimiter(),
        }
    }
}

impl MonthlyAmountConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn resolve_as_of(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
