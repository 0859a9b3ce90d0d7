//! Dense month × account grid built from the sparse dataset.

use crate::dataset::MonthlyAmounts;
use crate::error::Result;
use crate::schema::Account;
use crate::utils::{iter_between, today_plus_one};
use chrono::NaiveDate;
use std::io::{self, Write};

/// Header row followed by one row per month. Empty when there was nothing to
/// export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyGrid {
    rows: Vec<Vec<String>>,
}

impl MonthlyGrid {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Data rows, without the header.
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_tsv<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_tsv(&self, delimiter: u8) -> Result<String> {
        let mut buf = Vec::new();
        self.write_tsv(&mut buf, delimiter)?;
        let text =
            String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(text)
    }
}

/// Builds the grid from `start`'s month through the month of `as_of`.
///
/// `accounts` gives the column order. Missing cells are written as `0`.
pub fn export_grid(
    amounts: &MonthlyAmounts,
    accounts: &[Account],
    start: NaiveDate,
    as_of: NaiveDate,
) -> MonthlyGrid {
    if amounts.is_empty() {
        return MonthlyGrid::default();
    }

    let mut rows = Vec::new();

    let mut header = Vec::with_capacity(accounts.len() + 1);
    header.push("ym".to_string());
    header.extend(accounts.iter().map(|a| a.id.to_string()));
    rows.push(header);

    for month in iter_between(start, today_plus_one(as_of)) {
        let mut row = Vec::with_capacity(accounts.len() + 1);
        row.push(month.to_string());
        row.extend(
            accounts
                .iter()
                .map(|a| amounts.value_or_zero(month, a.id).to_string()),
        );
        rows.push(row);
    }

    MonthlyGrid { rows }
}
