use chrono::NaiveDate;
use monthly_amount::*;
use std::fs;

fn main() -> anyhow::Result<()> {
    println!("📊 Monthly Amount Demo\n");

    // Optional first argument: a JSON file in the MonthlyAmountInput format.
    let input = match std::env::args().nth(1) {
        Some(path) => MonthlyAmountInput::from_json(&fs::read_to_string(path)?)?,
        None => sample_input(),
    };

    let config = MonthlyAmountConfig::default();
    let report = build_monthly_amount(&input, &config)?;

    if report.grid.is_empty() {
        println!("No transactions to export.");
        return Ok(());
    }

    let tsv = report.grid.to_tsv(config.delimiter)?;
    fs::write("monthly_amount.tsv", &tsv)?;

    println!("{}", tsv);
    println!("✅ Wrote {} months to monthly_amount.tsv", report.grid.body().len());
    Ok(())
}

fn sample_input() -> MonthlyAmountInput {
    let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dec = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let month: YearMonth = "2024-01".parse().unwrap();

    MonthlyAmountInput {
        accounts: vec![
            Account {
                id: 1,
                account_type: AccountType::Asset,
                name: "Bank".to_string(),
            },
            Account {
                id: 3,
                account_type: AccountType::Income,
                name: "Salary".to_string(),
            },
            Account {
                id: 5,
                account_type: AccountType::Expense,
                name: "Insurance".to_string(),
            },
        ],
        point_debits: vec![PointRecord {
            month,
            account_id: 1,
            account_type: AccountType::Asset,
            amount: 250_000,
        }],
        point_credits: vec![PointRecord {
            month,
            account_id: 3,
            account_type: AccountType::Income,
            amount: -250_000,
        }],
        // Annual premium paid up front, recognized monthly.
        span_debits: vec![SpanRecord {
            account_id: 5,
            account_type: AccountType::Expense,
            amount: 60_000,
            start_date: jan,
            end_date: dec,
        }],
        span_credits: vec![SpanRecord {
            account_id: 1,
            account_type: AccountType::Asset,
            amount: -60_000,
            start_date: jan,
            end_date: dec,
        }],
    }
}
