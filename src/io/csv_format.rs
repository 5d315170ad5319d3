//! CSV format handling for snapshot rows and summaries
//!
//! This module centralizes both directions of the tabular⇄structured
//! conversion:
//! - parsing a raw snapshot payload into [`Transaction`] records
//! - serializing record sequences and balance summaries back to CSV
//!
//! # Design
//!
//! Parsing maps column name → position from the header line, so the eight
//! canonical columns may appear in any order. Values are then read by
//! name, never by fixed position. A row that is structurally short or
//! carries an unparseable value aborts the whole parse with `MalformedRow`
//! and the offending 1-based line number; a partial financial summary
//! must never be produced silently.
//!
//! Both directions are pure functions of their input (no implicit state),
//! so the same payload always yields the same records and vice versa.

use crate::io::header::{normalize_header, strip_bom, BOM};
use crate::types::transaction::{CANONICAL_COLUMNS, DATE_FORMAT};
use crate::types::{AggregationError, BalanceSummary, Transaction};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

/// Column positions resolved from the header line
struct ColumnIndex {
    date: usize,
    account: usize,
    category: usize,
    amount: usize,
    currency: usize,
    converted_amount: usize,
    converted_currency: usize,
    description: usize,
}

impl ColumnIndex {
    /// Resolve canonical column names to positions in the header
    ///
    /// Lookup is case-insensitive; on duplicate names the first position
    /// wins, which the header normalizer has already disambiguated for
    /// the known export bug.
    fn from_header(header: &StringRecord) -> Result<Self, AggregationError> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (index, name) in header.iter().enumerate() {
            positions
                .entry(name.trim().to_ascii_lowercase())
                .or_insert(index);
        }

        let lookup = |name: &str| {
            positions.get(name).copied().ok_or_else(|| {
                AggregationError::malformed_row(1, format!("missing column '{name}'"))
            })
        };

        Ok(ColumnIndex {
            date: lookup("date")?,
            account: lookup("account")?,
            category: lookup("category")?,
            amount: lookup("amount")?,
            currency: lookup("currency")?,
            converted_amount: lookup("converted amount")?,
            converted_currency: lookup("converted currency")?,
            description: lookup("description")?,
        })
    }
}

/// Parse a raw snapshot payload into transaction records
///
/// The payload is BOM-stripped and header-normalized before the CSV
/// reader sees it. The first line is the header; every subsequent line
/// becomes one record.
///
/// # Errors
///
/// Returns `MalformedRow` identifying the first line that is structurally
/// short, carries an invalid date, or carries an invalid decimal amount.
pub fn parse_transactions(raw: &str) -> Result<Vec<Transaction>, AggregationError> {
    let text = normalize_header(strip_bom(raw));
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header = reader.headers()?.clone();
    let columns = ColumnIndex::from_header(&header)?;

    let mut transactions = Vec::new();
    for (index, row) in reader.records().enumerate() {
        // 1-based line number, counting the header line.
        let line = index as u64 + 2;
        let record = row?;
        if record.len() < header.len() {
            return Err(AggregationError::malformed_row(
                line,
                format!("expected {} fields, found {}", header.len(), record.len()),
            ));
        }
        transactions.push(convert_row(&record, &columns, line)?);
    }

    debug!(rows = transactions.len(), "parsed snapshot rows");
    Ok(transactions)
}

/// Convert one data row into a transaction record
fn convert_row(
    record: &StringRecord,
    columns: &ColumnIndex,
    line: u64,
) -> Result<Transaction, AggregationError> {
    let field = |index: usize| record.get(index).unwrap_or("");

    let date_raw = field(columns.date);
    let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT).map_err(|_| {
        AggregationError::malformed_row(line, format!("invalid date '{date_raw}'"))
    })?;

    let amount = parse_amount(field(columns.amount), "amount", line)?;
    let converted_amount =
        parse_amount(field(columns.converted_amount), "converted amount", line)?;

    let description = match field(columns.description) {
        "" => None,
        text => Some(text.to_string()),
    };

    Ok(Transaction {
        date,
        account: field(columns.account).to_string(),
        category: field(columns.category).to_string(),
        amount,
        currency: field(columns.currency).to_string(),
        converted_amount,
        converted_currency: field(columns.converted_currency).to_string(),
        description,
    })
}

fn parse_amount(raw: &str, column: &str, line: u64) -> Result<Decimal, AggregationError> {
    Decimal::from_str(raw).map_err(|_| {
        AggregationError::malformed_row(line, format!("invalid {column} '{raw}'"))
    })
}

/// Write transaction records as canonical CSV
///
/// Emits the byte-order mark, the canonical header, and one line per
/// record. Decimal amounts render as exact decimal text.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), AggregationError> {
    output.write_all(BOM.as_bytes())?;
    let mut writer = WriterBuilder::new().from_writer(output);

    writer.write_record(CANONICAL_COLUMNS)?;
    for transaction in transactions {
        writer.write_record(&[
            transaction.date.format(DATE_FORMAT).to_string(),
            transaction.account.clone(),
            transaction.category.clone(),
            transaction.amount.to_string(),
            transaction.currency.clone(),
            transaction.converted_amount.to_string(),
            transaction.converted_currency.clone(),
            transaction.description.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a balance summary as single-row CSV
///
/// The header row carries `income`, `expense`, `balance` and then every
/// category name in key order; the single data row carries the
/// corresponding values.
pub fn write_summary_csv(
    summary: &BalanceSummary,
    output: &mut dyn Write,
) -> Result<(), AggregationError> {
    output.write_all(BOM.as_bytes())?;
    let mut writer = WriterBuilder::new().from_writer(output);

    let mut header: Vec<&str> = vec!["income", "expense", "balance"];
    let mut values = vec![
        summary.income.to_string(),
        summary.expense.to_string(),
        summary.balance.to_string(),
    ];
    for (category, total) in summary.categories.iter() {
        header.push(category);
        values.push(total.to_string());
    }

    writer.write_record(&header)?;
    writer.write_record(&values)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategorySummary;
    use rstest::rstest;

    const SNAPSHOT: &str = "\u{feff}date,account,category,amount,currency,converted amount,converted currency,description\n\
        12/12/2021,Cash,Salary,1111,USD,1111,USD,\n\
        13/12/2021,Card,Food,-200.50,USD,-200.50,USD,groceries\n";

    #[test]
    fn test_parse_canonical_snapshot() {
        let transactions = parse_transactions(SNAPSHOT).unwrap();
        assert_eq!(transactions.len(), 2);

        assert_eq!(
            transactions[0].date,
            NaiveDate::from_ymd_opt(2021, 12, 12).unwrap()
        );
        assert_eq!(transactions[0].account, "Cash");
        assert_eq!(transactions[0].category, "Salary");
        assert_eq!(transactions[0].amount, Decimal::new(1111, 0));
        assert_eq!(transactions[0].description, None);

        assert_eq!(transactions[1].amount, Decimal::new(-20050, 2));
        assert_eq!(transactions[1].description.as_deref(), Some("groceries"));
    }

    #[test]
    fn test_parse_duplicated_currency_header() {
        // The known export bug: parsing must proceed without misalignment.
        let payload = "\u{feff}date,account,category,amount,currency,converted amount,currency,description\n\
            12/12/2021,Cash,Salary,1111,USD,1100,EUR,\n";
        let transactions = parse_transactions(payload).unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].currency, "USD");
        assert_eq!(transactions[0].converted_amount, Decimal::new(1100, 0));
        assert_eq!(transactions[0].converted_currency, "EUR");
    }

    #[test]
    fn test_parse_reordered_columns() {
        // Columns are read by name, not position.
        let payload = "amount,date,account,category,currency,converted currency,converted amount,description\n\
            42,01/02/2022,Cash,Food,USD,USD,42,\n";
        let transactions = parse_transactions(payload).unwrap();

        assert_eq!(transactions[0].amount, Decimal::new(42, 0));
        assert_eq!(
            transactions[0].date,
            NaiveDate::from_ymd_opt(2022, 2, 1).unwrap()
        );
        assert_eq!(transactions[0].category, "Food");
    }

    #[test]
    fn test_parse_empty_category_is_kept() {
        let payload = "date,account,category,amount,currency,converted amount,converted currency,description\n\
            12/12/2021,Cash,,-75,USD,-75,USD,transfer\n";
        let transactions = parse_transactions(payload).unwrap();
        assert_eq!(transactions[0].category, "");
    }

    #[rstest]
    #[case::short_row(
        "12/12/2021,Cash,Salary,1111,USD\n",
        2,
        "expected 8 fields, found 5"
    )]
    #[case::invalid_amount(
        "12/12/2021,Cash,Salary,lots,USD,1111,USD,\n",
        2,
        "invalid amount 'lots'"
    )]
    #[case::invalid_date(
        "2021-12-12,Cash,Salary,1111,USD,1111,USD,\n",
        2,
        "invalid date '2021-12-12'"
    )]
    fn test_parse_aborts_on_malformed_row(
        #[case] row: &str,
        #[case] expected_line: u64,
        #[case] expected_message: &str,
    ) {
        let payload = format!(
            "date,account,category,amount,currency,converted amount,converted currency,description\n{row}"
        );
        let error = parse_transactions(&payload).unwrap_err();
        match error {
            AggregationError::MalformedRow { line, message } => {
                assert_eq!(line, expected_line);
                assert!(
                    message.contains(expected_message),
                    "message was: {message}"
                );
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reports_line_of_later_failure() {
        let payload = "date,account,category,amount,currency,converted amount,converted currency,description\n\
            12/12/2021,Cash,Salary,1111,USD,1111,USD,\n\
            13/12/2021,Cash,Food,bad,USD,0,USD,\n";
        let error = parse_transactions(payload).unwrap_err();
        assert!(matches!(
            error,
            AggregationError::MalformedRow { line: 3, .. }
        ));
    }

    #[test]
    fn test_parse_missing_column_fails_on_header() {
        let payload = "date,account,category,amount,currency\n12/12/2021,Cash,Salary,1111,USD\n";
        let error = parse_transactions(payload).unwrap_err();
        match error {
            AggregationError::MalformedRow { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("missing column"));
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let transactions = parse_transactions(SNAPSHOT).unwrap();

        let mut bytes = Vec::new();
        write_transactions_csv(&transactions, &mut bytes).unwrap();
        let serialized = String::from_utf8(bytes).unwrap();
        let reparsed = parse_transactions(&serialized).unwrap();

        assert_eq!(transactions, reparsed);
    }

    #[test]
    fn test_written_csv_carries_bom_and_canonical_header() {
        let mut bytes = Vec::new();
        write_transactions_csv(&[], &mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "\u{feff}date,account,category,amount,currency,converted amount,converted currency,description\n"
        );
    }

    #[test]
    fn test_write_summary_csv() {
        let mut categories = CategorySummary::new();
        categories.add("Salary", Decimal::new(1111, 0));
        categories.add("Food", Decimal::new(-250, 0));
        let summary = BalanceSummary {
            income: Decimal::new(1111, 0),
            expense: Decimal::new(-250, 0),
            balance: Decimal::new(861, 0),
            categories,
        };

        let mut bytes = Vec::new();
        write_summary_csv(&summary, &mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "\u{feff}income,expense,balance,Food,Salary\n1111,-250,861,-250,1111\n"
        );
    }

    #[test]
    fn test_exact_decimal_text_survives_round_trip() {
        let payload = "date,account,category,amount,currency,converted amount,converted currency,description\n\
            01/01/2022,Cash,Food,-0.10,USD,-0.10,USD,\n";
        let transactions = parse_transactions(payload).unwrap();

        let mut bytes = Vec::new();
        write_transactions_csv(&transactions, &mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        // Scale is preserved: -0.10 stays -0.10, not -0.1.
        assert!(text.contains(",-0.10,"));
    }
}
