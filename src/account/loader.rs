//! Load transaction history from CSV
//!
//! Expected columns: `id,kind,amount,date`. `id` may be blank (a fresh id is
//! assigned), `kind` defaults to `deposit`. Dates are `YYYY-MM-DD` or
//! `DD.MM.YYYY`. Rows without a date cannot be evaluated and are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{Deposit, Transaction, TransactionId, TransactionKind};
use crate::error::LoadError;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    /// Kept as text so amounts parse exactly, without an f64 step
    amount: String,
    #[serde(default)]
    date: Option<String>,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d.%m.%Y"))
        .ok()
}

impl CsvRow {
    /// `Ok(None)` means the row is skipped
    fn into_transaction(self, line: u64) -> Result<Option<Transaction>, LoadError> {
        let invalid = |reason: String| LoadError::InvalidRecord { line, reason };

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => {
                log::warn!("line {}: no date, skipping", line);
                return Ok(None);
            }
            Some(raw) => parse_date(raw).ok_or_else(|| invalid(format!("unparseable date '{}'", raw)))?,
        };

        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => TransactionKind::Deposit,
            Some(raw) => TransactionKind::parse(raw)
                .ok_or_else(|| invalid(format!("unknown transaction kind '{}'", raw)))?,
        };

        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => TransactionId::new(),
            Some(raw) => Uuid::parse_str(raw)
                .map(TransactionId::from_uuid)
                .map_err(|e| invalid(format!("bad id '{}': {}", raw, e)))?,
        };

        let raw_amount = self.amount.trim();
        let amount = Decimal::from_str(raw_amount)
            .map_err(|e| invalid(format!("bad amount '{}': {}", raw_amount, e)))?;
        if amount <= Decimal::ZERO {
            return Err(invalid(format!("amount must be positive, got {}", amount)));
        }

        Ok(Some(Transaction {
            id,
            kind,
            amount,
            date,
        }))
    }
}

/// Load transactions from any reader (e.g., string buffer, file)
pub fn load_transactions_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).flexible(true).from_reader(reader);
    let mut transactions = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        if let Some(transaction) = row.into_transaction(index as u64 + 2)? {
            transactions.push(transaction);
        }
    }

    log::info!("loaded {} transactions", transactions.len());
    Ok(transactions)
}

/// Load transactions from a CSV file
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, LoadError> {
    let file = File::open(path)?;
    load_transactions_from_reader(file)
}

/// Load only the deposit records from a CSV file
pub fn load_deposits<P: AsRef<Path>>(path: P) -> Result<Vec<Deposit>, LoadError> {
    Ok(load_transactions(path)?
        .iter()
        .filter_map(Transaction::as_deposit)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_mixed_rows() {
        let csv = "\
id,kind,amount,date
,deposit,2000,01.02.2024
67e55044-10b1-426f-9247-bb680e5fe0c8,withdrawal,150.25,2024-03-15
,,800,2024-04-01
";
        let transactions = load_transactions_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 3);

        assert_eq!(transactions[0].kind, TransactionKind::Deposit);
        assert_eq!(transactions[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(transactions[1].kind, TransactionKind::Withdrawal);
        assert_eq!(transactions[1].amount, dec!(150.25));
        assert_eq!(
            transactions[1].id.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(transactions[2].kind, TransactionKind::Deposit);
    }

    #[test]
    fn test_missing_date_is_skipped() {
        let csv = "id,kind,amount,date\n,deposit,500,\n,deposit,300,2024-01-05\n";
        let transactions = load_transactions_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, dec!(300));
    }

    #[test]
    fn test_unknown_kind_is_error() {
        let csv = "id,kind,amount,date\n,refund,10,2024-01-05\n";
        match load_transactions_from_reader(csv.as_bytes()) {
            Err(LoadError::InvalidRecord { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("refund"));
            }
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_large_amount_is_exact() {
        let csv = "id,kind,amount,date\n,deposit,12345678901234567.89,2024-01-05\n";
        let transactions = load_transactions_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(transactions[0].amount, dec!(12345678901234567.89));
    }

    #[test]
    fn test_bad_amount_is_error() {
        let csv = "id,kind,amount,date\n,deposit,12abc,2024-01-05\n";
        assert!(matches!(
            load_transactions_from_reader(csv.as_bytes()),
            Err(LoadError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_non_positive_amount_is_error() {
        let csv = "id,kind,amount,date\n,deposit,-5,2024-01-05\n";
        assert!(load_transactions_from_reader(csv.as_bytes()).is_err());
    }
}
