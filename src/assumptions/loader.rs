//! File-based assumption loader
//!
//! Assumptions come from a JSON document where every field is optional, and
//! currency tables from a two-column `code,rate` CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{Assumptions, CurrencyTable};
use crate::error::LoadError;

/// Default path to the assumptions document
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions.json";

/// Default path to the currency table
pub const DEFAULT_CURRENCY_PATH: &str = "data/currency_rates.csv";

/// Load assumptions from any JSON reader
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<Assumptions, LoadError> {
    let assumptions: Assumptions = serde_json::from_reader(reader)?;
    Ok(assumptions)
}

/// Load assumptions from a JSON file
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<Assumptions, LoadError> {
    let file = File::open(path)?;
    load_assumptions_from_reader(file)
}

#[derive(Debug, Deserialize)]
struct RateRow {
    code: String,
    rate: f64,
}

/// Load a currency table from any CSV reader
///
/// The base unit is always present even if the file omits it. Rows with an
/// empty code or an unusable rate are rejected.
pub fn load_currency_table_from_reader<R: Read>(reader: R) -> Result<CurrencyTable, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut table = CurrencyTable::base_only();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: RateRow = result?;
        // header is line 1
        let line = index as u64 + 2;
        if row.code.is_empty() {
            return Err(LoadError::InvalidRecord {
                line,
                reason: "empty currency code".to_string(),
            });
        }
        if !table.set_rate(&row.code, row.rate) {
            return Err(LoadError::InvalidRecord {
                line,
                reason: format!("invalid rate {} for {}", row.rate, row.code),
            });
        }
    }

    log::debug!("loaded {} currency rates", table.codes().count());
    Ok(table)
}

/// Load a currency table from a CSV file
pub fn load_currency_table<P: AsRef<Path>>(path: P) -> Result<CurrencyTable, LoadError> {
    let file = File::open(path)?;
    load_currency_table_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "fees": { "maturing_rate": 0.25 }, "limits": { "max_horizon_months": 24 } }"#;
        let assumptions = load_assumptions_from_reader(json.as_bytes()).unwrap();

        assert_eq!(assumptions.fees.maturing_rate, 0.25);
        assert_eq!(assumptions.fees.standard_rate, 0.05);
        assert_eq!(assumptions.limits.max_horizon_months, 24);
        assert_eq!(assumptions.limits.feasibility_search_months, 60);
        assert_eq!(assumptions.rates.rate_per_signal, 0.006);
    }

    #[test]
    fn test_empty_json_object() {
        let assumptions = load_assumptions_from_reader("{}".as_bytes()).unwrap();
        assert_eq!(assumptions, Assumptions::default());
    }

    #[test]
    fn test_currency_csv() {
        let csv = "code,rate\nPLN, 3.95\nEUR,0.91\n";
        let table = load_currency_table_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.rate("PLN"), Some(3.95));
        assert_eq!(table.rate("EUR"), Some(0.91));
        assert_eq!(table.rate("USDT"), Some(1.0));
    }

    #[test]
    fn test_currency_csv_rejects_bad_rate() {
        let csv = "code,rate\nPLN,0\n";
        match load_currency_table_from_reader(csv.as_bytes()) {
            Err(LoadError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected invalid record, got {:?}", other),
        }
    }
}
