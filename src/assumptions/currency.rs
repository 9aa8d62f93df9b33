//! Display currency conversion
//!
//! All engine amounts are in the base unit. The table maps a currency code to
//! how many units of that currency one base unit buys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Base unit every engine amount is expressed in
pub const BASE_CURRENCY: &str = "USDT";

/// Injected conversion table, base unit to display currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTable {
    rates: BTreeMap<String, f64>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(BASE_CURRENCY.to_string(), 1.0);
        rates.insert("PLN".to_string(), 4.0);
        rates.insert("EUR".to_string(), 0.92);
        Self { rates }
    }
}

impl CurrencyTable {
    /// Table holding only the base unit
    pub fn base_only() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(BASE_CURRENCY.to_string(), 1.0);
        Self { rates }
    }

    /// Insert or replace a rate. Non-positive or non-finite rates are ignored.
    pub fn set_rate(&mut self, code: &str, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            log::warn!("ignoring invalid rate {} for {}", rate, code);
            return false;
        }
        self.rates.insert(code.to_ascii_uppercase(), rate);
        true
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_ascii_uppercase()).copied()
    }

    /// Convert a base-unit amount into `code`
    pub fn from_base(&self, amount: f64, code: &str) -> Option<f64> {
        self.rate(code).map(|rate| amount * rate)
    }

    /// Convert an amount in `code` back to the base unit
    pub fn to_base(&self, amount: f64, code: &str) -> Option<f64> {
        self.rate(code).map(|rate| amount / rate)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}
