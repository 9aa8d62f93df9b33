//! Account and transaction records

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assumptions::{MAX_SIGNALS, MIN_SIGNALS};

/// Convert a ledger amount to the engine's float representation
///
/// Precision ends at about 15 significant digits. The same limit applies
/// when `Account`, `Deposit` or `Transaction` go through serde, since
/// amounts are serialized as floats. The CSV loader parses amounts from
/// text and stays exact.
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Opaque unique identifier of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Deposits are identified by their transaction id
pub type DepositId = TransactionId;

/// Root account state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Current balance in the base unit, never negative
    pub balance: Decimal,

    /// Daily signal count, kept within [MIN_SIGNALS, MAX_SIGNALS]
    pub signal_count: u32,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            balance: Decimal::ZERO,
            signal_count: 3,
        }
    }
}

impl Account {
    /// Create an account. Negative balances are floored at zero and the
    /// signal count is clamped to product bounds.
    pub fn new(balance: Decimal, signal_count: u32) -> Self {
        Self {
            balance: balance.max(Decimal::ZERO),
            signal_count: signal_count.clamp(MIN_SIGNALS, MAX_SIGNALS),
        }
    }

    /// Set the signal count, clamped to product bounds. Returns the value kept.
    pub fn set_signal_count(&mut self, signal_count: u32) -> u32 {
        let clamped = signal_count.clamp(MIN_SIGNALS, MAX_SIGNALS);
        if clamped != signal_count {
            log::debug!("signal count {} clamped to {}", signal_count, clamped);
        }
        self.signal_count = clamped;
        clamped
    }

    pub fn balance_f64(&self) -> f64 {
        decimal_to_f64(self.balance)
    }
}

/// A capital deposit
///
/// Immutable once recorded. Its turnover progress is derived on read by
/// [`crate::turnover::TurnoverCalculator`] and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: DepositId,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Deposit {
    pub fn new(amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: DepositId::new(),
            amount,
            date,
        }
    }

    pub fn amount_f64(&self) -> f64 {
        decimal_to_f64(self.amount)
    }
}

/// Direction of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Parse the persisted representation (`deposit` / `withdrawal`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deposit" => Some(TransactionKind::Deposit),
            "withdrawal" => Some(TransactionKind::Withdrawal),
            _ => None,
        }
    }
}

/// A balance-changing ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Transaction {
    /// Signed effect on the balance
    pub fn balance_effect(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }

    /// View as a deposit, if it is one
    pub fn as_deposit(&self) -> Option<Deposit> {
        match self.kind {
            TransactionKind::Deposit => Some(Deposit {
                id: self.id,
                amount: self.amount,
                date: self.date,
            }),
            TransactionKind::Withdrawal => None,
        }
    }
}
