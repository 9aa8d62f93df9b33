//! Error types for ledger bookkeeping and input loading
//!
//! Engine computations (rates, turnover, projections, planning) never fail:
//! invalid inputs produce `None` or a status marker instead. Only the ledger
//! and the loaders return `Err`.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::TransactionId;

/// Errors raised by [`crate::account::Ledger`] mutations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("balance must not be negative, got {0}")]
    NegativeBalance(Decimal),

    #[error("transaction {0} not found")]
    UnknownTransaction(TransactionId),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },
}

/// Errors raised while loading deposits, assumptions or currency tables
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}
