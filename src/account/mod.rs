//! Account state, deposit records and ledger bookkeeping

mod data;
mod ledger;
pub mod loader;

pub use data::{
    Account, Deposit, DepositId, Transaction, TransactionId, TransactionKind, decimal_to_f64,
};
pub use ledger::Ledger;
pub use loader::{load_deposits, load_transactions, load_transactions_from_reader};
