//! Balance bookkeeping for deposits and withdrawals
//!
//! Every mutation changes the balance and the transaction list together, so
//! a recorded transaction and its balance effect never drift apart.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Account, Deposit, Transaction, TransactionId, TransactionKind};
use crate::error::LedgerError;

/// Account plus its transaction history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    account: Account,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            transactions: Vec::new(),
        }
    }

    /// Rebuild a ledger from persisted state without re-applying balances
    pub fn from_parts(account: Account, transactions: Vec<Transaction>) -> Self {
        Self { account, transactions }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Deposit records in insertion order
    pub fn deposits(&self) -> Vec<Deposit> {
        self.transactions.iter().filter_map(Transaction::as_deposit).collect()
    }

    /// Sum of all deposited amounts
    pub fn total_deposited(&self) -> Decimal {
        self.sum_of(TransactionKind::Deposit)
    }

    /// Sum of all withdrawn amounts
    pub fn total_withdrawn(&self) -> Decimal {
        self.sum_of(TransactionKind::Withdrawal)
    }

    fn sum_of(&self, kind: TransactionKind) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Overwrite the balance (manual correction by the user)
    pub fn set_balance(&mut self, balance: Decimal) -> Result<(), LedgerError> {
        if balance < Decimal::ZERO {
            return Err(LedgerError::NegativeBalance(balance));
        }
        self.account.balance = balance;
        Ok(())
    }

    /// Set the daily signal count, clamped to product bounds
    pub fn set_signal_count(&mut self, signal_count: u32) -> u32 {
        self.account.set_signal_count(signal_count)
    }

    /// Record a deposit and credit the balance
    pub fn add_deposit(&mut self, amount: Decimal, date: NaiveDate) -> Result<Deposit, LedgerError> {
        let transaction = self.record(TransactionKind::Deposit, amount, date)?;
        log::debug!("deposit {} of {} on {}", transaction.id, amount, date);
        Ok(Deposit {
            id: transaction.id,
            amount: transaction.amount,
            date: transaction.date,
        })
    }

    /// Record a withdrawal and debit the balance
    pub fn add_withdrawal(&mut self, amount: Decimal, date: NaiveDate) -> Result<Transaction, LedgerError> {
        let transaction = self.record(TransactionKind::Withdrawal, amount, date)?;
        log::debug!("withdrawal {} of {} on {}", transaction.id, amount, date);
        Ok(transaction)
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        let transaction = Transaction {
            id: TransactionId::new(),
            kind,
            amount,
            date,
        };
        self.apply(transaction.balance_effect())?;
        self.transactions.push(transaction);
        Ok(transaction)
    }

    /// Delete a transaction and reverse its balance effect exactly
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::UnknownTransaction(id))?;

        let reversal = -self.transactions[index].balance_effect();
        self.apply(reversal)?;
        let removed = self.transactions.remove(index);
        log::debug!("removed {:?} {} of {}", removed.kind, removed.id, removed.amount);
        Ok(removed)
    }

    fn apply(&mut self, delta: Decimal) -> Result<(), LedgerError> {
        let updated = self.account.balance + delta;
        if updated < Decimal::ZERO {
            return Err(LedgerError::InsufficientBalance {
                needed: -delta,
                available: self.account.balance,
            });
        }
        self.account.balance = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_then_remove_deposit_restores_balance() {
        let mut ledger = Ledger::new(Account::new(dec!(1000.10), 3));
        let deposit = ledger.add_deposit(dec!(0.2), date(2024, 5, 1)).unwrap();
        assert_eq!(ledger.account().balance, dec!(1000.30));

        ledger.remove(deposit.id).unwrap();
        assert_eq!(ledger.account().balance, dec!(1000.10));
        assert!(ledger.deposits().is_empty());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut ledger = Ledger::default();
        assert_eq!(
            ledger.add_deposit(dec!(0), date(2024, 5, 1)),
            Err(LedgerError::NonPositiveAmount(dec!(0)))
        );
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_withdrawal_cannot_overdraw() {
        let mut ledger = Ledger::new(Account::new(dec!(50), 3));
        let err = ledger.add_withdrawal(dec!(60), date(2024, 5, 1)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance { needed: dec!(60), available: dec!(50) }
        );
        assert_eq!(ledger.account().balance, dec!(50));

        ledger.add_withdrawal(dec!(20), date(2024, 5, 2)).unwrap();
        assert_eq!(ledger.account().balance, dec!(30));
        assert_eq!(ledger.total_withdrawn(), dec!(20));
    }

    #[test]
    fn test_remove_deposit_after_spending_it_fails() {
        let mut ledger = Ledger::new(Account::new(dec!(0), 3));
        let deposit = ledger.add_deposit(dec!(100), date(2024, 5, 1)).unwrap();
        ledger.add_withdrawal(dec!(80), date(2024, 5, 2)).unwrap();

        assert!(matches!(
            ledger.remove(deposit.id),
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.deposits().len(), 1);
    }

    #[test]
    fn test_remove_unknown_transaction() {
        let mut ledger = Ledger::default();
        let id = TransactionId::new();
        assert_eq!(ledger.remove(id), Err(LedgerError::UnknownTransaction(id)));
    }

    #[test]
    fn test_totals() {
        let mut ledger = Ledger::new(Account::new(dec!(0), 3));
        ledger.add_deposit(dec!(100), date(2024, 1, 1)).unwrap();
        ledger.add_deposit(dec!(250.5), date(2024, 2, 1)).unwrap();
        assert_eq!(ledger.total_deposited(), dec!(350.5));
        assert!(ledger.set_balance(dec!(-1)).is_err());
    }
}
