//! Derived turnover status records
//!
//! These are recomputed on every evaluation and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::account::DepositId;

/// Turnover state of a single deposit at an evaluation date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverStatus {
    pub deposit_id: DepositId,
    pub amount: f64,
    pub deposit_date: NaiveDate,

    /// Whole days since the deposit, floored at 1
    pub days_since_deposit: u32,

    /// Days of compounding needed to double the deposit.
    /// `None` when the deposit can never mature (zero balance or zero rate).
    pub days_to_maturity: Option<u32>,

    /// Days still to go, `Some(0)` once matured
    pub days_remaining: Option<u32>,

    /// Progress in [0, 100]
    pub maturity_progress_percent: f64,

    pub is_matured: bool,

    pub estimated_completion_date: Option<NaiveDate>,

    /// The deposit's share of the portfolio's daily profit
    pub attributable_daily_profit: f64,

    /// Cumulative profit attributed to the deposit so far
    pub attributable_profit: f64,

    /// Profit still expected before maturity, zero once matured
    pub attributable_projected_profit: f64,

    /// Turnover still required, `amount - attributable_profit` floored at 0
    pub remaining_turnover: f64,
}

impl TurnoverStatus {
    /// Whether the deposit can ever complete turnover under current inputs
    pub fn can_mature(&self) -> bool {
        self.days_to_maturity.is_some()
    }
}

/// Portfolio-wide turnover roll-up at an evaluation date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnoverSummary {
    pub evaluated_on: Option<NaiveDate>,

    /// Sum of all evaluated deposit amounts
    pub total_deposited: f64,

    /// Sum of attributable profit across evaluated deposits
    pub total_attributed_profit: f64,

    /// Deposits that have completed turnover
    pub matured: Vec<TurnoverStatus>,

    /// Deposits still maturing
    pub active: Vec<TurnoverStatus>,

    /// Deposits that could not be evaluated (non-positive amount)
    pub skipped: usize,
}

impl TurnoverSummary {
    pub fn has_active_deposits(&self) -> bool {
        !self.active.is_empty()
    }

    /// Latest estimated completion among active deposits. `None` if nothing
    /// is active or some active deposit can never mature.
    pub fn fully_matured_on(&self) -> Option<NaiveDate> {
        if self.active.iter().any(|s| !s.can_mature()) {
            return None;
        }
        self.active.iter().filter_map(|s| s.estimated_completion_date).max()
    }
}
