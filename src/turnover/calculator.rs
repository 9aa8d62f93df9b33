//! Per-deposit turnover maturation
//!
//! A deposit matures once the profit attributed to it equals its own amount.
//! Attributed profit compounds the daily rate on the deposit's principal, so
//! maturity is the doubling time of that principal:
//!
//! ```text
//! days_to_maturity = ceil(ln 2 / ln(1 + daily_rate))
//! attributable_profit(d) = amount * ((1 + daily_rate)^d - 1)
//! ```
//!
//! `days_to_maturity` is nudged after the closed form so that
//! `days_since >= days_to_maturity` holds exactly when
//! `(1 + daily_rate)^days_since >= 2`, keeping `is_matured`, 100% progress and
//! `attributable_profit >= amount` in agreement under float rounding.

use chrono::{Days, NaiveDate};

use super::status::{TurnoverStatus, TurnoverSummary};
use crate::account::Deposit;
use crate::assumptions::RateModel;

/// Evaluates deposit turnover against injected account state and date
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnoverCalculator {
    rates: RateModel,
}

impl TurnoverCalculator {
    pub fn new(rates: RateModel) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateModel {
        &self.rates
    }

    /// Days of compounding at `daily_rate` needed to double a principal
    pub fn doubling_days(daily_rate: f64) -> Option<u32> {
        if !daily_rate.is_finite() || daily_rate <= 0.0 {
            return None;
        }

        let growth = 1.0 + daily_rate;
        let estimate = (std::f64::consts::LN_2 / growth.ln()).ceil();
        if !estimate.is_finite() || estimate >= i32::MAX as f64 {
            return None;
        }

        let mut days = (estimate as u32).max(1);
        while growth.powi(days as i32) < 2.0 {
            days += 1;
        }
        while days > 1 && growth.powi(days as i32 - 1) >= 2.0 {
            days -= 1;
        }
        Some(days)
    }

    /// Whole days between deposit and `now`, floored at 1
    fn days_since(deposit_date: NaiveDate, now: NaiveDate) -> u32 {
        let elapsed = (now - deposit_date).num_days();
        if elapsed < 0 {
            log::debug!("deposit dated {} is after {}, treating as same-day", deposit_date, now);
        }
        elapsed.clamp(1, u32::MAX as i64) as u32
    }

    /// Turnover status of one deposit
    ///
    /// Returns `None` for deposits that cannot be evaluated (non-positive or
    /// non-finite amount). A zero balance or zero rate produces a status that
    /// can never mature rather than an error.
    pub fn status(
        &self,
        deposit: &Deposit,
        balance: f64,
        signal_count: u32,
        now: NaiveDate,
    ) -> Option<TurnoverStatus> {
        let amount = deposit.amount_f64();
        if !amount.is_finite() || amount <= 0.0 {
            log::debug!("deposit {} has amount {}, skipping", deposit.id, amount);
            return None;
        }

        let days_since = Self::days_since(deposit.date, now);
        let daily_rate = self.rates.daily_rate(signal_count);

        let days_to_maturity = if balance.is_finite() && balance > 0.0 {
            Self::doubling_days(daily_rate)
        } else {
            None
        };

        let Some(maturity_days) = days_to_maturity else {
            log::debug!(
                "deposit {} cannot mature: balance {}, daily rate {}",
                deposit.id, balance, daily_rate
            );
            return Some(TurnoverStatus {
                deposit_id: deposit.id,
                amount,
                deposit_date: deposit.date,
                days_since_deposit: days_since,
                days_to_maturity: None,
                days_remaining: None,
                maturity_progress_percent: 0.0,
                is_matured: false,
                estimated_completion_date: None,
                attributable_daily_profit: 0.0,
                attributable_profit: 0.0,
                attributable_projected_profit: 0.0,
                remaining_turnover: amount,
            });
        };

        let growth = 1.0 + daily_rate;
        let attributable_profit = finite_or_max(amount * (growth.powi(days_since.min(i32::MAX as u32) as i32) - 1.0));
        let is_matured = days_since >= maturity_days;
        let days_remaining = maturity_days.saturating_sub(days_since);

        let maturity_progress_percent =
            (100.0 * days_since as f64 / maturity_days as f64).min(100.0);

        let attributable_projected_profit = if is_matured {
            0.0
        } else {
            let at_maturity = amount * (growth.powi(maturity_days as i32) - 1.0);
            (at_maturity - attributable_profit).max(0.0)
        };

        Some(TurnoverStatus {
            deposit_id: deposit.id,
            amount,
            deposit_date: deposit.date,
            days_since_deposit: days_since,
            days_to_maturity: Some(maturity_days),
            days_remaining: Some(days_remaining),
            maturity_progress_percent,
            is_matured,
            estimated_completion_date: deposit.date.checked_add_days(Days::new(maturity_days as u64)),
            attributable_daily_profit: amount * daily_rate,
            attributable_profit,
            attributable_projected_profit,
            remaining_turnover: (amount - attributable_profit).max(0.0),
        })
    }

    /// Evaluate every deposit and split them into matured and active
    pub fn summarize(
        &self,
        deposits: &[Deposit],
        balance: f64,
        signal_count: u32,
        now: NaiveDate,
    ) -> TurnoverSummary {
        let mut summary = TurnoverSummary {
            evaluated_on: Some(now),
            ..Default::default()
        };

        for deposit in deposits {
            match self.status(deposit, balance, signal_count, now) {
                Some(status) => {
                    summary.total_deposited += status.amount;
                    summary.total_attributed_profit += status.attributable_profit;
                    if status.is_matured {
                        summary.matured.push(status);
                    } else {
                        summary.active.push(status);
                    }
                }
                None => summary.skipped += 1,
            }
        }

        summary
    }

    /// Whether any deposit is still maturing on `date`
    pub fn any_maturing(
        &self,
        deposits: &[Deposit],
        balance: f64,
        signal_count: u32,
        date: NaiveDate,
    ) -> bool {
        deposits
            .iter()
            .filter_map(|d| self.status(d, balance, signal_count, date))
            .any(|s| !s.is_matured)
    }
}

fn finite_or_max(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        log::warn!("attributable profit overflowed, capping");
        f64::MAX
    }
}

/// Turnover status under the default rate model
pub fn turnover_status(
    deposit: &Deposit,
    balance: f64,
    signal_count: u32,
    now: NaiveDate,
) -> Option<TurnoverStatus> {
    TurnoverCalculator::default().status(deposit, balance, signal_count, now)
}
