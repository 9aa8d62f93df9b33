//! Portfolio-wide withdrawal fee tier
//!
//! A withdrawal in period `i` is evaluated on the date `i` months from now.
//! If any deposit has not completed turnover by then the maturing tier
//! applies, otherwise the standard tier. The whole portfolio shares one tier.

use chrono::{Months, NaiveDate};

use crate::account::Deposit;
use crate::assumptions::{Assumptions, FeeSchedule, FeeTier};
use crate::projection::FeeRateResolver;
use crate::turnover::TurnoverCalculator;

/// Calendar date of projection period `period` relative to `now`
///
/// Month arithmetic clamps to the last day of shorter months
/// (Jan 31 + 1 month = Feb 28/29).
pub fn period_date(now: NaiveDate, period: u32) -> NaiveDate {
    now.checked_add_months(Months::new(period)).unwrap_or(NaiveDate::MAX)
}

/// Resolves fee tiers from the deposit list at future dates
#[derive(Debug, Clone)]
pub struct DepositFeeResolver<'a> {
    calculator: TurnoverCalculator,
    fees: FeeSchedule,
    deposits: &'a [Deposit],
    balance: f64,
    signal_count: u32,
    now: NaiveDate,
}

impl<'a> DepositFeeResolver<'a> {
    pub fn new(
        assumptions: &Assumptions,
        deposits: &'a [Deposit],
        balance: f64,
        signal_count: u32,
        now: NaiveDate,
    ) -> Self {
        Self {
            calculator: TurnoverCalculator::new(assumptions.rates),
            fees: assumptions.fees,
            deposits,
            balance,
            signal_count,
            now,
        }
    }

    /// Date a withdrawal in `period` is evaluated on
    pub fn evaluation_date(&self, period: u32) -> NaiveDate {
        period_date(self.now, period)
    }

    /// Fee tier for a withdrawal in `period`
    pub fn tier(&self, period: u32) -> FeeTier {
        let date = self.evaluation_date(period);
        if self.calculator.any_maturing(self.deposits, self.balance, self.signal_count, date) {
            FeeTier::Maturing
        } else {
            FeeTier::Standard
        }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.fees
    }
}

impl FeeRateResolver for DepositFeeResolver<'_> {
    fn fee_rate(&self, period: u32) -> f64 {
        self.fees.rate(self.tier(period))
    }

    fn maturing_deposits(&self, period: u32) -> bool {
        self.tier(period) == FeeTier::Maturing
    }
}

/// Fee rate for a withdrawal `period_index` months from `now` under default
/// assumptions: 0.20 while any deposit is maturing, else 0.05
pub fn resolve_fee_tier(
    deposits: &[Deposit],
    balance: f64,
    signal_count: u32,
    period_index: u32,
    now: NaiveDate,
) -> f64 {
    DepositFeeResolver::new(&Assumptions::default(), deposits, balance, signal_count, now)
        .fee_rate(period_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_date_clamps_month_end() {
        assert_eq!(period_date(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(period_date(date(2024, 1, 15), 0), date(2024, 1, 15));
        assert_eq!(period_date(date(2024, 11, 15), 3), date(2025, 2, 15));
    }

    #[test]
    fn test_tier_switches_once_matured() {
        let now = date(2024, 6, 1);
        // 3 signals: 39 days to maturity, completes 2024-07-10
        let deposits = vec![Deposit::new(dec!(500), now)];

        assert_eq!(resolve_fee_tier(&deposits, 1000.0, 3, 0, now), 0.20);
        assert_eq!(resolve_fee_tier(&deposits, 1000.0, 3, 1, now), 0.20);
        assert_eq!(resolve_fee_tier(&deposits, 1000.0, 3, 2, now), 0.05);
    }

    #[test]
    fn test_one_maturing_deposit_sets_portfolio_tier() {
        let now = date(2024, 6, 1);
        let deposits = vec![
            Deposit::new(dec!(5000), date(2023, 1, 1)),
            Deposit::new(dec!(10), date(2024, 5, 30)),
        ];
        let resolver = DepositFeeResolver::new(&Assumptions::default(), &deposits, 6000.0, 3, now);

        assert_eq!(resolver.tier(0), FeeTier::Maturing);
        assert!(resolver.maturing_deposits(0));
        assert_eq!(resolver.tier(2), FeeTier::Standard);
    }

    #[test]
    fn test_no_deposits_is_standard() {
        assert_eq!(resolve_fee_tier(&[], 1000.0, 3, 0, date(2024, 6, 1)), 0.05);
    }

    #[test]
    fn test_zero_balance_keeps_maturing_tier() {
        let now = date(2024, 6, 1);
        let deposits = vec![Deposit::new(dec!(100), date(2020, 1, 1))];
        assert_eq!(resolve_fee_tier(&deposits, 0.0, 3, 12, now), 0.20);
    }
}
