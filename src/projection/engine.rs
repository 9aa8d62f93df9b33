//! Monthly capital projection with an optional recurring withdrawal

use crate::assumptions::Assumptions;
use super::state::ProjectionState;
use super::cashflows::{PeriodProjection, PeriodWarning, ProjectionResult};

/// Supplies the withdrawal fee rate for each projected period
///
/// Any `Fn(u32) -> f64` closure is a resolver. Implementors that know about
/// deposit maturity also report whether deposits are still maturing, which
/// the engine records as a period warning.
pub trait FeeRateResolver {
    /// Fee rate applied to a withdrawal in `period`
    fn fee_rate(&self, period: u32) -> f64;

    /// Whether deposits are still maturing in `period`
    fn maturing_deposits(&self, _period: u32) -> bool {
        false
    }
}

impl<F> FeeRateResolver for F
where
    F: Fn(u32) -> f64,
{
    fn fee_rate(&self, period: u32) -> f64 {
        self(period)
    }
}

/// Same fee rate in every period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatFeeRate(pub f64);

impl FeeRateResolver for FlatFeeRate {
    fn fee_rate(&self, _period: u32) -> f64 {
        self.0
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Number of months to project, clamped to the assumptions' limit
    pub horizon_months: u32,

    /// Recurring monthly withdrawal (0 for pure growth)
    pub withdrawal_amount: f64,

    /// First period (months from now) in which the withdrawal is planned
    pub withdrawal_start_period: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            withdrawal_amount: 0.0,
            withdrawal_start_period: 0,
        }
    }
}

impl ProjectionConfig {
    /// Growth only, no withdrawals
    pub fn growth_only(horizon_months: u32) -> Self {
        Self {
            horizon_months,
            ..Default::default()
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Horizon actually projected after applying the limit
    pub fn effective_horizon(&self) -> u32 {
        let horizon = self.assumptions.limits.clamp_horizon(self.config.horizon_months);
        if horizon != self.config.horizon_months {
            log::warn!(
                "projection horizon {} clamped to {}",
                self.config.horizon_months, horizon
            );
        }
        horizon
    }

    /// Run the projection from `balance`
    ///
    /// The result holds `horizon + 1` rows: the period-0 snapshot and one row
    /// per month. A withdrawal never exceeds that month's growth, so
    /// principal is only reduced by fees.
    pub fn project<R: FeeRateResolver + ?Sized>(
        &self,
        balance: f64,
        signal_count: u32,
        fees: &R,
    ) -> ProjectionResult {
        let monthly_rate = self.assumptions.rates.monthly_compound_rate(signal_count);
        let withdrawal = if self.config.withdrawal_amount.is_finite() {
            self.config.withdrawal_amount.max(0.0)
        } else {
            log::warn!("non-finite withdrawal amount, projecting without withdrawals");
            0.0
        };

        let mut result = ProjectionResult::new();
        let mut state = ProjectionState::from_balance(balance);
        result.add_period(PeriodProjection::snapshot(state.capital));

        for _period in 1..=self.effective_horizon() {
            // Advance state to next month
            state.advance_period();

            let row = self.calculate_period(&mut state, monthly_rate, withdrawal, fees);
            result.add_period(row);
        }

        result.first_decline_period = state.first_decline_period;
        result
    }

    /// Calculate flows for a single month
    fn calculate_period<R: FeeRateResolver + ?Sized>(
        &self,
        state: &mut ProjectionState,
        monthly_rate: f64,
        withdrawal: f64,
        fees: &R,
    ) -> PeriodProjection {
        let period = state.period;
        let mut row = PeriodProjection::snapshot(state.capital);
        row.period_index = period;

        let growth = saturate(state.capital * monthly_rate, period, "growth");
        row.growth_this_period = growth;

        row.planned_withdrawal = if period >= self.config.withdrawal_start_period {
            withdrawal
        } else {
            0.0
        };
        if row.planned_withdrawal > 0.0 {
            state.withdrawals_started = true;
        }

        row.actual_withdrawal = row.planned_withdrawal.min(growth.max(0.0));
        if row.actual_withdrawal < row.planned_withdrawal {
            row.warnings.insert(PeriodWarning::CappedByGrowth);
        }

        let fee_rate = fees.fee_rate(period);
        let fee_rate = if fee_rate.is_finite() { fee_rate.max(0.0) } else { 0.0 };
        row.fee_charged = saturate(row.actual_withdrawal * fee_rate, period, "fee");

        if row.actual_withdrawal > 0.0 && fees.maturing_deposits(period) {
            row.warnings.insert(PeriodWarning::ActiveMaturingDeposits);
        }

        row.capital_after = saturate(
            state.capital + growth - row.actual_withdrawal - row.fee_charged,
            period,
            "capital",
        );
        state.close_period(row.capital_after);

        row
    }
}

/// Cap an overflowing period value at `f64::MAX`
fn saturate(value: f64, period: u32, what: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        log::warn!("period {} {} overflowed, capping", period, what);
        f64::MAX
    }
}

/// Project growth under default assumptions
pub fn project_growth<R: FeeRateResolver + ?Sized>(
    balance: f64,
    signal_count: u32,
    horizon_months: u32,
    withdrawal_amount: f64,
    withdrawal_start_period: u32,
    fee_rate_resolver: &R,
) -> Vec<PeriodProjection> {
    let config = ProjectionConfig {
        horizon_months,
        withdrawal_amount,
        withdrawal_start_period,
    };
    ProjectionEngine::new(Assumptions::default(), config)
        .project(balance, signal_count, fee_rate_resolver)
        .periods
}
