//! Headline profit figures and the day-by-day balance trajectory

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use super::engine::{FlatFeeRate, ProjectionConfig, ProjectionEngine};

/// Profit figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitStats {
    pub daily_rate: f64,
    pub monthly_compound_rate: f64,

    /// `balance * daily_rate`
    pub daily_profit: f64,

    /// `balance * monthly_compound_rate`
    pub monthly_profit: f64,

    /// `daily_profit * days_per_month`, without compounding
    pub monthly_simple_profit: f64,

    /// Months covered by `total_projected_growth`
    pub horizon_months: u32,

    /// Growth accumulated over a growth-only projection of `horizon_months`
    pub total_projected_growth: f64,
}

impl ProfitStats {
    pub fn compute(assumptions: &Assumptions, balance: f64, signal_count: u32, horizon_months: u32) -> Self {
        let rates = &assumptions.rates;
        let balance = if balance.is_finite() { balance.max(0.0) } else { 0.0 };
        let daily_rate = rates.daily_rate(signal_count);
        let monthly_compound_rate = rates.monthly_compound_rate(signal_count);
        let daily_profit = capped(balance * daily_rate);

        let horizon_months = assumptions.limits.clamp_horizon(horizon_months);
        let summary = ProjectionEngine::new(assumptions.clone(), ProjectionConfig::growth_only(horizon_months))
            .project(balance, signal_count, &FlatFeeRate(0.0))
            .summary();

        Self {
            daily_rate,
            monthly_compound_rate,
            daily_profit,
            monthly_profit: capped(balance * monthly_compound_rate),
            monthly_simple_profit: capped(daily_profit * rates.days_per_month as f64),
            horizon_months,
            total_projected_growth: summary.total_growth,
        }
    }
}

fn capped(value: f64) -> f64 {
    if value.is_finite() { value } else { f64::MAX }
}

/// Balance at the end of a projected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub day: u32,
    pub balance: f64,
    pub profit: f64,
}

/// Daily compounding trajectory starting with a day-0 point
pub fn project_daily(assumptions: &Assumptions, balance: f64, signal_count: u32, days: u32) -> Vec<DailyPoint> {
    let days = days.min(assumptions.limits.max_horizon_days);
    let daily_rate = assumptions.rates.daily_rate(signal_count);
    let mut balance = if balance.is_finite() { balance.max(0.0) } else { 0.0 };

    let mut points = Vec::with_capacity(days as usize + 1);
    points.push(DailyPoint { day: 0, balance, profit: 0.0 });

    for day in 1..=days {
        let profit = capped(balance * daily_rate);
        balance = capped(balance + profit);
        points.push(DailyPoint { day, balance, profit });
    }

    points
}
