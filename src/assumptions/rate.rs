//! Signal-based return rates
//!
//! Each daily signal contributes a fixed simple return. The monthly rate
//! compounds that daily return over a fixed-length month.

use serde::{Deserialize, Serialize};

/// Simple daily return contributed by one signal (0.6%)
pub const RATE_PER_SIGNAL: f64 = 0.006;

/// Days in a projection month
pub const DAYS_PER_MONTH: u32 = 30;

/// Lowest signal count a user may configure
pub const MIN_SIGNALS: u32 = 2;

/// Highest signal count a user may configure
pub const MAX_SIGNALS: u32 = 5;

/// Converts a daily signal count into daily and monthly compounding rates
///
/// The model does not clamp the signal count. Keeping the count inside
/// [`MIN_SIGNALS`, `MAX_SIGNALS`] is the caller's job (see
/// [`RateModel::clamp_signals`] and [`crate::account::Account::set_signal_count`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateModel {
    /// Simple daily return per signal
    pub rate_per_signal: f64,

    /// Days compounded into one month
    pub days_per_month: u32,

    /// Product policy lower bound on signals
    pub min_signals: u32,

    /// Product policy upper bound on signals
    pub max_signals: u32,
}

impl Default for RateModel {
    fn default() -> Self {
        Self {
            rate_per_signal: RATE_PER_SIGNAL,
            days_per_month: DAYS_PER_MONTH,
            min_signals: MIN_SIGNALS,
            max_signals: MAX_SIGNALS,
        }
    }
}

impl RateModel {
    /// Daily rate: `rate_per_signal * signals`
    pub fn daily_rate(&self, signal_count: u32) -> f64 {
        self.rate_per_signal * signal_count as f64
    }

    /// Monthly rate: `(1 + daily)^days_per_month - 1`
    pub fn monthly_compound_rate(&self, signal_count: u32) -> f64 {
        (1.0 + self.daily_rate(signal_count)).powi(self.days_per_month as i32) - 1.0
    }

    /// Monthly rate without compounding (`daily * days_per_month`)
    pub fn monthly_simple_rate(&self, signal_count: u32) -> f64 {
        self.daily_rate(signal_count) * self.days_per_month as f64
    }

    /// Clamp a requested signal count into the configured bounds
    pub fn clamp_signals(&self, signal_count: u32) -> u32 {
        signal_count.clamp(self.min_signals, self.max_signals)
    }

    /// All signal counts permitted by product policy
    pub fn signal_range(&self) -> std::ops::RangeInclusive<u32> {
        self.min_signals..=self.max_signals
    }
}

/// Daily rate under the default model
pub fn daily_rate(signal_count: u32) -> f64 {
    RateModel::default().daily_rate(signal_count)
}

/// Monthly compound rate under the default model
pub fn monthly_compound_rate(signal_count: u32) -> f64 {
    RateModel::default().monthly_compound_rate(signal_count)
}
