//! Withdrawal fee tiers

use serde::{Deserialize, Serialize};

/// Fee charged once every deposit has completed its turnover
pub const STANDARD_FEE_RATE: f64 = 0.05;

/// Fee charged while any deposit is still maturing
pub const MATURING_FEE_RATE: f64 = 0.20;

/// Which fee tier applies to a withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeTier {
    /// Whole portfolio has completed turnover
    Standard,
    /// At least one deposit is still maturing
    Maturing,
}

/// Fee rates per tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub standard_rate: f64,
    pub maturing_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            standard_rate: STANDARD_FEE_RATE,
            maturing_rate: MATURING_FEE_RATE,
        }
    }
}

impl FeeSchedule {
    /// Rate charged for the given tier
    pub fn rate(&self, tier: FeeTier) -> f64 {
        match tier {
            FeeTier::Standard => self.standard_rate,
            FeeTier::Maturing => self.maturing_rate,
        }
    }

    /// Fee on a withdrawal amount; non-positive amounts carry no fee
    pub fn fee(&self, tier: FeeTier, amount: f64) -> f64 {
        if amount <= 0.0 {
            0.0
        } else {
            amount * self.rate(tier)
        }
    }
}
