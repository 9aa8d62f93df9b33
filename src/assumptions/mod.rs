//! Engine assumptions: signal rates, fee tiers, planning limits and the
//! display currency table

mod rate;
mod fees;
mod currency;
pub mod loader;

pub use rate::{
    RateModel, daily_rate, monthly_compound_rate,
    RATE_PER_SIGNAL, DAYS_PER_MONTH, MIN_SIGNALS, MAX_SIGNALS,
};
pub use fees::{FeeSchedule, FeeTier, STANDARD_FEE_RATE, MATURING_FEE_RATE};
pub use currency::{CurrencyTable, BASE_CURRENCY};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Upper bound on projection and feasibility-search length
pub const MAX_PROJECTION_MONTHS: u32 = 60;

/// Upper bound on the daily trajectory length
pub const MAX_PROJECTION_DAYS: u32 = 366;

/// Bounds that keep every engine loop finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningLimits {
    /// Longest monthly projection the engine will run
    pub max_horizon_months: u32,

    /// How far ahead the feasibility search looks
    pub feasibility_search_months: u32,

    /// Longest daily trajectory
    pub max_horizon_days: u32,
}

impl Default for PlanningLimits {
    fn default() -> Self {
        Self {
            max_horizon_months: MAX_PROJECTION_MONTHS,
            feasibility_search_months: MAX_PROJECTION_MONTHS,
            max_horizon_days: MAX_PROJECTION_DAYS,
        }
    }
}

impl PlanningLimits {
    /// Clamp a requested monthly horizon into `1..=max_horizon_months`
    pub fn clamp_horizon(&self, horizon_months: u32) -> u32 {
        horizon_months.clamp(1, self.max_horizon_months.max(1))
    }
}

/// Container for all engine assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub rates: RateModel,
    pub fees: FeeSchedule,
    pub limits: PlanningLimits,
}

impl Assumptions {
    /// Load assumptions from the default location (data/assumptions.json)
    pub fn from_json() -> Result<Self, LoadError> {
        Self::from_json_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from a specific JSON file
    pub fn from_json_path(path: &Path) -> Result<Self, LoadError> {
        loader::load_assumptions(path)
    }
}
