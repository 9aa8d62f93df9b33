//! Monthly capital projection, profit statistics and daily trajectories

mod state;
mod engine;
mod cashflows;
mod stats;

pub use state::ProjectionState;
pub use engine::{
    ProjectionEngine, ProjectionConfig, FeeRateResolver, FlatFeeRate, project_growth,
};
pub use cashflows::{PeriodProjection, PeriodWarning, ProjectionResult, ProjectionSummary};
pub use stats::{ProfitStats, DailyPoint, project_daily};
