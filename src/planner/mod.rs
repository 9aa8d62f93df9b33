//! Withdrawal planning: feasibility search, fee-tier resolution and plans

mod feasibility;
mod fee_tier;
mod plan;

pub use feasibility::{
    feasible_start_period, find_feasible_start_period, find_feasible_start_period_default,
};
pub use fee_tier::{DepositFeeResolver, period_date, resolve_fee_tier};
pub use plan::{FeeQuote, PlanIssue, PlanRequest, StartPolicy, WithdrawalPlan, WithdrawalPlanner};
