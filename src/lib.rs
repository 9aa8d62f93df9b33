//! Signal Ledger - turnover and withdrawal projection engine for
//! signal-based compounding accounts
//!
//! This library provides:
//! - Signal-count rate model (daily and compounded monthly rates)
//! - Deposit ledger with exact add/remove bookkeeping
//! - Per-deposit turnover (maturation) tracking
//! - Monthly growth projections with growth-capped withdrawals
//! - Withdrawal feasibility search, fee-tier resolution and plans
//!
//! Every computation takes the evaluation date as an argument and returns a
//! fresh value. Nothing reads the system clock.

pub mod error;
pub mod assumptions;
pub mod account;
pub mod turnover;
pub mod projection;
pub mod planner;
pub mod scenario;

// Re-export commonly used types
pub use error::{LedgerError, LoadError};
pub use assumptions::{Assumptions, CurrencyTable, FeeSchedule, FeeTier, RateModel, daily_rate, monthly_compound_rate};
pub use account::{Account, Deposit, DepositId, Ledger, Transaction, TransactionKind};
pub use turnover::{TurnoverCalculator, TurnoverStatus, TurnoverSummary, turnover_status};
pub use projection::{PeriodProjection, PeriodWarning, ProjectionEngine, ProjectionResult, project_growth};
pub use planner::{
    PlanIssue, PlanRequest, WithdrawalPlan, WithdrawalPlanner,
    find_feasible_start_period, find_feasible_start_period_default, resolve_fee_tier,
};
pub use scenario::{DashboardSnapshot, ScenarioRunner, SignalComparison};
