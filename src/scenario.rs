//! Scenario runner for repeated recomputation
//!
//! Holds assumptions once, then rebuilds dashboards, plans and signal-count
//! comparisons from explicit account state and an injected date. Every call
//! returns a fresh value; nothing is cached between calls.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::account::{Account, Deposit};
use crate::assumptions::Assumptions;
use crate::error::LoadError;
use crate::planner::{DepositFeeResolver, PlanRequest, WithdrawalPlan, WithdrawalPlanner};
use crate::projection::{
    project_daily, DailyPoint, ProfitStats, ProjectionConfig, ProjectionEngine, ProjectionResult,
};
use crate::turnover::{TurnoverCalculator, TurnoverSummary};

/// Everything the dashboard shows for one account state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub evaluated_on: NaiveDate,
    pub signal_count: u32,
    pub stats: ProfitStats,
    pub turnover: TurnoverSummary,

    /// Growth-only projection over the requested horizon
    pub growth: ProjectionResult,

    /// Day-by-day balance over the same horizon, bounded by the daily limit
    pub daily: Vec<DailyPoint>,
}

/// Outcome for one signal count in a comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalComparison {
    pub signal_count: u32,
    pub stats: ProfitStats,
    pub plan: WithdrawalPlan,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let plan = runner.plan(&account, &deposits, &PlanRequest::new(500.0, 1, 12), today);
/// for row in runner.compare_signals(&account, &deposits, &request, today) {
///     println!("{} signals: {:?}", row.signal_count, row.plan.feasible_start_period);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default(),
        }
    }

    /// Create runner from the default assumptions file (data/assumptions.json)
    pub fn from_json() -> Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_json()?,
        })
    }

    /// Create runner from a JSON assumptions file
    pub fn from_json_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_json_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }

    /// Profit stats, turnover summary and growth projection as of `now`
    pub fn dashboard(
        &self,
        account: &Account,
        deposits: &[Deposit],
        now: NaiveDate,
        horizon_months: u32,
    ) -> DashboardSnapshot {
        let balance = account.balance_f64();
        let signals = account.signal_count;

        let calculator = TurnoverCalculator::new(self.base_assumptions.rates);
        let turnover = calculator.summarize(deposits, balance, signals, now);
        if turnover.skipped > 0 {
            log::warn!("{} deposits could not be evaluated", turnover.skipped);
        }

        let horizon_months = self.base_assumptions.limits.clamp_horizon(horizon_months);
        let resolver = DepositFeeResolver::new(&self.base_assumptions, deposits, balance, signals, now);
        let growth = ProjectionEngine::new(
            self.base_assumptions.clone(),
            ProjectionConfig::growth_only(horizon_months),
        )
        .project(balance, signals, &resolver);

        let days = horizon_months.saturating_mul(self.base_assumptions.rates.days_per_month);

        DashboardSnapshot {
            evaluated_on: now,
            signal_count: signals,
            stats: ProfitStats::compute(&self.base_assumptions, balance, signals, horizon_months),
            turnover,
            growth,
            daily: project_daily(&self.base_assumptions, balance, signals, days),
        }
    }

    /// Plan a recurring withdrawal
    pub fn plan(
        &self,
        account: &Account,
        deposits: &[Deposit],
        request: &PlanRequest,
        now: NaiveDate,
    ) -> WithdrawalPlan {
        WithdrawalPlanner::new(self.base_assumptions.clone()).plan(account, deposits, request, now)
    }

    /// Run the same plan for every permitted signal count
    pub fn compare_signals(
        &self,
        account: &Account,
        deposits: &[Deposit],
        request: &PlanRequest,
        now: NaiveDate,
    ) -> Vec<SignalComparison> {
        let planner = WithdrawalPlanner::new(self.base_assumptions.clone());
        let balance = account.balance_f64();

        self.base_assumptions
            .rates
            .signal_range()
            .map(|signal_count| {
                let variant = Account {
                    balance: account.balance,
                    signal_count,
                };
                SignalComparison {
                    signal_count,
                    stats: ProfitStats::compute(&self.base_assumptions, balance, signal_count, request.horizon_months),
                    plan: planner.plan(&variant, deposits, request, now),
                }
            })
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
