//! Withdrawal plans: feasibility, fee quote and the annotated projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::feasibility::feasible_start_period;
use super::fee_tier::DepositFeeResolver;
use crate::account::{Account, Deposit};
use crate::assumptions::{Assumptions, FeeTier};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// What to do when the requested start period precedes the feasible one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartPolicy {
    /// Report the plan as infeasible and skip the projection
    #[default]
    Reject,
    /// Move the start up to the feasible period and project
    ClampToFeasible,
}

/// Parameters of a recurring withdrawal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub monthly_withdrawal: f64,
    pub start_period: u32,
    pub horizon_months: u32,
    #[serde(default)]
    pub start_policy: StartPolicy,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            monthly_withdrawal: 0.0,
            start_period: 1,
            horizon_months: 12,
            start_policy: StartPolicy::Reject,
        }
    }
}

impl PlanRequest {
    pub fn new(monthly_withdrawal: f64, start_period: u32, horizon_months: u32) -> Self {
        Self {
            monthly_withdrawal,
            start_period,
            horizon_months,
            start_policy: StartPolicy::Reject,
        }
    }

    pub fn clamped(mut self) -> Self {
        self.start_policy = StartPolicy::ClampToFeasible;
        self
    }
}

/// Plan-level warnings attached to a [`WithdrawalPlan`]
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanIssue {
    #[error("withdrawal of {amount:.2} is not reachable within {search_months} months")]
    NotFeasibleWithinHorizon { amount: f64, search_months: u32 },

    #[error("start period {requested_start} is before the earliest feasible period {feasible_start}")]
    StartBeforeFeasible { requested_start: u32, feasible_start: u32 },

    #[error("start period moved from {requested_start} to {feasible_start}")]
    StartClamped { requested_start: u32, feasible_start: u32 },

    #[error("horizon of {requested} months clamped to {applied}")]
    HorizonClamped { requested: u32, applied: u32 },
}

impl PlanIssue {
    /// Whether the issue prevented a projection from being produced
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            PlanIssue::NotFeasibleWithinHorizon { .. } | PlanIssue::StartBeforeFeasible { .. }
        )
    }
}

/// Fee applicable to the first planned withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub tier: FeeTier,
    pub rate: f64,
    pub amount: f64,
    pub evaluated_on: NaiveDate,
}

/// Result of planning a recurring withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalPlan {
    pub monthly_withdrawal_amount: f64,
    pub requested_start_period: u32,

    /// Start period actually projected (differs from the request only when clamped)
    pub start_period: u32,
    pub horizon_months: u32,

    /// Fee rate at `start_period`
    pub fee_rate: f64,
    pub fee_quote: Option<FeeQuote>,

    /// Earliest period whose growth covers the withdrawal, if any
    pub feasible_start_period: Option<u32>,

    /// Empty when a blocking issue is present
    pub projection: ProjectionResult,
    pub first_decline_period: Option<u32>,
    pub issues: Vec<PlanIssue>,
}

impl WithdrawalPlan {
    /// Whether the plan can run as requested (possibly after clamping)
    pub fn is_feasible(&self) -> bool {
        !self.issues.iter().any(PlanIssue::is_blocking)
    }

    pub fn has_projection(&self) -> bool {
        !self.projection.periods.is_empty()
    }
}

/// Builds withdrawal plans against an account and its deposits
#[derive(Debug, Clone, Default)]
pub struct WithdrawalPlanner {
    assumptions: Assumptions,
}

impl WithdrawalPlanner {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Plan `request` for `account` as of `now`
    ///
    /// Infeasible requests come back with a blocking [`PlanIssue`] and an
    /// empty projection. The projection is never built with a start period
    /// earlier than the feasible one.
    pub fn plan(
        &self,
        account: &Account,
        deposits: &[Deposit],
        request: &PlanRequest,
        now: NaiveDate,
    ) -> WithdrawalPlan {
        let balance = account.balance_f64();
        let signals = account.signal_count;
        let amount = if request.monthly_withdrawal.is_finite() {
            request.monthly_withdrawal.max(0.0)
        } else {
            0.0
        };

        let mut issues = Vec::new();
        let horizon = self.assumptions.limits.clamp_horizon(request.horizon_months);
        if horizon != request.horizon_months {
            issues.push(PlanIssue::HorizonClamped {
                requested: request.horizon_months,
                applied: horizon,
            });
        }

        let search_months = self.assumptions.limits.feasibility_search_months;
        let feasible = feasible_start_period(&self.assumptions.rates, balance, signals, amount, search_months);
        let resolver = DepositFeeResolver::new(&self.assumptions, deposits, balance, signals, now);

        let mut plan = WithdrawalPlan {
            monthly_withdrawal_amount: amount,
            requested_start_period: request.start_period,
            start_period: request.start_period,
            horizon_months: horizon,
            fee_rate: resolver.schedule().rate(resolver.tier(request.start_period)),
            fee_quote: None,
            feasible_start_period: feasible,
            projection: ProjectionResult::new(),
            first_decline_period: None,
            issues: Vec::new(),
        };

        let Some(feasible_start) = feasible else {
            log::info!("withdrawal {} not feasible within {} months", amount, search_months);
            issues.push(PlanIssue::NotFeasibleWithinHorizon { amount, search_months });
            plan.issues = issues;
            return plan;
        };

        if request.start_period < feasible_start {
            match request.start_policy {
                StartPolicy::Reject => {
                    log::info!(
                        "start period {} precedes feasible period {}",
                        request.start_period, feasible_start
                    );
                    issues.push(PlanIssue::StartBeforeFeasible {
                        requested_start: request.start_period,
                        feasible_start,
                    });
                    plan.issues = issues;
                    return plan;
                }
                StartPolicy::ClampToFeasible => {
                    log::debug!("start period {} clamped to {}", request.start_period, feasible_start);
                    issues.push(PlanIssue::StartClamped {
                        requested_start: request.start_period,
                        feasible_start,
                    });
                    plan.start_period = feasible_start;
                }
            }
        }

        let config = ProjectionConfig {
            horizon_months: horizon,
            withdrawal_amount: amount,
            withdrawal_start_period: plan.start_period,
        };
        let projection = ProjectionEngine::new(self.assumptions.clone(), config)
            .project(balance, signals, &resolver);

        let tier = resolver.tier(plan.start_period);
        plan.fee_rate = resolver.schedule().rate(tier);
        plan.fee_quote = Some(FeeQuote {
            tier,
            rate: plan.fee_rate,
            amount: resolver.schedule().fee(tier, amount),
            evaluated_on: resolver.evaluation_date(plan.start_period),
        });
        plan.first_decline_period = projection.first_decline_period;
        plan.projection = projection;
        plan.issues = issues;
        plan
    }
}
