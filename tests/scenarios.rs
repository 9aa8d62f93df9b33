//! End-to-end scenarios: rates, turnover, feasibility, fee tiers and a full
//! plan built from a loaded transaction history.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use signal_ledger::account::load_transactions_from_reader;
use signal_ledger::planner::StartPolicy;
use signal_ledger::{
    daily_rate, find_feasible_start_period, find_feasible_start_period_default, monthly_compound_rate,
    resolve_fee_tier, turnover_status, Account, Deposit, Ledger, PeriodWarning, PlanIssue, PlanRequest,
    ScenarioRunner,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_three_signals_on_a_thousand() {
    let today = date(2024, 6, 1);

    assert_relative_eq!(daily_rate(3), 0.018);
    // (1.018)^30 - 1
    assert_relative_eq!(monthly_compound_rate(3), 0.7077856, epsilon = 1e-6);

    let deposit = Deposit::new(dec!(500), today);
    let status = turnover_status(&deposit, 1000.0, 3, today).unwrap();
    assert_eq!(status.days_since_deposit, 1);
    assert!(status.maturity_progress_percent > 0.0);
    assert!(status.maturity_progress_percent < 5.0);
    assert!(!status.is_matured);
}

#[test]
fn test_feasibility_search_bounds() {
    let period = find_feasible_start_period_default(10_000.0, 3, 50_000.0);
    assert!(matches!(period, Some(p) if p <= 60));

    // compounding makes even 10^12 reachable inside five years
    assert_eq!(find_feasible_start_period_default(10_000.0, 3, 1e12), Some(37));
    assert_eq!(find_feasible_start_period_default(10_000.0, 3, 1e20), None);
    assert_eq!(find_feasible_start_period(10_000.0, 3, 1e12, 36), None);
}

#[test]
fn test_fee_tier_follows_projected_maturity() {
    let now = date(2024, 6, 1);
    let matured = Deposit::new(dec!(1000), date(2023, 6, 1));
    // 39 days to double at 3 signals: matures 2024-07-09
    let fresh = Deposit::new(dec!(1000), date(2024, 5, 31));

    assert_eq!(resolve_fee_tier(&[matured], 2000.0, 3, 0, now), 0.05);
    assert_eq!(resolve_fee_tier(&[matured, fresh], 2000.0, 3, 0, now), 0.20);
    assert_eq!(resolve_fee_tier(&[matured, fresh], 2000.0, 3, 1, now), 0.20);
    assert_eq!(resolve_fee_tier(&[matured, fresh], 2000.0, 3, 2, now), 0.05);
}

#[test]
fn test_ledger_round_trip_then_plan() {
    let csv = "\
id,kind,amount,date
,deposit,8000,2024-01-10
,deposit,2500,2024-05-25
,withdrawal,500,2024-03-01
,deposit,100,
";
    let transactions = load_transactions_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(transactions.len(), 3);

    let mut ledger = Ledger::new(Account::new(dec!(10000), 3));
    let added = ledger.add_deposit(dec!(1234.56), date(2024, 6, 1)).unwrap();
    assert_eq!(ledger.account().balance, dec!(11234.56));
    ledger.remove(added.id).unwrap();
    assert_eq!(ledger.account().balance, dec!(10000));

    let deposits: Vec<Deposit> = transactions.iter().filter_map(|t| t.as_deposit()).collect();
    assert_eq!(deposits.len(), 2);

    let runner = ScenarioRunner::new();
    let now = date(2024, 6, 1);
    let request = PlanRequest::new(2_000.0, 1, 12);
    let plan = runner.plan(ledger.account(), &deposits, &request, now);

    assert!(plan.is_feasible());
    assert_eq!(plan.feasible_start_period, Some(1));
    // the 2024-05-25 deposit is still maturing on 2024-07-01
    assert_eq!(plan.fee_rate, 0.20);
    let first = &plan.projection.periods[1];
    assert!(first.has_warning(PeriodWarning::ActiveMaturingDeposits));
    assert_relative_eq!(first.fee_charged, 400.0);
    assert!(!plan.projection.periods[2].has_warning(PeriodWarning::ActiveMaturingDeposits));
    assert_relative_eq!(plan.projection.periods[2].fee_charged, 100.0);

    for period in &plan.projection.periods {
        assert!(period.actual_withdrawal <= period.growth_this_period);
    }
}

#[test]
fn test_infeasible_start_is_reported_not_projected() {
    let runner = ScenarioRunner::new();
    let account = Account::new(dec!(1000), 2);
    let now = date(2024, 6, 1);

    let rejected = runner.plan(&account, &[], &PlanRequest::new(5_000.0, 1, 24), now);
    assert!(!rejected.is_feasible());
    assert!(rejected.projection.periods.is_empty());
    assert!(matches!(
        rejected.issues.as_slice(),
        [PlanIssue::StartBeforeFeasible { requested_start: 1, .. }]
    ));

    let request = PlanRequest {
        start_policy: StartPolicy::ClampToFeasible,
        ..PlanRequest::new(5_000.0, 1, 24)
    };
    let clamped = runner.plan(&account, &[], &request, now);
    let feasible = clamped.feasible_start_period.unwrap();
    assert_eq!(clamped.start_period, feasible);
    assert_eq!(clamped.projection.periods.len(), 25);
    assert!(!clamped.projection.periods[feasible as usize].has_warning(PeriodWarning::CappedByGrowth));
}

#[test]
fn test_growth_projection_exports_csv() {
    let runner = ScenarioRunner::new();
    let account = Account::new(dec!(1000), 3);
    let snapshot = runner.dashboard(&account, &[], date(2024, 6, 1), 2);

    let mut buffer = Vec::new();
    snapshot.growth.write_csv(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "period,capital,growth,planned,actual,fee,warnings");
    assert_eq!(lines[1], "0,1000.00,0.00,0.00,0.00,0.00,");
    assert!(lines[2].starts_with("1,1707.79,707.79,"));
    assert_eq!(lines.len(), 4);
}
