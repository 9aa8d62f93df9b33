//! Earliest month a recurring withdrawal is covered by growth alone

use crate::assumptions::{RateModel, MAX_PROJECTION_MONTHS};

/// Search forward from `balance`, compounding monthly with no withdrawals,
/// for the first period whose growth covers `requested_amount`.
///
/// Periods are numbered as in [`crate::projection::ProjectionEngine`]:
/// period 0 is the starting snapshot and period `p` earns
/// `balance * (1 + r)^(p - 1) * r`. Returns `None` when no period up to and
/// including `max_months` qualifies, or when the inputs can never produce
/// growth. A non-positive request is feasible immediately (period 0).
/// Period 0 earns nothing, so a positive request is never feasible before
/// period 1.
pub fn feasible_start_period(
    rates: &RateModel,
    balance: f64,
    signal_count: u32,
    requested_amount: f64,
    max_months: u32,
) -> Option<u32> {
    if requested_amount <= 0.0 {
        return Some(0);
    }
    if !requested_amount.is_finite() {
        log::debug!("requested amount {} is not finite", requested_amount);
        return None;
    }

    let monthly_rate = rates.monthly_compound_rate(signal_count);
    if !balance.is_finite() || balance <= 0.0 || !monthly_rate.is_finite() || monthly_rate <= 0.0 {
        log::debug!(
            "no growth possible: balance {}, monthly rate {}",
            balance, monthly_rate
        );
        return None;
    }

    let mut capital = balance;
    for period in 1..=max_months {
        let growth = capital * monthly_rate;
        if growth >= requested_amount {
            return Some(period);
        }
        if !growth.is_finite() {
            break;
        }
        capital += growth;
    }

    log::debug!(
        "withdrawal {} not feasible within {} months",
        requested_amount, max_months
    );
    None
}

/// Feasibility search under the default rate model
pub fn find_feasible_start_period(
    balance: f64,
    signal_count: u32,
    requested_amount: f64,
    max_months: u32,
) -> Option<u32> {
    feasible_start_period(&RateModel::default(), balance, signal_count, requested_amount, max_months)
}

/// Feasibility search with the default 60-month bound
pub fn find_feasible_start_period_default(
    balance: f64,
    signal_count: u32,
    requested_amount: f64,
) -> Option<u32> {
    find_feasible_start_period(balance, signal_count, requested_amount, MAX_PROJECTION_MONTHS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_request_is_immediate() {
        assert_eq!(find_feasible_start_period_default(0.0, 3, 0.0), Some(0));
        assert_eq!(find_feasible_start_period_default(1000.0, 3, -50.0), Some(0));
    }

    #[test]
    fn test_covered_in_first_month() {
        // 1000 at 3 signals grows ~707.79 in the first month
        assert_eq!(find_feasible_start_period_default(1000.0, 3, 700.0), Some(1));
        assert_eq!(find_feasible_start_period_default(1000.0, 3, 710.0), Some(2));
    }

    #[test]
    fn test_compounds_into_feasibility() {
        assert_eq!(find_feasible_start_period_default(10_000.0, 3, 50_000.0), Some(5));
    }

    #[test]
    fn test_absurd_request_not_feasible() {
        assert_eq!(find_feasible_start_period_default(10_000.0, 3, 1e20), None);
        assert_eq!(find_feasible_start_period(10_000.0, 3, 50_000.0, 4), None);
        assert_eq!(find_feasible_start_period(10_000.0, 3, 50_000.0, 0), None);
    }

    #[test]
    fn test_feasible_period_is_uncapped_in_projection() {
        use crate::projection::{project_growth, FlatFeeRate, PeriodWarning};

        let start = find_feasible_start_period_default(10_000.0, 3, 50_000.0).unwrap();
        let periods = project_growth(10_000.0, 3, start, 50_000.0, start, &FlatFeeRate(0.05));
        let first = &periods[start as usize];
        assert_eq!(first.actual_withdrawal, 50_000.0);
        assert!(!first.has_warning(PeriodWarning::CappedByGrowth));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(find_feasible_start_period_default(0.0, 3, 10.0), None);
        assert_eq!(find_feasible_start_period_default(1000.0, 0, 10.0), None);
        assert_eq!(find_feasible_start_period_default(1000.0, 3, f64::INFINITY), None);
        assert_eq!(find_feasible_start_period_default(f64::NAN, 3, 10.0), None);
    }
}
