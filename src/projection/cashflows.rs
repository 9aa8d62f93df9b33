//! Projection output structures

use std::collections::BTreeSet;
use std::io::Write;

use serde::{Deserialize, Serialize};

/// Annotation on a projected period
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PeriodWarning {
    /// Planned withdrawal exceeded the period's growth and was capped
    CappedByGrowth,
    /// A withdrawal was taken while deposits were still maturing
    ActiveMaturingDeposits,
}

impl PeriodWarning {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodWarning::CappedByGrowth => "capped_by_growth",
            PeriodWarning::ActiveMaturingDeposits => "active_maturing_deposits",
        }
    }
}

/// A single projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodProjection {
    pub period_index: u32,
    pub capital_after: f64,
    pub growth_this_period: f64,
    pub planned_withdrawal: f64,
    pub actual_withdrawal: f64,
    pub fee_charged: f64,
    pub warnings: BTreeSet<PeriodWarning>,
}

impl PeriodProjection {
    /// Period-0 snapshot: starting capital, no flows
    pub fn snapshot(capital: f64) -> Self {
        Self {
            period_index: 0,
            capital_after: capital,
            growth_this_period: 0.0,
            planned_withdrawal: 0.0,
            actual_withdrawal: 0.0,
            fee_charged: 0.0,
            warnings: BTreeSet::new(),
        }
    }

    pub fn has_warning(&self, warning: PeriodWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Complete projection run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Period 0 snapshot followed by one row per projected month
    pub periods: Vec<PeriodProjection>,

    /// First period, once withdrawals began, whose capital fell below the
    /// previous period's
    pub first_decline_period: Option<u32>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a period row
    pub fn add_period(&mut self, period: PeriodProjection) {
        self.periods.push(period);
    }

    /// Number of projected months, excluding the snapshot
    pub fn horizon_months(&self) -> u32 {
        self.periods.len().saturating_sub(1) as u32
    }

    pub fn final_capital(&self) -> f64 {
        self.periods.last().map(|p| p.capital_after).unwrap_or(0.0)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let starting_capital = self.periods.first().map(|p| p.capital_after).unwrap_or(0.0);
        let total_growth = self.total_of(|p| p.growth_this_period);
        let total_planned = self.total_of(|p| p.planned_withdrawal);
        let total_withdrawn = self.total_of(|p| p.actual_withdrawal);
        let total_fees = self.total_of(|p| p.fee_charged);
        let capped_periods = self
            .periods
            .iter()
            .filter(|p| p.has_warning(PeriodWarning::CappedByGrowth))
            .count() as u32;

        ProjectionSummary {
            total_months: self.horizon_months(),
            starting_capital,
            final_capital: self.final_capital(),
            total_growth,
            total_planned,
            total_withdrawn,
            total_fees,
            capped_periods,
            first_decline_period: self.first_decline_period,
        }
    }

    /// Sum of a per-period value, capped at `f64::MAX`
    fn total_of(&self, value: impl Fn(&PeriodProjection) -> f64) -> f64 {
        let total: f64 = self.periods.iter().map(value).sum();
        if total.is_finite() { total } else { f64::MAX }
    }

    /// Write the periods as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "period", "capital", "growth", "planned", "actual", "fee", "warnings",
        ])?;

        for p in &self.periods {
            let warnings: Vec<&str> = p.warnings.iter().map(PeriodWarning::as_str).collect();
            csv_writer.write_record([
                p.period_index.to_string(),
                format!("{:.2}", p.capital_after),
                format!("{:.2}", p.growth_this_period),
                format!("{:.2}", p.planned_withdrawal),
                format!("{:.2}", p.actual_withdrawal),
                format!("{:.2}", p.fee_charged),
                warnings.join(";"),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub starting_capital: f64,
    pub final_capital: f64,
    pub total_growth: f64,
    pub total_planned: f64,
    pub total_withdrawn: f64,
    pub total_fees: f64,
    pub capped_periods: u32,
    pub first_decline_period: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_output() {
        let mut result = ProjectionResult::new();
        result.add_period(PeriodProjection::snapshot(1000.0));
        let mut row = PeriodProjection::snapshot(1500.0);
        row.period_index = 1;
        row.growth_this_period = 700.0;
        row.planned_withdrawal = 900.0;
        row.actual_withdrawal = 700.0;
        row.fee_charged = 35.0;
        row.warnings.insert(PeriodWarning::CappedByGrowth);
        result.add_period(row);

        let mut buffer = Vec::new();
        result.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "period,capital,growth,planned,actual,fee,warnings");
        assert_eq!(lines[1], "0,1000.00,0.00,0.00,0.00,0.00,");
        assert_eq!(lines[2], "1,1500.00,700.00,900.00,700.00,35.00,capped_by_growth");
    }

    #[test]
    fn test_summary() {
        let mut result = ProjectionResult::new();
        result.add_period(PeriodProjection::snapshot(100.0));
        let mut row = PeriodProjection::snapshot(150.0);
        row.period_index = 1;
        row.growth_this_period = 50.0;
        result.add_period(row);

        let summary = result.summary();
        assert_eq!(summary.total_months, 1);
        assert_eq!(summary.starting_capital, 100.0);
        assert_eq!(summary.final_capital, 150.0);
        assert_eq!(summary.total_growth, 50.0);
        assert_eq!(summary.capped_periods, 0);
    }
}
