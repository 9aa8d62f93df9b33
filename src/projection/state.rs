//! Running state carried between projection periods

/// Capital state at a point in a projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current period (0 = starting snapshot)
    pub period: u32,

    /// Capital at end of the current period
    pub capital: f64,

    /// Capital at end of the previous period
    pub prior_capital: f64,

    /// Whether a withdrawal has been planned in any period so far
    pub withdrawals_started: bool,

    /// First period whose capital fell below the previous period's
    pub first_decline_period: Option<u32>,
}

impl ProjectionState {
    /// Initialize state from the starting balance
    pub fn from_balance(balance: f64) -> Self {
        let capital = if balance.is_finite() { balance.max(0.0) } else { 0.0 };
        Self {
            period: 0,
            capital,
            prior_capital: capital,
            withdrawals_started: false,
            first_decline_period: None,
        }
    }

    /// Advance to next period
    pub fn advance_period(&mut self) {
        self.period += 1;
        self.prior_capital = self.capital;
    }

    /// Close the period with its end capital
    pub fn close_period(&mut self, capital: f64) {
        self.capital = capital;

        // monitoring only, never feeds back into the projection
        if self.withdrawals_started
            && self.first_decline_period.is_none()
            && self.capital < self.prior_capital
        {
            self.first_decline_period = Some(self.period);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decline_only_after_withdrawals_start() {
        let mut state = ProjectionState::from_balance(100.0);

        state.advance_period();
        state.close_period(90.0);
        assert_eq!(state.first_decline_period, None);

        state.advance_period();
        state.withdrawals_started = true;
        state.close_period(80.0);
        assert_eq!(state.first_decline_period, Some(2));

        state.advance_period();
        state.close_period(70.0);
        assert_eq!(state.first_decline_period, Some(2));
    }

    #[test]
    fn test_invalid_balance_starts_at_zero() {
        assert_eq!(ProjectionState::from_balance(f64::NAN).capital, 0.0);
        assert_eq!(ProjectionState::from_balance(-5.0).capital, 0.0);
    }
}
