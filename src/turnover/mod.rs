//! Deposit turnover (maturation) tracking

mod calculator;
mod status;

pub use calculator::{TurnoverCalculator, turnover_status};
pub use status::{TurnoverStatus, TurnoverSummary};
