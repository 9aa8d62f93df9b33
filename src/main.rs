//! Signal Ledger CLI
//!
//! Prints the dashboard for an account and, when a withdrawal is given, the
//! withdrawal plan. Amounts are converted to the display currency on output.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;

use signal_ledger::account::{load_transactions, Account, Ledger};
use signal_ledger::assumptions::loader::{load_currency_table, DEFAULT_ASSUMPTIONS_PATH, DEFAULT_CURRENCY_PATH};
use signal_ledger::assumptions::CurrencyTable;
use signal_ledger::planner::{PlanRequest, StartPolicy};
use signal_ledger::{ProjectionResult, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "signal-ledger", about = "Turnover status, growth projection and withdrawal planning.")]
struct Args {
    /// Current balance in USDT; defaults to deposits minus withdrawals from --deposits
    #[arg(short, long)]
    balance: Option<Decimal>,

    /// Daily signal count (clamped to 2..=5)
    #[arg(short, long, default_value_t = 3)]
    signals: u32,

    /// Transaction history CSV (id,kind,amount,date)
    #[arg(short, long)]
    deposits: Option<PathBuf>,

    /// Recurring monthly withdrawal in USDT (0 for growth only)
    #[arg(short, long, default_value_t = 0.0)]
    withdrawal: f64,

    /// First period of the withdrawal
    #[arg(long, default_value_t = 1)]
    start: u32,

    /// Projection horizon in months
    #[arg(long, default_value_t = 12)]
    horizon: u32,

    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Display currency code
    #[arg(short, long, default_value = "USDT")]
    currency: String,

    /// Currency table CSV (code,rate); defaults to data/currency_rates.csv if present
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Assumptions JSON; defaults to data/assumptions.json if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the projection to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Move the start up to the earliest feasible period instead of rejecting
    #[arg(long)]
    clamp: bool,

    /// Also compare every permitted signal count
    #[arg(long)]
    compare: bool,
}

/// Formats base-unit amounts in the display currency
struct Money<'a> {
    table: &'a CurrencyTable,
    code: &'a str,
}

impl Money<'_> {
    fn amount(&self, value: f64) -> String {
        let converted = self.table.from_base(value, self.code).unwrap_or(value);
        format!("{:.2} {}", converted, self.code)
    }
}

fn print_projection(result: &ProjectionResult, display: &Money) {
    println!(
        "{:>6} {:>20} {:>18} {:>18} {:>18} {:>14}  {}",
        "Period", "Capital", "Growth", "Planned", "Actual", "Fee", "Warnings"
    );
    println!("{}", "-".repeat(110));
    for row in &result.periods {
        let warnings: Vec<&str> = row.warnings.iter().map(|w| w.as_str()).collect();
        println!(
            "{:>6} {:>20} {:>18} {:>18} {:>18} {:>14}  {}",
            row.period_index,
            display.amount(row.capital_after),
            display.amount(row.growth_this_period),
            display.amount(row.planned_withdrawal),
            display.amount(row.actual_withdrawal),
            display.amount(row.fee_charged),
            warnings.join(";"),
        );
    }
}

fn write_projection(result: &ProjectionResult, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    result
        .write_csv(file)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("\nProjection written to: {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.config {
        Some(path) => ScenarioRunner::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None if Path::new(DEFAULT_ASSUMPTIONS_PATH).exists() => ScenarioRunner::from_json()
            .with_context(|| format!("loading assumptions from {}", DEFAULT_ASSUMPTIONS_PATH))?,
        None => ScenarioRunner::new(),
    };

    let table = match &args.rates {
        Some(path) => load_currency_table(path)
            .with_context(|| format!("loading currency table from {}", path.display()))?,
        None if Path::new(DEFAULT_CURRENCY_PATH).exists() => load_currency_table(DEFAULT_CURRENCY_PATH)
            .with_context(|| format!("loading currency table from {}", DEFAULT_CURRENCY_PATH))?,
        None => CurrencyTable::default(),
    };
    if table.rate(&args.currency).is_none() {
        return Err(anyhow!("unknown display currency '{}'", args.currency));
    }
    let display = Money {
        table: &table,
        code: &args.currency,
    };

    let transactions = match &args.deposits {
        Some(path) => load_transactions(path)
            .with_context(|| format!("loading transactions from {}", path.display()))?,
        None => Vec::new(),
    };

    let history = Ledger::from_parts(Account::default(), transactions);
    let balance = match args.balance {
        Some(balance) => balance,
        None => (history.total_deposited() - history.total_withdrawn()).max(Decimal::ZERO),
    };
    let account = Account::new(balance, args.signals);
    if account.signal_count != args.signals {
        log::warn!("signal count {} clamped to {}", args.signals, account.signal_count);
    }
    let deposits = history.deposits();
    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    println!("Signal Ledger v{}", env!("CARGO_PKG_VERSION"));
    println!("====================\n");

    let snapshot = runner.dashboard(&account, &deposits, today, args.horizon);
    let stats = &snapshot.stats;
    println!("Account as of {}", today);
    println!("  Balance:        {}", display.amount(account.balance_f64()));
    println!("  Signals:        {}", account.signal_count);
    println!("  Daily rate:     {:.2}%", stats.daily_rate * 100.0);
    println!("  Monthly rate:   {:.2}%", stats.monthly_compound_rate * 100.0);
    println!("  Daily profit:   {}", display.amount(stats.daily_profit));
    println!("  Monthly profit: {} (simple {})", display.amount(stats.monthly_profit), display.amount(stats.monthly_simple_profit));
    if let Some(last) = snapshot.daily.last() {
        println!("  After {} days:  {}", last.day, display.amount(last.balance));
    }
    println!();

    let turnover = &snapshot.turnover;
    println!("Turnover ({} deposits, {} matured)", turnover.active.len() + turnover.matured.len(), turnover.matured.len());
    for status in &turnover.active {
        let completion = status
            .estimated_completion_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "  {} {:>16}  {:>6.2}%  remaining {}  completes {}",
            status.deposit_date,
            display.amount(status.amount),
            status.maturity_progress_percent,
            display.amount(status.remaining_turnover),
            completion,
        );
    }
    println!();

    let projection = if args.withdrawal > 0.0 {
        let request = PlanRequest {
            monthly_withdrawal: args.withdrawal,
            start_period: args.start,
            horizon_months: args.horizon,
            start_policy: if args.clamp { StartPolicy::ClampToFeasible } else { StartPolicy::Reject },
        };
        let plan = runner.plan(&account, &deposits, &request, today);

        println!("Withdrawal plan: {} per month from period {}", display.amount(plan.monthly_withdrawal_amount), plan.start_period);
        match plan.feasible_start_period {
            Some(period) => println!("  Earliest feasible period: {}", period),
            None => println!("  Not achievable within the search horizon"),
        }
        if let Some(quote) = &plan.fee_quote {
            println!(
                "  Fee on first withdrawal: {:.0}% ({}) on {}",
                quote.rate * 100.0,
                display.amount(quote.amount),
                quote.evaluated_on
            );
        }
        if let Some(period) = plan.first_decline_period {
            println!("  Capital starts declining in period {}", period);
        }
        for issue in &plan.issues {
            println!("  ! {}", issue);
        }
        println!();

        if args.compare {
            println!("{:>7} {:>12} {:>18} {:>10}", "Signals", "Monthly %", "Monthly profit", "Feasible");
            for row in runner.compare_signals(&account, &deposits, &request, today) {
                let feasible = row
                    .plan
                    .feasible_start_period
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>7} {:>11.2}% {:>18} {:>10}",
                    row.signal_count,
                    row.stats.monthly_compound_rate * 100.0,
                    display.amount(row.stats.monthly_profit),
                    feasible,
                );
            }
            println!();
        }

        plan.projection
    } else {
        snapshot.growth
    };

    if projection.periods.is_empty() {
        println!("No projection produced.");
        return Ok(());
    }

    print_projection(&projection, &display);
    let summary = projection.summary();
    println!("\nSummary:");
    println!("  Months:          {}", summary.total_months);
    println!("  Final capital:   {}", display.amount(summary.final_capital));
    println!("  Total growth:    {}", display.amount(summary.total_growth));
    println!("  Total withdrawn: {}", display.amount(summary.total_withdrawn));
    println!("  Total fees:      {}", display.amount(summary.total_fees));

    if let Some(path) = &args.output {
        write_projection(&projection, path)?;
    }

    Ok(())
}
