use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use deal_finance_core::financing::{self, AmortizationSystem, MAX_LOAN_TERM_YEARS};
use deal_finance_core::{get_default_interest_rate, with_metadata, Locale};

use crate::config::CliConfig;

/// Loan terms shared by the comparison and schedule commands
#[derive(Args)]
pub struct LoanArgs {
    /// Principal borrowed
    #[arg(long)]
    pub principal: Decimal,

    /// Nominal annual interest rate in percent (defaults to the locale rate)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub term_years: u32,

    /// Locale used for the default rate
    #[arg(long)]
    pub locale: Option<String>,
}

/// Loan terms after locale defaults are applied; echoed as assumptions.
#[derive(Debug, Serialize)]
struct ResolvedLoan {
    principal: Decimal,
    annual_rate_pct: Decimal,
    term_years: u32,
    locale: Locale,
}

impl LoanArgs {
    fn resolve(self, config: &CliConfig) -> Result<ResolvedLoan, Box<dyn std::error::Error>> {
        if self.term_years > MAX_LOAN_TERM_YEARS {
            return Err(format!(
                "--term-years must be at most {MAX_LOAN_TERM_YEARS}, got {}",
                self.term_years
            )
            .into());
        }
        let locale = config.locale_or_default(self.locale.as_deref());
        let annual_rate_pct = self
            .rate
            .unwrap_or_else(|| get_default_interest_rate(&locale));
        Ok(ResolvedLoan {
            principal: self.principal,
            annual_rate_pct,
            term_years: self.term_years,
            locale,
        })
    }
}

/// Arguments for the SAC vs PRICE comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SystemArg {
    Sac,
    Price,
}

impl From<SystemArg> for AmortizationSystem {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Sac => AmortizationSystem::Sac,
            SystemArg::Price => AmortizationSystem::Price,
        }
    }
}

/// Arguments for a month-by-month schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Amortization system of the table
    #[arg(long, value_enum, default_value = "price")]
    pub system: SystemArg,
}

fn degenerate_warning(loan: &ResolvedLoan) -> Vec<String> {
    if loan.principal <= Decimal::ZERO || loan.annual_rate_pct <= Decimal::ZERO || loan.term_years == 0 {
        vec!["Principal, rate and term must all be positive; figures default to zero".to_string()]
    } else {
        Vec::new()
    }
}

pub fn run_compare(args: CompareArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let loan = args.loan.resolve(config)?;

    let comparison = financing::compare_systems(loan.principal, loan.annual_rate_pct, loan.term_years);
    let output = with_metadata(
        "SAC vs PRICE amortization comparison",
        &loan,
        degenerate_warning(&loan),
        start.elapsed().as_micros() as u64,
        comparison,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: ScheduleArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let loan = args.loan.resolve(config)?;
    let system = AmortizationSystem::from(args.system);

    let schedule = financing::build_schedule(loan.principal, loan.annual_rate_pct, loan.term_years, system);
    let methodology = match system {
        AmortizationSystem::Sac => "SAC constant-amortization schedule",
        AmortizationSystem::Price => "PRICE constant-payment schedule",
    };
    let output = with_metadata(
        methodology,
        &loan,
        degenerate_warning(&loan),
        start.elapsed().as_micros() as u64,
        schedule,
    );
    Ok(serde_json::to_value(output)?)
}
