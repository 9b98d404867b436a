mod commands;
mod config;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::deal::MetricsArgs;
use commands::financing::{CompareArgs, ScheduleArgs};
use commands::locale::DefaultsArgs;
use commands::tax::TaxArgs;
use config::CliConfig;

/// Real-estate deal financing and profitability calculations
#[derive(Parser)]
#[command(
    name = "deal",
    version,
    about = "Real-estate deal financing and profitability calculations",
    long_about = "A CLI for evaluating real-estate investment deals with decimal precision. \
                  Computes SAC and PRICE amortization, holding costs, cash invested, \
                  capital-gains tax and cash-on-cash ROI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter (e.g. debug); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full deal metrics: loan, cash invested, holding costs, tax and ROI
    Metrics(MetricsArgs),
    /// Compare SAC and PRICE amortization for a loan
    Compare(CompareArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Capital-gains tax owed on a sale profit
    Tax(TaxArgs),
    /// Default interest rate and loan terms for a locale
    Defaults(DefaultsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    let config = CliConfig::load();

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    if let Err(e) = telemetry::init(level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Metrics(args) => commands::deal::run_metrics(args, &config),
        Commands::Compare(args) => commands::financing::run_compare(args, &config),
        Commands::Schedule(args) => commands::financing::run_schedule(args, &config),
        Commands::Tax(args) => commands::tax::run_tax(args, &config),
        Commands::Defaults(args) => commands::locale::run_defaults(args, &config),
        Commands::Version => {
            println!("deal {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let rendered = result.and_then(|value| output::format_output(&cli.output, &value));
    match rendered {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
