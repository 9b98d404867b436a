use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use deal_finance_core::financing::compute_capital_gains_tax;
use deal_finance_core::locale::locale_defaults;
use deal_finance_core::{with_metadata, Locale};

use crate::config::CliConfig;

/// Arguments for the capital-gains tax lookup
#[derive(Args)]
pub struct TaxArgs {
    /// Pre-tax profit on the sale
    #[arg(long, allow_hyphen_values = true)]
    pub profit: Decimal,

    /// Locale whose tax regime applies
    #[arg(long)]
    pub locale: Option<String>,

    /// Sale of the seller's first property (exempt)
    #[arg(long)]
    pub first_property: bool,
}

#[derive(Debug, Serialize)]
struct TaxAssumptions {
    profit: Decimal,
    locale: Locale,
    is_first_property: bool,
}

#[derive(Debug, Serialize)]
struct TaxResult {
    capital_gains_tax: Decimal,
    net_profit: Decimal,
    effective_rate_pct: Decimal,
}

pub fn run_tax(args: TaxArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let locale = config.locale_or_default(args.locale.as_deref());

    let capital_gains_tax = compute_capital_gains_tax(args.profit, &locale, args.first_property);
    let effective_rate_pct = if args.profit > Decimal::ZERO {
        (capital_gains_tax / args.profit * Decimal::ONE_HUNDRED).round_dp(4)
    } else {
        Decimal::ZERO
    };

    let mut warnings = Vec::new();
    if !locale_defaults(&locale).models_capital_gains && !args.first_property && args.profit > Decimal::ZERO {
        warnings.push(format!(
            "Capital-gains tax is not modelled for locale {locale}; figure shown is zero"
        ));
    }

    let result = TaxResult {
        capital_gains_tax,
        net_profit: args.profit - capital_gains_tax,
        effective_rate_pct,
    };
    let assumptions = TaxAssumptions {
        profit: args.profit,
        locale,
        is_first_property: args.first_property,
    };
    let output = with_metadata(
        "Capital-gains tax on sale (progressive brackets where modelled)",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
