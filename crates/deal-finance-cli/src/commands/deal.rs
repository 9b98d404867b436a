use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use deal_finance_core::financing::{self, AcquisitionType, FinancingInput};
use deal_finance_core::get_default_interest_rate;

use crate::config::CliConfig;
use crate::input;

/// Acquisition path, as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AcquisitionArg {
    Traditional,
    Auction,
    AuctionNoFee,
}

impl From<AcquisitionArg> for AcquisitionType {
    fn from(arg: AcquisitionArg) -> Self {
        match arg {
            AcquisitionArg::Traditional => AcquisitionType::Traditional,
            AcquisitionArg::Auction => AcquisitionType::Auction,
            AcquisitionArg::AuctionNoFee => AcquisitionType::AuctionNoFee,
        }
    }
}

/// Arguments for deal metrics
#[derive(Args)]
pub struct MetricsArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the property
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Estimated sale price at exit
    #[arg(long)]
    pub sale_price: Option<Decimal>,

    /// Holding period in months
    #[arg(long)]
    pub months: Option<u32>,

    /// One-time renovation / repair cost
    #[arg(long, default_value = "0")]
    pub estimated_costs: Decimal,

    /// Recurring holding cost per month
    #[arg(long, default_value = "0")]
    pub monthly_expenses: Decimal,

    /// Debts on the property assumed by the buyer
    #[arg(long, default_value = "0")]
    pub property_debts: Decimal,

    /// How the property is acquired
    #[arg(long, value_enum, default_value = "traditional")]
    pub acquisition: AcquisitionArg,

    /// Finance the purchase with a mortgage
    #[arg(long)]
    pub finance: bool,

    /// Down payment (with --finance)
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Nominal annual interest rate in percent (defaults to the locale rate)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub term_years: u32,

    /// Closing costs of the loan
    #[arg(long, default_value = "0")]
    pub closing_costs: Decimal,

    /// Sale of the seller's first property (capital-gains exempt)
    #[arg(long)]
    pub first_property: bool,

    /// Locale selecting tax policy and defaults (e.g. pt-BR, en-US)
    #[arg(long)]
    pub locale: Option<String>,
}

impl MetricsArgs {
    fn into_input(self, config: &CliConfig) -> Result<FinancingInput, Box<dyn std::error::Error>> {
        let purchase_price = self
            .purchase_price
            .ok_or("--purchase-price is required (or provide --input)")?;
        let sale_price = self
            .sale_price
            .ok_or("--sale-price is required (or provide --input)")?;
        let months = self.months.ok_or("--months is required (or provide --input)")?;
        let locale = config.locale_or_default(self.locale.as_deref());

        let mut deal = FinancingInput::new(purchase_price, sale_price, months)
            .with_costs(self.estimated_costs, self.monthly_expenses)
            .with_property_debts(self.property_debts)
            .with_acquisition_type(self.acquisition.into())
            .first_property(self.first_property)
            .with_locale(locale);

        if self.finance {
            let rate = self
                .rate
                .unwrap_or_else(|| get_default_interest_rate(&deal.locale));
            deal = deal
                .with_financing(self.down_payment, rate, self.term_years)
                .with_closing_costs(self.closing_costs);
        }
        Ok(deal)
    }
}

pub fn run_metrics(args: MetricsArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: FinancingInput = match input::load(args.input.as_deref())? {
        Some(deal) => deal,
        None => args.into_input(config)?,
    };
    debug!(locale = %deal.locale, use_financing = deal.use_financing, "evaluating deal");

    let result = financing::analyze_deal(&deal)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use deal_finance_core::Locale;
    use rust_decimal_macros::dec;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: MetricsArgs,
    }

    fn parse(argv: &[&str]) -> MetricsArgs {
        let full = std::iter::once("deal").chain(argv.iter().copied());
        Harness::try_parse_from(full).unwrap().args
    }

    fn config(locale: Locale) -> CliConfig {
        CliConfig {
            log_level: "warn".into(),
            default_locale: locale,
        }
    }

    #[test]
    fn test_cash_deal_from_flags() {
        let args = parse(&[
            "--purchase-price", "200000",
            "--sale-price", "300000",
            "--months", "6",
            "--estimated-costs", "30000",
            "--monthly-expenses", "500",
        ]);
        let deal = args.into_input(&config(Locale::EnUs)).unwrap();
        assert_eq!(deal.purchase_price, dec!(200000));
        assert_eq!(deal.monthly_expenses, dec!(500));
        assert!(!deal.use_financing);
        assert_eq!(deal.locale, Locale::EnUs);
    }

    #[test]
    fn test_financed_deal_takes_locale_rate() {
        let args = parse(&[
            "--purchase-price", "200000",
            "--sale-price", "300000",
            "--months", "6",
            "--finance",
            "--down-payment", "40000",
            "--acquisition", "auction-no-fee",
        ]);
        let deal = args.into_input(&config(Locale::PtBr)).unwrap();
        assert!(deal.use_financing);
        assert_eq!(deal.interest_rate, dec!(11.5));
        assert_eq!(deal.loan_term_years, 30);
        assert_eq!(deal.acquisition_type, AcquisitionType::AuctionNoFee);
        assert_eq!(deal.loan_amount(), dec!(160000));
    }

    #[test]
    fn test_missing_price_is_reported() {
        let args = parse(&["--sale-price", "300000", "--months", "6"]);
        let err = args.into_input(&config(Locale::EnUs)).unwrap_err();
        assert!(err.to_string().contains("--purchase-price"));
    }
}
