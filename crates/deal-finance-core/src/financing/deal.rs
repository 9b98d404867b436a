use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::amortization::{compare_systems, compute_fixed_payment, MAX_LOAN_TERM_YEARS};
use super::cash_flow::{aggregate_cash_flows, AcquisitionType};
use super::tax::compute_returns;
use crate::error::DealFinanceError;
use crate::locale::{locale_defaults, Locale};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::DealFinanceResult;

/// Longest holding horizon accepted at the boundary, in months.
pub const MAX_HOLDING_MONTHS: u32 = 120;

fn default_loan_term_years() -> u32 {
    30
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Investment assumptions for one deal evaluation.
///
/// Every optional field has a serde default, so a deserialized record is
/// always fully populated before anything is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingInput {
    pub purchase_price: Money,
    /// One-time renovation / repair cost
    #[serde(default)]
    pub estimated_costs: Money,
    /// Recurring holding cost per month (HOA, property tax, insurance)
    #[serde(default)]
    pub monthly_expenses: Money,
    /// Encumbrances assumed by the buyer
    #[serde(default)]
    pub property_debts: Money,
    pub estimated_sale_price: Money,
    /// Holding horizon in months
    pub estimated_time_months: u32,
    #[serde(default)]
    pub acquisition_type: AcquisitionType,
    #[serde(default)]
    pub use_financing: bool,
    #[serde(default)]
    pub down_payment: Money,
    /// Nominal annual rate as a percentage (7.5 = 7.5%)
    #[serde(default)]
    pub interest_rate: Percent,
    #[serde(default = "default_loan_term_years")]
    pub loan_term_years: u32,
    #[serde(default)]
    pub closing_costs: Money,
    /// First-property sales are exempt from capital-gains tax
    #[serde(default)]
    pub is_first_property: bool,
    #[serde(default)]
    pub locale: Locale,
}

impl FinancingInput {
    /// A cash, traditional, en-US deal with no extra costs.
    pub fn new(purchase_price: Money, estimated_sale_price: Money, estimated_time_months: u32) -> Self {
        Self {
            purchase_price,
            estimated_costs: Decimal::ZERO,
            monthly_expenses: Decimal::ZERO,
            property_debts: Decimal::ZERO,
            estimated_sale_price,
            estimated_time_months,
            acquisition_type: AcquisitionType::default(),
            use_financing: false,
            down_payment: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            loan_term_years: default_loan_term_years(),
            closing_costs: Decimal::ZERO,
            is_first_property: false,
            locale: Locale::default(),
        }
    }

    pub fn with_costs(mut self, estimated_costs: Money, monthly_expenses: Money) -> Self {
        self.estimated_costs = estimated_costs;
        self.monthly_expenses = monthly_expenses;
        self
    }

    pub fn with_property_debts(mut self, property_debts: Money) -> Self {
        self.property_debts = property_debts;
        self
    }

    /// Turn on financing with the given loan terms.
    pub fn with_financing(mut self, down_payment: Money, interest_rate: Percent, loan_term_years: u32) -> Self {
        self.use_financing = true;
        self.down_payment = down_payment;
        self.interest_rate = interest_rate;
        self.loan_term_years = loan_term_years;
        self
    }

    pub fn with_closing_costs(mut self, closing_costs: Money) -> Self {
        self.closing_costs = closing_costs;
        self
    }

    pub fn with_acquisition_type(mut self, acquisition_type: AcquisitionType) -> Self {
        self.acquisition_type = acquisition_type;
        self
    }

    pub fn first_property(mut self, is_first_property: bool) -> Self {
        self.is_first_property = is_first_property;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Principal borrowed: what the down payment leaves of the price.
    pub fn loan_amount(&self) -> Money {
        if self.use_financing {
            self.purchase_price
                .checked_sub(self.down_payment)
                .map_or(Decimal::ZERO, |loan| loan.max(Decimal::ZERO))
        } else {
            Decimal::ZERO
        }
    }
}

/// Derived figures of a deal. Pure output, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingResult {
    pub loan_amount: Money,
    /// PRICE payment, the schedule used for holding costs
    pub monthly_payment: Money,
    pub auctioneer_fee: Money,
    pub total_cash_invested: Money,
    pub total_holding_costs: Money,
    pub total_cost_at_sale: Money,
    /// Sale price collected at exit, before any cost
    pub gross_proceeds: Money,
    /// Gross proceeds minus total cost at sale, before tax
    pub gross_profit: Money,
    pub capital_gains_tax: Money,
    pub estimated_profit: Money,
    /// Cash-on-cash return in percent, 2 dp
    pub estimated_roi: Percent,
    pub first_payment_sac: Money,
    pub last_payment_sac: Money,
    pub total_interest_sac: Money,
    pub monthly_payment_price: Money,
    pub total_interest_price: Money,
    pub interest_savings: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute every deal metric from a (pre-validated) input record.
///
/// Pure and infallible: degenerate arithmetic resolves to zero figures, and
/// the same input always yields the same result.
pub fn compute_deal_metrics(input: &FinancingInput) -> FinancingResult {
    let loan_amount = input.loan_amount();
    let monthly_payment = compute_fixed_payment(loan_amount, input.interest_rate, input.loan_term_years);
    let comparison = compare_systems(loan_amount, input.interest_rate, input.loan_term_years);

    let cash = aggregate_cash_flows(input, loan_amount, monthly_payment);
    let returns = compute_returns(
        input.estimated_sale_price,
        cash.total_cost_at_sale,
        cash.total_cash_invested,
        &input.locale,
        input.is_first_property,
    );

    debug!(
        locale = %input.locale,
        %loan_amount,
        %monthly_payment,
        total_cash_invested = %cash.total_cash_invested,
        estimated_profit = %returns.estimated_profit,
        estimated_roi = %returns.estimated_roi,
        "deal metrics computed"
    );

    FinancingResult {
        loan_amount,
        monthly_payment,
        auctioneer_fee: cash.auctioneer_fee,
        total_cash_invested: cash.total_cash_invested,
        total_holding_costs: cash.total_holding_costs,
        total_cost_at_sale: cash.total_cost_at_sale,
        gross_proceeds: input.estimated_sale_price,
        gross_profit: returns.gross_profit,
        capital_gains_tax: returns.capital_gains_tax,
        estimated_profit: returns.estimated_profit,
        estimated_roi: returns.estimated_roi,
        first_payment_sac: comparison.first_payment_sac,
        last_payment_sac: comparison.last_payment_sac,
        total_interest_sac: comparison.total_interest_sac,
        monthly_payment_price: comparison.monthly_payment_price,
        total_interest_price: comparison.total_interest_price,
        interest_savings: comparison.interest_savings,
    }
}

/// Validate, compute and wrap the result with advisories and metadata.
///
/// This is the entry point for hosts: it enforces the input contract that
/// `compute_deal_metrics` assumes.
pub fn analyze_deal(input: &FinancingInput) -> DealFinanceResult<ComputationOutput<FinancingResult>> {
    let start = Instant::now();

    validate_input(input)?;
    let result = compute_deal_metrics(input);
    let warnings = collect_warnings(input, &result);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Deal Financing & Cash-on-Cash Return (PRICE schedule, full loan payoff at sale)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject inputs outside the calculator's contract.
pub fn validate_input(input: &FinancingInput) -> DealFinanceResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(DealFinanceError::invalid(
            "purchase_price",
            "Purchase price must be positive",
        ));
    }

    if input.estimated_sale_price <= Decimal::ZERO {
        return Err(DealFinanceError::invalid(
            "estimated_sale_price",
            "Estimated sale price must be positive",
        ));
    }

    let non_negative = [
        ("estimated_costs", input.estimated_costs),
        ("monthly_expenses", input.monthly_expenses),
        ("property_debts", input.property_debts),
        ("down_payment", input.down_payment),
        ("interest_rate", input.interest_rate),
        ("closing_costs", input.closing_costs),
    ];
    if let Some((field, _)) = non_negative.iter().find(|(_, v)| *v < Decimal::ZERO) {
        return Err(DealFinanceError::invalid(field, "Value cannot be negative"));
    }

    if !(1..=MAX_HOLDING_MONTHS).contains(&input.estimated_time_months) {
        return Err(DealFinanceError::InvalidInput {
            field: "estimated_time_months".into(),
            reason: format!("Holding period must be between 1 and {MAX_HOLDING_MONTHS} months"),
        });
    }

    if input.use_financing && !(1..=MAX_LOAN_TERM_YEARS).contains(&input.loan_term_years) {
        return Err(DealFinanceError::InvalidInput {
            field: "loan_term_years".into(),
            reason: format!("Loan term must be between 1 and {MAX_LOAN_TERM_YEARS} years when financing"),
        });
    }

    Ok(())
}

fn collect_warnings(input: &FinancingInput, result: &FinancingResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.use_financing && result.loan_amount.is_zero() {
        warnings.push(format!(
            "Down payment {} covers the purchase price {}; no loan is taken",
            input.down_payment, input.purchase_price
        ));
    }

    if input.use_financing && input.interest_rate.is_zero() && !result.loan_amount.is_zero() {
        warnings.push(
            "Interest rate is 0%; monthly payment is reported as zero and the loan is only repaid at sale"
                .to_string(),
        );
    }

    if input.acquisition_type == AcquisitionType::AuctionNoFee {
        warnings.push("AUCTION_NO_FEE acquisition: no auctioneer fee applied".to_string());
    }

    let taxable = !input.is_first_property && result.gross_profit > Decimal::ZERO;
    if taxable && !locale_defaults(&input.locale).models_capital_gains {
        warnings.push(format!(
            "Capital-gains tax is not modelled for locale {}; consult a tax advisor before relying on net profit",
            input.locale
        ));
    }

    if result.estimated_profit < Decimal::ZERO {
        warnings.push(format!(
            "Deal loses money: estimated profit {} ({}% ROI)",
            result.estimated_profit, result.estimated_roi
        ));
    } else if result.estimated_roi > dec!(100) {
        warnings.push(format!(
            "ROI {}% exceeds 100% over {} months; verify sale price and costs",
            result.estimated_roi, input.estimated_time_months
        ));
    }

    warnings
}
