use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::deal::FinancingInput;
use crate::types::{Money, Rate};

/// Auctioneer commission on the purchase price for fee-bearing auctions.
pub const AUCTIONEER_FEE_RATE: Rate = dec!(0.05);

/// How the property was acquired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcquisitionType {
    #[default]
    Traditional,
    /// Auction with a 5% auctioneer fee on the purchase price
    Auction,
    /// Auction path where no auctioneer fee is charged
    AuctionNoFee,
}

impl AcquisitionType {
    /// Commission rate charged on the purchase price. Only `Auction` bears one.
    pub fn auctioneer_fee_rate(self) -> Rate {
        match self {
            AcquisitionType::Auction => AUCTIONEER_FEE_RATE,
            AcquisitionType::Traditional | AcquisitionType::AuctionNoFee => Decimal::ZERO,
        }
    }
}

/// Holding-period cash picture of a deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub auctioneer_fee: Money,
    /// Recurring expenses over the whole holding period
    pub total_monthly_expenses: Money,
    /// Mortgage payments over the whole holding period
    pub total_mortgage_payments: Money,
    pub total_holding_costs: Money,
    /// Upfront capital put in by the investor
    pub total_cash_invested: Money,
    /// Everything paid out by the time of sale, loan payoff included
    pub total_cost_at_sale: Money,
}

/// Roll loan figures and the input record up into holding-period totals.
///
/// `monthly_payment` is the active schedule's payment (PRICE). At sale the
/// full original `loan_amount` is treated as still owed; payments made during
/// the holding period do not reduce the payoff. Totals that overflow the
/// decimal range resolve to an all-zero summary.
pub fn aggregate_cash_flows(
    input: &FinancingInput,
    loan_amount: Money,
    monthly_payment: Money,
) -> CashFlowSummary {
    match exact_cash_flows(input, loan_amount, monthly_payment) {
        Some(summary) => summary,
        None => {
            debug!(
                purchase_price = %input.purchase_price,
                monthly_expenses = %input.monthly_expenses,
                months = input.estimated_time_months,
                "cash flows not representable, using zeros"
            );
            CashFlowSummary::default()
        }
    }
}

fn exact_cash_flows(
    input: &FinancingInput,
    loan_amount: Money,
    monthly_payment: Money,
) -> Option<CashFlowSummary> {
    let months = Decimal::from(input.estimated_time_months);

    let auctioneer_fee = input
        .purchase_price
        .checked_mul(input.acquisition_type.auctioneer_fee_rate())?;
    let total_monthly_expenses = input.monthly_expenses.checked_mul(months)?;
    let total_mortgage_payments = if input.use_financing {
        monthly_payment.checked_mul(months)?
    } else {
        Decimal::ZERO
    };
    let total_holding_costs = total_monthly_expenses.checked_add(total_mortgage_payments)?;

    let upfront_extras = input
        .estimated_costs
        .checked_add(input.property_debts)?
        .checked_add(auctioneer_fee)?;
    let total_cash_invested = if input.use_financing {
        input
            .down_payment
            .checked_add(input.closing_costs)?
            .checked_add(upfront_extras)?
    } else {
        input.purchase_price.checked_add(upfront_extras)?
    };

    let mut total_cost_at_sale = total_cash_invested.checked_add(total_holding_costs)?;
    if input.use_financing {
        total_cost_at_sale = total_cost_at_sale.checked_add(loan_amount)?;
    }

    Some(CashFlowSummary {
        auctioneer_fee,
        total_monthly_expenses,
        total_mortgage_payments,
        total_holding_costs,
        total_cash_invested,
        total_cost_at_sale,
    })
}
