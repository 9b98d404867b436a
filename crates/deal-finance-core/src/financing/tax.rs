//! Capital-gains tax and cash-on-cash returns.
//!
//! Only pt-BR has a modelled regime: a progressive schedule on the gain from
//! sale. Every other locale, en-US included, owes nothing here; US rules
//! depend on holding period and filer bracket and are left to an advisory.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locale::Locale;
use crate::types::{round_currency, Money, Percent, Rate};

/// One tier of a progressive schedule.
///
/// Tax for a profit inside the tier is `base_tax + (profit - floor) * rate`.
/// `base_tax` is the fixed cumulative tax of all lower tiers.
#[derive(Debug, Clone, Copy)]
struct TaxBracket {
    floor: Money,
    /// Inclusive upper bound, `None` for the top tier
    ceiling: Option<Money>,
    base_tax: Money,
    rate: Rate,
}

const PT_BR_CAPITAL_GAINS: [TaxBracket; 4] = [
    TaxBracket {
        floor: dec!(0),
        ceiling: Some(dec!(5000000)),
        base_tax: dec!(0),
        rate: dec!(0.15),
    },
    TaxBracket {
        floor: dec!(5000000),
        ceiling: Some(dec!(10000000)),
        base_tax: dec!(750000),
        rate: dec!(0.175),
    },
    TaxBracket {
        floor: dec!(10000000),
        ceiling: Some(dec!(30000000)),
        base_tax: dec!(1625000),
        rate: dec!(0.20),
    },
    TaxBracket {
        floor: dec!(30000000),
        ceiling: None,
        base_tax: dec!(5625000),
        rate: dec!(0.225),
    },
];

fn progressive_tax(brackets: &[TaxBracket], profit: Money) -> Money {
    brackets
        .iter()
        .find(|b| b.ceiling.map_or(true, |ceiling| profit <= ceiling))
        .and_then(|b| {
            profit
                .checked_sub(b.floor)?
                .checked_mul(b.rate)?
                .checked_add(b.base_tax)
        })
        .unwrap_or(Decimal::ZERO)
}

/// Capital-gains tax owed on `profit` from a sale.
///
/// Zero for a first property, for losses, and for any locale without a
/// modelled regime. The result is not rounded.
pub fn compute_capital_gains_tax(profit: Money, locale: &Locale, is_first_property: bool) -> Money {
    if is_first_property || profit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match locale {
        Locale::PtBr => progressive_tax(&PT_BR_CAPITAL_GAINS, profit),
        Locale::EnUs | Locale::Other(_) => Decimal::ZERO,
    }
}

/// Profit and ROI of a deal after tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnsSummary {
    /// Sale price minus total cost at sale, before tax
    pub gross_profit: Money,
    pub capital_gains_tax: Money,
    /// Gross profit minus tax, may be negative
    pub estimated_profit: Money,
    /// Cash-on-cash return in percent, rounded to 2 dp; zero without cash invested
    pub estimated_roi: Percent,
}

/// Apply tax policy to the pre-tax profit and derive cash-on-cash ROI.
///
/// A profit outside the decimal range resolves to zero figures, and an ROI
/// that cannot be represented is reported as zero.
pub fn compute_returns(
    estimated_sale_price: Money,
    total_cost_at_sale: Money,
    total_cash_invested: Money,
    locale: &Locale,
    is_first_property: bool,
) -> ReturnsSummary {
    let gross_profit = estimated_sale_price
        .checked_sub(total_cost_at_sale)
        .unwrap_or(Decimal::ZERO);
    let capital_gains_tax = compute_capital_gains_tax(gross_profit, locale, is_first_property);
    let estimated_profit = gross_profit - capital_gains_tax;

    let estimated_roi = if total_cash_invested > Decimal::ZERO {
        cash_on_cash_roi(estimated_profit, total_cash_invested).unwrap_or_else(|| {
            debug!(%estimated_profit, %total_cash_invested, "ROI not representable, using zero");
            Decimal::ZERO
        })
    } else {
        Decimal::ZERO
    };

    ReturnsSummary {
        gross_profit,
        capital_gains_tax,
        estimated_profit,
        estimated_roi,
    }
}

fn cash_on_cash_roi(estimated_profit: Money, total_cash_invested: Money) -> Option<Percent> {
    let roi = estimated_profit
        .checked_div(total_cash_invested)?
        .checked_mul(dec!(100))?;
    Some(round_currency(roi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn br(profit: Money) -> Money {
        compute_capital_gains_tax(profit, &Locale::PtBr, false)
    }

    #[test]
    fn test_first_property_is_exempt() {
        assert_eq!(compute_capital_gains_tax(dec!(1000000), &Locale::PtBr, true), Decimal::ZERO);
        assert_eq!(compute_capital_gains_tax(dec!(99000000), &Locale::PtBr, true), Decimal::ZERO);
    }

    #[test]
    fn test_no_tax_on_loss() {
        assert_eq!(br(dec!(-1000)), Decimal::ZERO);
        assert_eq!(br(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_first_tier() {
        assert_eq!(br(dec!(100000)), dec!(15000));
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(br(dec!(5000000)), dec!(750000));
        assert_eq!(br(dec!(10000000)), dec!(1625000));
        assert_eq!(br(dec!(30000000)), dec!(5625000));
    }

    #[test]
    fn test_just_above_first_boundary() {
        assert_eq!(br(dec!(5000000.01)), dec!(750000.00175));
    }

    #[test]
    fn test_upper_tiers() {
        // 1,625,000 + 5,000,000 * 20%
        assert_eq!(br(dec!(15000000)), dec!(2625000));
        // 5,625,000 + 10,000,000 * 22.5%
        assert_eq!(br(dec!(40000000)), dec!(7875000));
    }

    #[test]
    fn test_other_locales_owe_nothing() {
        assert_eq!(compute_capital_gains_tax(dec!(500000), &Locale::EnUs, false), Decimal::ZERO);
        assert_eq!(
            compute_capital_gains_tax(dec!(500000), &Locale::Other("de-DE".into()), false),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_returns_with_tax() {
        let r = compute_returns(dec!(300000), dec!(200000), dec!(200000), &Locale::PtBr, false);
        assert_eq!(r.gross_profit, dec!(100000));
        assert_eq!(r.capital_gains_tax, dec!(15000));
        assert_eq!(r.estimated_profit, dec!(85000));
        assert_eq!(r.estimated_roi, dec!(42.50));
    }

    #[test]
    fn test_roi_zero_without_cash_invested() {
        let r = compute_returns(dec!(300000), dec!(200000), Decimal::ZERO, &Locale::EnUs, false);
        assert_eq!(r.estimated_roi, Decimal::ZERO);
    }

    #[test]
    fn test_unrepresentable_roi_is_zero() {
        // 1e28 of profit on one cent invested is far beyond the decimal range
        let sale = dec!(10000000000000000000000000000);
        let r = compute_returns(sale, dec!(1), dec!(0.01), &Locale::EnUs, false);
        assert_eq!(r.gross_profit, sale - dec!(1));
        assert_eq!(r.estimated_roi, Decimal::ZERO);
    }

    #[test]
    fn test_top_bracket_near_decimal_max() {
        let tax = br(Decimal::MAX);
        assert!(tax > Decimal::ZERO && tax < Decimal::MAX);
    }

    #[test]
    fn test_negative_roi_on_loss() {
        let r = compute_returns(dec!(90000), dec!(100000), dec!(100000), &Locale::PtBr, false);
        assert_eq!(r.capital_gains_tax, Decimal::ZERO);
        assert_eq!(r.estimated_profit, dec!(-10000));
        assert_eq!(r.estimated_roi, dec!(-10.00));
    }
}
