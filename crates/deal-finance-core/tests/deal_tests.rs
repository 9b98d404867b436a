use deal_finance_core::financing::{
    analyze_deal, compute_capital_gains_tax, compute_deal_metrics, compute_fixed_payment,
    compute_sac_schedule, validate_input, AcquisitionType, FinancingInput, MAX_HOLDING_MONTHS,
    MAX_LOAN_TERM_YEARS,
};
use deal_finance_core::Locale;
use pretty_assertions::assert_eq;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

fn flip_input() -> FinancingInput {
    FinancingInput::new(dec!(200000), dec!(300000), 6)
        .with_costs(dec!(30000), dec!(500))
        .first_property(true)
}

fn financed_input() -> FinancingInput {
    flip_input()
        .with_financing(dec!(40000), dec!(7.5), 30)
        .with_closing_costs(dec!(5000))
}

// ===========================================================================
// PRICE payment
// ===========================================================================

#[test]
fn test_price_payment_recovers_principal() {
    // r = 1%, n = 360
    let principal = dec!(300000);
    let r = dec!(0.01);
    let payment = compute_fixed_payment(principal, dec!(12), 30);
    assert_eq!(payment, dec!(3085.84));

    let growth = (Decimal::ONE + r).powu(360);
    let annuity_factor = (growth - Decimal::ONE) / (r * growth);
    let recovered = payment * annuity_factor;
    // a payment rounded to cents is off by at most half a cent per period
    let tolerance = dec!(0.005) * annuity_factor;
    assert!(
        (recovered - principal).abs() <= tolerance,
        "recovered {recovered}, tolerance {tolerance}"
    );
}

#[test]
fn test_zero_rate_and_zero_term_are_safe() {
    for principal in [dec!(1), dec!(250000), dec!(99999999)] {
        assert_eq!(compute_fixed_payment(principal, Decimal::ZERO, 30), Decimal::ZERO);
        assert_eq!(compute_fixed_payment(principal, dec!(9.25), 0), Decimal::ZERO);
        let sac = compute_sac_schedule(principal, Decimal::ZERO, 30);
        assert_eq!(sac.first_payment, Decimal::ZERO);
        assert_eq!(sac.total_interest, Decimal::ZERO);
    }
}

// ===========================================================================
// Capital-gains tax
// ===========================================================================

#[test]
fn test_first_property_exemption() {
    for profit in [dec!(1), dec!(5000000), dec!(45000000)] {
        assert_eq!(compute_capital_gains_tax(profit, &Locale::PtBr, true), Decimal::ZERO);
    }
}

#[test]
fn test_no_tax_on_loss() {
    assert_eq!(compute_capital_gains_tax(dec!(-1000), &Locale::PtBr, false), Decimal::ZERO);
}

#[test]
fn test_bracket_boundary_continuity() {
    assert_eq!(compute_capital_gains_tax(dec!(5000000), &Locale::PtBr, false), dec!(750000));
    let above = compute_capital_gains_tax(dec!(5000000.01), &Locale::PtBr, false);
    assert_eq!(above, dec!(750000) + dec!(0.01) * dec!(0.175));
}

// ===========================================================================
// Deal scenarios
// ===========================================================================

#[test]
fn test_cash_purchase_scenario() {
    let r = compute_deal_metrics(&flip_input());
    assert_eq!(r.total_cash_invested, dec!(230000));
    assert_eq!(r.total_holding_costs, dec!(3000));
    assert_eq!(r.total_cost_at_sale, dec!(233000));
    assert_eq!(r.capital_gains_tax, Decimal::ZERO);
    assert_eq!(r.estimated_profit, dec!(67000));
    // 67,000 / 230,000 = 29.1304...%
    assert_eq!(r.estimated_roi, dec!(29.13));
}

#[test]
fn test_financed_scenario() {
    let r = compute_deal_metrics(&financed_input());
    assert_eq!(r.loan_amount, dec!(160000));
    assert_eq!(r.monthly_payment, dec!(1118.74));
    assert_eq!(r.total_cash_invested, dec!(75000));
    // 6 * 500 expenses + 6 * 1,118.74 mortgage
    assert_eq!(r.total_holding_costs, dec!(9712.44));
    // full loan payoff at sale
    assert_eq!(r.total_cost_at_sale, dec!(75000) + dec!(9712.44) + dec!(160000));
    assert_eq!(r.estimated_profit, dec!(55287.56));
    assert_eq!(r.estimated_roi, dec!(73.72));
}

#[test]
fn test_financed_scenario_comparison_fields() {
    let r = compute_deal_metrics(&financed_input());
    assert_eq!(r.monthly_payment_price, r.monthly_payment);
    assert_eq!(r.first_payment_sac, dec!(1444.44));
    assert_eq!(r.last_payment_sac, dec!(447.22));
    assert_eq!(r.total_interest_sac, dec!(180500.00));
    assert_eq!(r.total_interest_price, dec!(242747.56));
    assert_eq!(r.interest_savings, dec!(62247.56));
}

#[test]
fn test_auction_fee() {
    let base = FinancingInput::new(dec!(100000), dec!(160000), 4);

    let r = compute_deal_metrics(&base.clone().with_acquisition_type(AcquisitionType::Auction));
    assert_eq!(r.auctioneer_fee, dec!(5000));

    let r = compute_deal_metrics(&base.clone().with_acquisition_type(AcquisitionType::AuctionNoFee));
    assert_eq!(r.auctioneer_fee, Decimal::ZERO);

    let r = compute_deal_metrics(&base.with_acquisition_type(AcquisitionType::Traditional));
    assert_eq!(r.auctioneer_fee, Decimal::ZERO);
}

#[test]
fn test_roi_zero_when_no_cash_invested() {
    // A down payment of zero with no other upfront cost leaves nothing invested.
    let input = FinancingInput::new(dec!(100000), dec!(150000), 12).with_financing(
        Decimal::ZERO,
        dec!(8),
        30,
    );
    let r = compute_deal_metrics(&input);
    assert_eq!(r.total_cash_invested, Decimal::ZERO);
    assert_eq!(r.estimated_roi, Decimal::ZERO);
}

#[test]
fn test_repeated_calls_are_identical() {
    let input = financed_input().with_locale(Locale::PtBr).first_property(false);
    let first = compute_deal_metrics(&input);
    let second = compute_deal_metrics(&input);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_brazil_taxed_financed_flip() {
    let input = financed_input().with_locale(Locale::PtBr).first_property(false);
    let r = compute_deal_metrics(&input);
    assert_eq!(r.gross_profit, dec!(55287.56));
    // 15% of the gain
    assert_eq!(r.capital_gains_tax, dec!(8293.134));
    assert_eq!(r.estimated_profit, dec!(46994.426));
    assert_eq!(r.estimated_roi, dec!(62.66));
}

#[test]
fn test_unknown_locale_behaves_like_us() {
    let us = compute_deal_metrics(&flip_input().first_property(false));
    let other = compute_deal_metrics(
        &flip_input()
            .first_property(false)
            .with_locale(Locale::from("ja-JP")),
    );
    assert_eq!(us, other);
}

#[test]
fn test_malformed_input_degrades_without_panicking() {
    // Contract violations are the host's problem; the calculator stays finite.
    let mut input = financed_input();
    input.purchase_price = dec!(-100);
    input.estimated_time_months = 0;
    input.loan_term_years = 0;
    let r = compute_deal_metrics(&input);
    assert_eq!(r.loan_amount, Decimal::ZERO);
    assert_eq!(r.monthly_payment, Decimal::ZERO);
    assert_eq!(r.total_holding_costs, Decimal::ZERO);
    assert!(analyze_deal(&input).is_err());
}

#[test]
fn test_huge_sale_on_tiny_cash_degrades_safely() {
    // valid input whose ROI (about 1e30 %) does not fit a decimal
    let input = FinancingInput::new(dec!(1), dec!(10000000000000000000000000000), 1);
    assert!(validate_input(&input).is_ok());

    let out = analyze_deal(&input).unwrap();
    assert_eq!(out.result.total_cash_invested, dec!(1));
    assert_eq!(out.result.estimated_profit, dec!(9999999999999999999999999999));
    assert_eq!(out.result.estimated_roi, Decimal::ZERO);
}

#[test]
fn test_huge_monthly_expenses_degrade_safely() {
    // 120 months of ~7.9e27 overflow the holding-cost total
    let input = FinancingInput::new(dec!(100000), dec!(150000), MAX_HOLDING_MONTHS)
        .with_costs(Decimal::ZERO, Decimal::MAX / dec!(10))
        .with_financing(dec!(20000), dec!(9), MAX_LOAN_TERM_YEARS);
    assert!(validate_input(&input).is_ok());

    let r = compute_deal_metrics(&input);
    assert_eq!(r.total_holding_costs, Decimal::ZERO);
    assert_eq!(r.total_cash_invested, Decimal::ZERO);
    assert_eq!(r.estimated_roi, Decimal::ZERO);
    assert!(r.monthly_payment > Decimal::ZERO);
}

#[test]
fn test_loan_term_beyond_ceiling_is_rejected() {
    let input = financed_input().with_financing(dec!(40000), dec!(7.5), 200_000);
    assert!(analyze_deal(&input).is_err());
}

#[test]
fn test_analyze_deal_json_round_trip_of_assumptions() {
    let out = analyze_deal(&financed_input()).unwrap();
    let assumptions: FinancingInput = serde_json::from_value(out.assumptions.clone()).unwrap();
    assert_eq!(assumptions, financed_input());
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}
