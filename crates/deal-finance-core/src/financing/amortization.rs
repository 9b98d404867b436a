//! Amortization engine: constant-payment (PRICE / French) and
//! constant-amortization (SAC) loan schedules.
//!
//! Rates come in as nominal annual percentages (7.5 = 7.5% a year) and are
//! converted to a simple monthly rate `r = annual / 100 / 12`. Terms are
//! given in years and paid monthly, so `n = years * 12`.
//!
//! Degenerate inputs (non-positive principal, rate or term) and arithmetic
//! overflow never fault: they resolve to zero figures or an empty schedule.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{round_currency, Money, Percent, Rate};

/// Longest loan term accepted at the boundary, and the longest for which a
/// month-by-month table is built.
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Repayment policy of a loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmortizationSystem {
    /// Constant amortization: fixed principal, decreasing payments
    Sac,
    /// Constant payment (French table)
    #[default]
    Price,
}

/// Summary of a SAC schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SacSummary {
    /// Payment of period 1, the largest
    pub first_payment: Money,
    /// Payment of period n, the smallest
    pub last_payment: Money,
    /// Sum of all interest portions
    pub total_interest: Money,
}

/// SAC against PRICE for the same principal, rate and term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingComparison {
    pub first_payment_sac: Money,
    pub last_payment_sac: Money,
    pub total_interest_sac: Money,
    pub monthly_payment_price: Money,
    pub total_interest_price: Money,
    /// PRICE total interest minus SAC total interest, never negative
    pub interest_savings: Money,
}

/// One month of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub period: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub amortization: Money,
    pub closing_balance: Money,
}

/// Month-by-month repayment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub system: AmortizationSystem,
    pub periods: Vec<SchedulePeriod>,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Validated loan terms. Only built when every input is usable.
#[derive(Debug, Clone, Copy)]
struct LoanTerms {
    principal: Money,
    monthly_rate: Rate,
    months: u32,
}

impl LoanTerms {
    fn new(principal: Money, annual_rate_pct: Percent, term_years: u32) -> Option<Self> {
        if principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || term_years == 0 {
            return None;
        }
        let months = term_years.checked_mul(12)?;
        let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);
        if monthly_rate.is_zero() {
            // rate too small to survive 28 digits of precision
            return None;
        }
        Some(Self {
            principal,
            monthly_rate,
            months,
        })
    }

    fn months_dec(&self) -> Decimal {
        Decimal::from(self.months)
    }
}

// ---------------------------------------------------------------------------
// PRICE
// ---------------------------------------------------------------------------

/// Unrounded PRICE payment, `None` when there is nothing to amortize or the
/// arithmetic overflows.
fn exact_fixed_payment(terms: &LoanTerms) -> Option<Money> {
    let growth = (Decimal::ONE + terms.monthly_rate).checked_powu(u64::from(terms.months))?;
    let denominator = growth.checked_sub(Decimal::ONE)?;
    if denominator <= Decimal::ZERO {
        return None;
    }
    terms
        .principal
        .checked_mul(terms.monthly_rate.checked_mul(growth)?)?
        .checked_div(denominator)
}

/// Monthly payment of a constant-payment loan, rounded to cents.
///
/// `payment = P * r(1+r)^n / ((1+r)^n - 1)`. Returns zero when principal,
/// rate or term is not positive, or when the computation overflows.
pub fn compute_fixed_payment(principal: Money, annual_rate_pct: Percent, term_years: u32) -> Money {
    let Some(terms) = LoanTerms::new(principal, annual_rate_pct, term_years) else {
        return Decimal::ZERO;
    };
    match exact_fixed_payment(&terms) {
        Some(payment) => round_currency(payment),
        None => {
            debug!(%principal, %annual_rate_pct, term_years, "fixed payment not representable, using zero");
            Decimal::ZERO
        }
    }
}

/// Total interest over the life of a PRICE loan, rounded to cents.
///
/// Computed from the unrounded payment so it stays comparable with the SAC
/// total.
pub fn compute_price_total_interest(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: u32,
) -> Money {
    LoanTerms::new(principal, annual_rate_pct, term_years)
        .and_then(|terms| {
            let payment = exact_fixed_payment(&terms)?;
            payment
                .checked_mul(terms.months_dec())?
                .checked_sub(terms.principal)
        })
        .map(|interest| round_currency(interest.max(Decimal::ZERO)))
        .unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// SAC
// ---------------------------------------------------------------------------

/// First payment, last payment and total interest of a SAC loan.
///
/// With `a = P / n`, payment `i` is `a + (P - (i-1)a) * r`, so the first is
/// `a + P*r`, the last `a + a*r`, and total interest sums to
/// `r * P * (n+1) / 2`. All three figures are rounded to cents; degenerate
/// inputs give all zeros.
pub fn compute_sac_schedule(principal: Money, annual_rate_pct: Percent, term_years: u32) -> SacSummary {
    let Some(terms) = LoanTerms::new(principal, annual_rate_pct, term_years) else {
        return SacSummary::default();
    };
    match exact_sac_summary(&terms) {
        Some(summary) => summary,
        None => {
            debug!(%principal, %annual_rate_pct, term_years, "SAC schedule not representable, using zeros");
            SacSummary::default()
        }
    }
}

fn exact_sac_summary(terms: &LoanTerms) -> Option<SacSummary> {
    let amortization = terms.principal.checked_div(terms.months_dec())?;
    let first_payment = terms
        .principal
        .checked_mul(terms.monthly_rate)?
        .checked_add(amortization)?;
    let last_payment = amortization
        .checked_mul(terms.monthly_rate)?
        .checked_add(amortization)?;
    let total_interest = terms
        .principal
        .checked_mul(terms.monthly_rate)?
        .checked_mul(terms.months_dec() + Decimal::ONE)?
        .checked_div(dec!(2))?;

    Some(SacSummary {
        first_payment: round_currency(first_payment),
        last_payment: round_currency(last_payment),
        total_interest: round_currency(total_interest),
    })
}

// ---------------------------------------------------------------------------
// Comparison and schedules
// ---------------------------------------------------------------------------

/// Side-by-side SAC and PRICE figures for the same loan.
pub fn compare_systems(principal: Money, annual_rate_pct: Percent, term_years: u32) -> FinancingComparison {
    let sac = compute_sac_schedule(principal, annual_rate_pct, term_years);
    let monthly_payment_price = compute_fixed_payment(principal, annual_rate_pct, term_years);
    let total_interest_price = compute_price_total_interest(principal, annual_rate_pct, term_years);

    FinancingComparison {
        first_payment_sac: sac.first_payment,
        last_payment_sac: sac.last_payment,
        total_interest_sac: sac.total_interest,
        monthly_payment_price,
        total_interest_price,
        interest_savings: (total_interest_price - sac.total_interest).max(Decimal::ZERO),
    }
}

/// Month-by-month table for either system.
///
/// Amounts per row are rounded to cents for display; totals are accumulated
/// from unrounded values and rounded once. Degenerate inputs, and terms
/// beyond `MAX_LOAN_TERM_YEARS`, give an empty table.
pub fn build_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: u32,
    system: AmortizationSystem,
) -> AmortizationSchedule {
    LoanTerms::new(principal, annual_rate_pct, term_years)
        .filter(|_| {
            let within = term_years <= MAX_LOAN_TERM_YEARS;
            if !within {
                debug!(term_years, max = MAX_LOAN_TERM_YEARS, "term too long for a schedule, returning empty table");
            }
            within
        })
        .and_then(|terms| {
            let schedule = exact_schedule(&terms, system);
            if schedule.is_none() {
                debug!(%principal, %annual_rate_pct, term_years, "schedule not representable, returning empty table");
            }
            schedule
        })
        .unwrap_or(AmortizationSchedule {
            system,
            periods: Vec::new(),
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
        })
}

fn exact_schedule(terms: &LoanTerms, system: AmortizationSystem) -> Option<AmortizationSchedule> {
    let fixed_payment = match system {
        AmortizationSystem::Price => Some(exact_fixed_payment(terms)?),
        AmortizationSystem::Sac => None,
    };
    let sac_amortization = terms.principal.checked_div(terms.months_dec())?;

    let mut periods = Vec::with_capacity(terms.months as usize);
    let mut balance = terms.principal;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=terms.months {
        let interest = balance.checked_mul(terms.monthly_rate)?;
        let (payment, amortization) = match fixed_payment {
            Some(payment) => (payment, payment.checked_sub(interest)?),
            None => (sac_amortization.checked_add(interest)?, sac_amortization),
        };
        let closing = balance.checked_sub(amortization)?.max(Decimal::ZERO);

        periods.push(SchedulePeriod {
            period,
            opening_balance: round_currency(balance),
            payment: round_currency(payment),
            interest: round_currency(interest),
            amortization: round_currency(amortization),
            closing_balance: round_currency(closing),
        });

        total_paid = total_paid.checked_add(payment)?;
        total_interest = total_interest.checked_add(interest)?;
        balance = closing;
    }

    Some(AmortizationSchedule {
        system,
        periods,
        total_paid: round_currency(total_paid),
        total_interest: round_currency(total_interest),
    })
}
