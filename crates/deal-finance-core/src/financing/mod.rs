pub mod amortization;
pub mod cash_flow;
pub mod deal;
pub mod tax;

pub use amortization::{
    build_schedule, compare_systems, compute_fixed_payment, compute_price_total_interest,
    compute_sac_schedule, AmortizationSchedule, AmortizationSystem, FinancingComparison,
    SacSummary, SchedulePeriod, MAX_LOAN_TERM_YEARS,
};
pub use cash_flow::{aggregate_cash_flows, AcquisitionType, CashFlowSummary};
pub use deal::{
    analyze_deal, compute_deal_metrics, validate_input, FinancingInput, FinancingResult,
    MAX_HOLDING_MONTHS,
};
pub use tax::{compute_capital_gains_tax, compute_returns, ReturnsSummary};
