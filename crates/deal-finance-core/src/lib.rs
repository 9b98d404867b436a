pub mod error;
pub mod locale;
pub mod types;

#[cfg(feature = "financing")]
pub mod financing;

pub use error::DealFinanceError;
pub use locale::{get_default_interest_rate, get_loan_term_options, Locale};
pub use types::*;

/// Standard result type for all deal-finance operations
pub type DealFinanceResult<T> = Result<T, DealFinanceError>;
