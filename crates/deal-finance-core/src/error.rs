use thiserror::Error;

/// Errors raised at the input boundary. The calculator itself never fails;
/// these only come out of validation and serialization.
#[derive(Debug, Error)]
pub enum DealFinanceError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DealFinanceError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        DealFinanceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DealFinanceError {
    fn from(e: serde_json::Error) -> Self {
        DealFinanceError::SerializationError(e.to_string())
    }
}
