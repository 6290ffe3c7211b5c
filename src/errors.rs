use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid number for {field}: {value}")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },

    #[error("invalid date for {field}: {value} (expected YYYY-MM-DD)")]
    InvalidDate {
        field: &'static str,
        value: String,
    },

    #[error("invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("postponement of {requested} months leaves no installment to pay out of {installments}")]
    PostponementExceedsInstallments {
        requested: u32,
        installments: u32,
    },

    #[error("malformed request: {0}")]
    MalformedRequest(serde_json::Error),

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StrategyError {
    /// arithmetic that left the representable decimal range
    pub fn overflow(what: &str) -> Self {
        StrategyError::CalculationError {
            message: format!("{} overflowed", what),
        }
    }

    /// errors caused by the caller's input rather than by the engine
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            StrategyError::CalculationError { .. } | StrategyError::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;
