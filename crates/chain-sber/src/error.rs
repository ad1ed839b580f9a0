use thiserror::Error;

/// Sbercoin chain operation errors.
#[derive(Debug, Error)]
pub enum SberError {
    #[error("insufficient funds: have {available} units, need {required} units")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("malformed hex input: {0}")]
    MalformedHex(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("signing error: {0}")]
    SigningError(String),
}
