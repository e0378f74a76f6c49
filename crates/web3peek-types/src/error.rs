use thiserror::Error;

/// Errors that can occur while decoding wire values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid address length: expected 20, got {0}")]
    InvalidAddressLength(usize),

    #[error("Invalid hash length: expected 32, got {0}")]
    InvalidHashLength(usize),

    #[error("U256 overflow")]
    U256Overflow,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid hex quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid block identifier: {0}")]
    InvalidBlockId(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}

impl From<std::num::ParseIntError> for TypesError {
    fn from(e: std::num::ParseIntError) -> Self {
        TypesError::InvalidNumber(e.to_string())
    }
}
