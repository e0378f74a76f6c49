//! Error types for the client.

use thiserror::Error;
use web3peek_types::{BlockId, TypesError};

/// Client result type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Endpoint is not an http(s) URL
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection refused, DNS failure, reset, ...
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// No response within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Non-2xx reply whose body was not a JSON-RPC response
    #[error("Node replied with HTTP status {0}")]
    HttpStatus(u16),

    /// Body could not be decoded
    #[error("Failed to decode response to {method}: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// Error object returned by the node
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// `null` result where a value was required
    #[error("Empty result for {0}")]
    EmptyResult(String),

    /// Block query answered with `null`
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error(transparent)]
    Types(#[from] TypesError),
}

impl ClientError {
    /// True when the node could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout(_))
    }

    /// JSON-RPC error code, if the node sent one.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            ClientError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}
