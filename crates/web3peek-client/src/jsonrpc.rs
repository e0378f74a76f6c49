//! JSON-RPC 2.0 framing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Protocol version string carried by every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// RPC request.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: serde_json::Value,
    pub id: u64,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id,
        }
    }
}

/// RPC response. `result` is left as raw JSON until the error
/// object has been checked.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// Error object returned by the node.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Decode a response body for `method`.
///
/// The node's error object wins over any result. A missing result is
/// treated as `null`, so `Option<T>` targets accept it and anything else
/// reports [`ClientError::EmptyResult`].
pub fn decode_response<T: DeserializeOwned>(method: &str, body: &[u8]) -> Result<T> {
    let response: RpcResponse = serde_json::from_slice(body).map_err(|source| ClientError::Decode {
        method: method.to_string(),
        source,
    })?;

    if let Some(error) = response.error {
        return Err(ClientError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    let result = response.result.unwrap_or(serde_json::Value::Null);
    let was_null = result.is_null();

    serde_json::from_value(result).map_err(|source| {
        if was_null {
            ClientError::EmptyResult(method.to_string())
        } else {
            ClientError::Decode {
                method: method.to_string(),
                source,
            }
        }
    })
}
