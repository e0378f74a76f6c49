//! HTTP client for interacting with a node's JSON-RPC endpoint.

use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use web3peek_types::{quantity, Address, Block, BlockId, U256};

use crate::error::{ClientError, Result};
use crate::jsonrpc::{self, RpcRequest};

/// Endpoint a local development node listens on.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Per-request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// HTTP(S) endpoint
    pub url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Connection handle bound to one node endpoint.
///
/// Cheap to clone; clones share the request id counter.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    url: reqwest::Url,
    timeout: Duration,
    pub(crate) next_id: Arc<AtomicU64>,
}

impl Client {
    /// Create a client for `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(url))
    }

    /// Create a client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let url = parse_endpoint(&config.url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            url,
            timeout: config.timeout,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Whether the node answers at all.
    ///
    /// Issues `web3_clientVersion`; any failure (unreachable, HTTP error,
    /// malformed reply, node error) reads as `false`. Never errors.
    pub async fn is_connected(&self) -> bool {
        match self.client_version().await {
            Ok(version) => {
                tracing::debug!(url = %self.url, %version, "node is reachable");
                true
            }
            Err(e) => {
                tracing::debug!(url = %self.url, error = %e, "node is not reachable");
                false
            }
        }
    }

    /// Node software version string.
    pub async fn client_version(&self) -> Result<String> {
        self.request("web3_clientVersion", json!([])).await
    }

    /// Get chain ID.
    pub async fn chain_id(&self) -> Result<u64> {
        let hex: String = self.request("eth_chainId", json!([])).await?;
        Ok(quantity::parse_u64(&hex)?)
    }

    /// Network id as reported by `net_version` (a decimal string).
    pub async fn net_version(&self) -> Result<String> {
        self.request("net_version", json!([])).await
    }

    /// Get current block number.
    pub async fn block_number(&self) -> Result<u64> {
        let hex: String = self.request("eth_blockNumber", json!([])).await?;
        Ok(quantity::parse_u64(&hex)?)
    }

    /// Get block by number or tag. `None` when the node has no such block.
    pub async fn get_block(&self, id: BlockId, full_transactions: bool) -> Result<Option<Block>> {
        self.request("eth_getBlockByNumber", json!([id, full_transactions]))
            .await
    }

    /// Most recently sealed block, transactions as hashes.
    pub async fn latest_block(&self) -> Result<Block> {
        self.get_block(BlockId::Latest, false)
            .await?
            .ok_or(ClientError::BlockNotFound(BlockId::Latest))
    }

    /// Accounts the node holds keys for.
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", json!([])).await
    }

    /// Get balance in wei.
    pub async fn get_balance(&self, address: &Address, block: BlockId) -> Result<U256> {
        self.request("eth_getBalance", json!([address, block])).await
    }

    /// Make a typed RPC call.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(method, params, id);

        tracing::debug!(method, id, url = %self.url, "sending request");

        let response = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_transport(e))?;

        tracing::trace!(method, id, %status, bytes = body.len(), "received response");

        match jsonrpc::decode_response(method, &body) {
            // An error object behind a 4xx/5xx still surfaces as Rpc.
            Err(ClientError::Decode { .. }) if !status.is_success() => {
                Err(ClientError::HttpStatus(status.as_u16()))
            }
            other => other,
        }
    }

    fn map_transport(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Transport(e)
        }
    }
}

/// Validate an endpoint string.
fn parse_endpoint(url: &str) -> Result<reqwest::Url> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ClientError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ClientError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", other),
        }),
    }
}
