//! In-process JSON-RPC node for tests.
//!
//! Serves a small fixed chain over HTTP on `127.0.0.1:<random port>`,
//! shaped like a fresh ganache instance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use web3peek_types::{quantity, Address, Block, BlockId, BlockTransactions, Hash, U256};

/// What the mock node reports.
#[derive(Debug, Clone)]
pub struct MockNodeConfig {
    pub client_version: String,
    pub chain_id: u64,
    pub network_id: String,
    pub accounts: Vec<Address>,
    pub balances: HashMap<Address, U256>,
    /// Number of blocks after genesis
    pub head: u64,
    /// Methods answered with this error object: (method, code, message)
    pub failures: Vec<(String, i64, String)>,
    /// When set, every request gets this HTTP status and a plain-text body
    pub http_status: Option<u16>,
    /// Answer every block query with `null`, like a node still syncing headers
    pub null_blocks: bool,
}

impl Default for MockNodeConfig {
    fn default() -> Self {
        let accounts: Vec<Address> = (1..=3u8).map(|i| Address::from_bytes([i; 20])).collect();
        let balances = accounts
            .iter()
            .map(|a| (*a, U256::from(100_000_000_000_000_000_000u128)))
            .collect();

        Self {
            client_version: "Ganache/v7.9.1/EthereumJS TestRPC/v7.9.1/ethereum-js".to_string(),
            chain_id: 1337,
            network_id: "5777".to_string(),
            accounts,
            balances,
            head: 2,
            failures: Vec::new(),
            http_status: None,
            null_blocks: false,
        }
    }
}

impl MockNodeConfig {
    /// Make `method` answer with a JSON-RPC error.
    pub fn fail(mut self, method: &str, code: i64, message: &str) -> Self {
        self.failures.push((method.to_string(), code, message.to_string()));
        self
    }
}

struct MockState {
    config: MockNodeConfig,
    requests: Mutex<Vec<String>>,
}

/// Running mock node. Shuts down on drop.
pub struct MockNode {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockNode {
    /// Start with the default ganache-like chain.
    pub async fn start() -> std::io::Result<Self> {
        Self::with_config(MockNodeConfig::default()).await
    }

    pub async fn with_config(config: MockNodeConfig) -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockState {
            config,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(state.clone());

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                tracing::warn!(error = %e, "mock node stopped with error");
            }
        });

        tracing::debug!(%addr, "mock node listening");

        Ok(Self {
            addr,
            state,
            shutdown: Some(tx),
            handle: Some(handle),
        })
    }

    /// HTTP endpoint of this node.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Methods received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().clone()
    }

    pub fn config(&self) -> &MockNodeConfig {
        &self.state.config
    }

    /// The block this node serves at `number`.
    pub fn block(&self, number: u64) -> Option<Block> {
        (number <= self.state.config.head).then(|| mock_block(number))
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn handle_rpc(State(state): State<Arc<MockState>>, Json(request): Json<Value>) -> Response {
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let params = request.get("params").cloned().unwrap_or_else(|| json!([]));

    state.requests.lock().push(method.clone());

    if let Some(code) = state.config.http_status {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "node unavailable").into_response();
    }

    let outcome = match state.config.failures.iter().find(|(m, _, _)| *m == method) {
        Some((_, code, message)) => Err((*code, message.clone())),
        None => dispatch(&state.config, &method, &params),
    };

    let body = match outcome {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err((code, message)) => {
            json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
        }
    };
    Json(body).into_response()
}

fn dispatch(config: &MockNodeConfig, method: &str, params: &Value) -> Result<Value, (i64, String)> {
    match method {
        "web3_clientVersion" => Ok(json!(config.client_version)),
        "eth_chainId" => Ok(json!(quantity::format_u64(config.chain_id))),
        "net_version" => Ok(json!(config.network_id)),
        "eth_blockNumber" => Ok(json!(quantity::format_u64(config.head))),
        "eth_accounts" => Ok(json!(config.accounts)),
        "eth_getBalance" => {
            let address: Address = param(params, 0)?;
            let balance = config.balances.get(&address).copied().unwrap_or_default();
            Ok(json!(balance))
        }
        "eth_getBlockByNumber" => {
            let tag: String = param(params, 0)?;
            let full = params.get(1).and_then(Value::as_bool).unwrap_or(false);
            let id: BlockId = tag.parse().map_err(|e| (-32602, format!("{}", e)))?;

            let block = match id {
                _ if config.null_blocks => None,
                BlockId::Latest | BlockId::Safe | BlockId::Finalized => Some(mock_block(config.head)),
                BlockId::Earliest => Some(mock_block(0)),
                BlockId::Pending => {
                    let mut block = mock_block(config.head + 1);
                    block.number = None;
                    block.hash = None;
                    block.nonce = None;
                    block.logs_bloom = None;
                    Some(block)
                }
                BlockId::Number(n) if n <= config.head => Some(mock_block(n)),
                BlockId::Number(_) => None,
            };

            Ok(match block {
                Some(mut block) => {
                    if full {
                        block.transactions = expand_transactions(&block, config);
                    }
                    json!(block)
                }
                None => Value::Null,
            })
        }
        other => Err((-32601, format!("Method {} not found", other))),
    }
}

fn param<T: serde::de::DeserializeOwned>(params: &Value, index: usize) -> Result<T, (i64, String)> {
    params
        .get(index)
        .cloned()
        .ok_or_else(|| (-32602, format!("missing param {}", index)))
        .and_then(|v| serde_json::from_value(v).map_err(|e| (-32602, e.to_string())))
}

fn hash_of(tag: u8, number: u64) -> Hash {
    let mut bytes = [0u8; 32];
    bytes[0] = tag;
    bytes[24..].copy_from_slice(&number.to_be_bytes());
    Hash::from_bytes(bytes)
}

/// Block `number` of the mock chain: one transfer per block after genesis.
pub fn mock_block(number: u64) -> Block {
    let transactions = if number == 0 {
        Vec::new()
    } else {
        vec![hash_of(0x7e, number)]
    };

    Block {
        number: Some(number),
        hash: Some(hash_of(0xb1, number)),
        parent_hash: if number == 0 {
            Hash::ZERO
        } else {
            hash_of(0xb1, number - 1)
        },
        nonce: Some("0x0000000000000000".to_string()),
        mix_hash: Some(Hash::ZERO),
        sha3_uncles: hash_of(0x1d, 0),
        logs_bloom: Some(format!("0x{}", "0".repeat(512))),
        transactions_root: hash_of(0x56, number),
        state_root: hash_of(0x9c, number),
        receipts_root: hash_of(0x56, number),
        miner: Some(Address::ZERO),
        difficulty: U256::ZERO,
        total_difficulty: Some(U256::ZERO),
        extra_data: "0x".to_string(),
        size: Some(0x3e8),
        gas_limit: 30_000_000,
        gas_used: if number == 0 { 0 } else { 21_000 },
        timestamp: 1_700_000_000 + number * 12,
        base_fee_per_gas: Some(U256::from(875_000_000u64)),
        transactions: BlockTransactions::Hashes(transactions),
        uncles: Vec::new(),
        extra: Default::default(),
    }
}

fn expand_transactions(block: &Block, config: &MockNodeConfig) -> BlockTransactions {
    let from = config.accounts.first().copied().unwrap_or_default();
    let to = config.accounts.get(1).copied().unwrap_or_default();

    let full = block
        .transactions
        .hashes()
        .into_iter()
        .map(|hash| {
            json!({
                "hash": hash,
                "blockHash": block.hash,
                "blockNumber": block.number.map(quantity::format_u64),
                "from": from,
                "to": to,
                "value": U256::ETHER,
                "gas": "0x5208",
                "nonce": "0x0",
                "input": "0x"
            })
        })
        .collect();

    BlockTransactions::Full(full)
}
