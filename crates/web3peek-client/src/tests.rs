//! Client tests against the in-process mock node.

use crate::mock::{MockNode, MockNodeConfig};
use crate::{probe, Client, ClientConfig, ClientError};
use std::time::Duration;
use web3peek_types::{Address, BlockId, BlockTransactions, U256};

/// An endpoint nothing listens on.
async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_is_connected() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    assert!(client.is_connected().await);
    assert_eq!(node.requests(), vec!["web3_clientVersion"]);
}

#[tokio::test]
async fn test_is_connected_false_when_unreachable() {
    let client = Client::new(dead_endpoint().await).unwrap();
    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn test_is_connected_false_on_node_error() {
    let config = MockNodeConfig::default().fail("web3_clientVersion", -32603, "internal");
    let node = MockNode::with_config(config).await.unwrap();
    let client = Client::new(node.url()).unwrap();

    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn test_latest_block() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let block = client.latest_block().await.unwrap();
    assert_eq!(Some(block.clone()), node.block(2));
    assert_eq!(block.number, Some(2));
    assert_eq!(block.transaction_count(), 1);
}

#[tokio::test]
async fn test_get_block_variants() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let genesis = client.get_block(BlockId::Earliest, false).await.unwrap().unwrap();
    assert_eq!(genesis.number, Some(0));
    assert!(genesis.transactions.is_empty());

    let pending = client.get_block(BlockId::Pending, false).await.unwrap().unwrap();
    assert!(pending.is_pending());

    let missing = client.get_block(BlockId::Number(99), false).await.unwrap();
    assert!(missing.is_none());

    let full = client.get_block(BlockId::Number(1), true).await.unwrap().unwrap();
    assert!(matches!(full.transactions, BlockTransactions::Full(ref txs) if txs.len() == 1));
}

#[tokio::test]
async fn test_latest_block_null_is_not_found() {
    let node = MockNode::with_config(MockNodeConfig {
        null_blocks: true,
        ..Default::default()
    })
    .await
    .unwrap();
    let client = Client::new(node.url()).unwrap();

    let err = client.latest_block().await.unwrap_err();
    assert!(matches!(err, ClientError::BlockNotFound(BlockId::Latest)));
    assert_eq!(err.to_string(), "Block not found: latest");
}

#[tokio::test]
async fn test_accounts() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let accounts = client.accounts().await.unwrap();
    assert_eq!(accounts, node.config().accounts);
}

#[tokio::test]
async fn test_empty_accounts() {
    let node = MockNode::with_config(MockNodeConfig {
        accounts: Vec::new(),
        ..Default::default()
    })
    .await
    .unwrap();
    let client = Client::new(node.url()).unwrap();

    assert!(client.accounts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_network_queries() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    assert_eq!(client.chain_id().await.unwrap(), 1337);
    assert_eq!(client.net_version().await.unwrap(), "5777");
    assert_eq!(client.block_number().await.unwrap(), 2);
    assert!(client.client_version().await.unwrap().starts_with("Ganache"));
}

#[tokio::test]
async fn test_get_balance() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let funded = node.config().accounts[0];
    let balance = client.get_balance(&funded, BlockId::Latest).await.unwrap();
    assert_eq!(balance, U256::from(100_000_000_000_000_000_000u128));

    let stranger = Address::from_bytes([0xee; 20]);
    let balance = client.get_balance(&stranger, BlockId::Latest).await.unwrap();
    assert_eq!(balance, U256::ZERO);
}

#[tokio::test]
async fn test_rpc_error_surfaces_code() {
    let config = MockNodeConfig::default().fail("eth_accounts", -32000, "accounts locked");
    let node = MockNode::with_config(config).await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let err = client.accounts().await.unwrap_err();
    assert_eq!(err.rpc_code(), Some(-32000));
    assert!(err.to_string().contains("accounts locked"));
}

#[tokio::test]
async fn test_unknown_method() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let err = client
        .request::<String>("eth_unknown", serde_json::json!([]))
        .await
        .unwrap_err();
    assert_eq!(err.rpc_code(), Some(-32601));
}

#[tokio::test]
async fn test_http_status_error() {
    let node = MockNode::with_config(MockNodeConfig {
        http_status: Some(503),
        ..Default::default()
    })
    .await
    .unwrap();
    let client = Client::new(node.url()).unwrap();

    let err = client.accounts().await.unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus(503)));
}

#[tokio::test]
async fn test_transport_error_when_unreachable() {
    let config = ClientConfig::new(dead_endpoint().await).with_timeout(Duration::from_secs(2));
    let client = Client::with_config(config).unwrap();

    let err = client.latest_block().await.unwrap_err();
    assert!(err.is_unreachable());
}

#[tokio::test]
async fn test_request_ids_increase() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();
    let clone = client.clone();

    client.chain_id().await.unwrap();
    clone.chain_id().await.unwrap();
    assert_eq!(client.next_id.load(std::sync::atomic::Ordering::Relaxed), 3);
}

#[tokio::test]
async fn test_probe_sequence() {
    let node = MockNode::start().await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let report = probe(&client).await.unwrap();
    assert!(report.connected);
    assert_eq!(report.block.number, Some(2));
    assert_eq!(report.accounts.len(), 3);
    assert_eq!(
        node.requests(),
        vec!["web3_clientVersion", "eth_getBlockByNumber", "eth_accounts"]
    );
}

#[tokio::test]
async fn test_probe_fails_when_block_query_fails() {
    let config = MockNodeConfig::default().fail("eth_getBlockByNumber", -32603, "db closed");
    let node = MockNode::with_config(config).await.unwrap();
    let client = Client::new(node.url()).unwrap();

    let err = probe(&client).await.unwrap_err();
    assert_eq!(err.rpc_code(), Some(-32603));
    // Accounts are never queried after the failure.
    assert!(!node.requests().contains(&"eth_accounts".to_string()));
}

#[tokio::test]
async fn test_probe_unreachable_node() {
    let client = Client::new(dead_endpoint().await).unwrap();
    let err = probe(&client).await.unwrap_err();
    assert!(err.is_unreachable());
}
