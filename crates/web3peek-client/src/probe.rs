//! Connect, check, and read the chain head and accounts.

use serde::Serialize;
use web3peek_types::{Address, Block};

use crate::client::Client;
use crate::error::Result;

/// Outcome of one probe run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub connected: bool,
    pub block: Block,
    pub accounts: Vec<Address>,
}

/// Run the three queries in order: connectivity, latest block, accounts.
///
/// The connectivity flag is reported as-is; it does not short-circuit the
/// run. A failed block or account query ends the probe with that error.
pub async fn probe(client: &Client) -> Result<ProbeReport> {
    let connected = client.is_connected().await;
    tracing::info!(url = client.url(), connected, "connectivity checked");

    let block = client.latest_block().await?;
    tracing::info!(
        number = ?block.number,
        transactions = block.transaction_count(),
        "fetched latest block"
    );

    let accounts = client.accounts().await?;
    tracing::info!(count = accounts.len(), "fetched accounts");

    Ok(ProbeReport {
        connected,
        block,
        accounts,
    })
}
