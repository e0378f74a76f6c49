//! web3peek Client - read-only JSON-RPC access to Ethereum-style nodes.
//!
//! ```no_run
//! use web3peek_client::Client;
//!
//! # async fn run() -> web3peek_client::Result<()> {
//! let client = Client::new("http://127.0.0.1:8545")?;
//! println!("{}", client.is_connected().await);
//! println!("{:?}", client.latest_block().await?);
//! println!("{:?}", client.accounts().await?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod jsonrpc;
pub mod probe;

#[cfg(any(test, feature = "mock-node"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::{Client, ClientConfig, DEFAULT_RPC_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use probe::{probe, ProbeReport};
pub use web3peek_types as types;
