//! web3peek Types - Wire-level types for Ethereum-style JSON-RPC nodes.
//!
//! This crate provides the values a node hands back over JSON-RPC:
//! - Addresses (20-byte, `0x` hex)
//! - Hashes (32-byte, `0x` hex)
//! - U256 (256-bit unsigned integer)
//! - Block identifiers and block records
//! - Hex quantity codecs and wei unit formatting

pub mod address;
pub mod hash;
pub mod u256;
pub mod quantity;
pub mod block_id;
pub mod block;
pub mod units;
pub mod error;

mod serialization;

pub use address::Address;
pub use hash::Hash;
pub use u256::U256;
pub use block_id::BlockId;
pub use block::{Block, BlockTransactions};
pub use error::TypesError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, Block, BlockId, BlockTransactions, Hash, TypesError, U256};
}
