//! Block record as returned by `eth_getBlockByNumber`.

use crate::quantity::{hex_u64, hex_u64_opt};
use crate::{Address, Hash, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Block header fields plus the transaction list.
///
/// `number`, `hash`, `nonce` and `logsBloom` are `null` for pending blocks.
/// Fields this type does not model (`withdrawals`, `blobGasUsed`, ...) are
/// kept verbatim in `extra` so a block can be printed back in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default, with = "hex_u64_opt")]
    pub number: Option<u64>,
    #[serde(default)]
    pub hash: Option<Hash>,
    pub parent_hash: Hash,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub mix_hash: Option<Hash>,
    pub sha3_uncles: Hash,
    #[serde(default)]
    pub logs_bloom: Option<String>,
    pub transactions_root: Hash,
    pub state_root: Hash,
    pub receipts_root: Hash,
    #[serde(default)]
    pub miner: Option<Address>,
    #[serde(default)]
    pub difficulty: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_difficulty: Option<U256>,
    #[serde(default)]
    pub extra_data: String,
    #[serde(default, with = "hex_u64_opt")]
    pub size: Option<u64>,
    #[serde(with = "hex_u64")]
    pub gas_limit: u64,
    #[serde(with = "hex_u64")]
    pub gas_used: u64,
    #[serde(with = "hex_u64")]
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub transactions: BlockTransactions,
    #[serde(default)]
    pub uncles: Vec<Hash>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Block {
    /// Pending blocks have no number yet.
    pub fn is_pending(&self) -> bool {
        self.number.is_none()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Percentage of the gas limit consumed.
    pub fn gas_used_ratio(&self) -> f64 {
        if self.gas_limit == 0 {
            return 0.0;
        }
        self.gas_used as f64 / self.gas_limit as f64 * 100.0
    }
}

/// Transactions in a block: hashes only, or full objects when requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Hashes(Vec<Hash>),
    Full(Vec<serde_json::Value>),
}

impl Default for BlockTransactions {
    fn default() -> Self {
        BlockTransactions::Hashes(Vec::new())
    }
}

impl BlockTransactions {
    pub fn len(&self) -> usize {
        match self {
            BlockTransactions::Hashes(h) => h.len(),
            BlockTransactions::Full(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transaction hashes, read from the `hash` field of full objects.
    pub fn hashes(&self) -> Vec<Hash> {
        match self {
            BlockTransactions::Hashes(h) => h.clone(),
            BlockTransactions::Full(t) => t
                .iter()
                .filter_map(|tx| tx.get("hash")?.as_str()?.parse().ok())
                .collect(),
        }
    }
}
