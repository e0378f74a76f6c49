use crate::error::TypesError;
use crate::quantity;
use std::fmt;
use std::str::FromStr;

/// Block selector passed to `eth_getBlockByNumber` and state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockId {
    /// Most recently sealed block
    #[default]
    Latest,
    /// Earliest block (genesis)
    Earliest,
    /// Pending block
    Pending,
    /// Safe block
    Safe,
    /// Finalized block
    Finalized,
    /// Block number
    Number(u64),
}

impl fmt::Display for BlockId {
    /// Renders the RPC parameter form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Latest => f.write_str("latest"),
            BlockId::Earliest => f.write_str("earliest"),
            BlockId::Pending => f.write_str("pending"),
            BlockId::Safe => f.write_str("safe"),
            BlockId::Finalized => f.write_str("finalized"),
            BlockId::Number(n) => f.write_str(&quantity::format_u64(*n)),
        }
    }
}

impl FromStr for BlockId {
    type Err = TypesError;

    /// Accepts block tags (any case), decimal numbers and hex quantities.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "latest" => Ok(BlockId::Latest),
            "earliest" => Ok(BlockId::Earliest),
            "pending" => Ok(BlockId::Pending),
            "safe" => Ok(BlockId::Safe),
            "finalized" => Ok(BlockId::Finalized),
            other if other.starts_with("0x") => quantity::parse_u64(other)
                .map(BlockId::Number)
                .map_err(|_| TypesError::InvalidBlockId(s.to_string())),
            other => other
                .parse::<u64>()
                .map(BlockId::Number)
                .map_err(|_| TypesError::InvalidBlockId(s.to_string())),
        }
    }
}

impl From<u64> for BlockId {
    fn from(n: u64) -> Self {
        BlockId::Number(n)
    }
}

impl serde::Serialize for BlockId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
