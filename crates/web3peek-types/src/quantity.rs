//! Ethereum hex quantity codec.
//!
//! Integers on the wire are `0x`-prefixed hex with no leading zeros
//! (`0x0` for zero). Decoding is lenient about leading zeros since some
//! development nodes pad them; encoding never emits them.

use crate::error::TypesError;

/// Parse a hex quantity into a u64.
pub fn parse_u64(s: &str) -> Result<u64, TypesError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| TypesError::InvalidQuantity(s.to_string()))?;

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TypesError::InvalidQuantity(s.to_string()));
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }

    u64::from_str_radix(digits, 16).map_err(|_| TypesError::InvalidQuantity(s.to_string()))
}

/// Format a u64 as a hex quantity.
pub fn format_u64(value: u64) -> String {
    format!("0x{:x}", value)
}

/// Serde adapter for `u64` fields encoded as hex quantities.
pub mod hex_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_u64(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_u64(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for nullable `u64` quantity fields (pending blocks).
pub mod hex_u64_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&super::format_u64(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        s.map(|s| super::parse_u64(&s))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
