use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// 256-bit unsigned integer for balances, difficulty and other large quantities.
///
/// Stored as 4 x u64 in little-endian limb order.
/// Only the operations needed to decode and render node values are provided;
/// all of them are checked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U256([u64; 4]); // [low, mid_low, mid_high, high] little-endian limbs

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                std::cmp::Ordering::Equal => continue,
                ord => return ord,
            }
        }
        std::cmp::Ordering::Equal
    }
}

impl U256 {
    pub const ZERO: Self = Self([0, 0, 0, 0]);
    pub const ONE: Self = Self([1, 0, 0, 0]);
    pub const MAX: Self = Self([u64::MAX, u64::MAX, u64::MAX, u64::MAX]);

    /// One ether in wei (10^18)
    pub const ETHER: Self = Self([1_000_000_000_000_000_000, 0, 0, 0]);

    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self(limbs)
    }

    pub const fn as_limbs(&self) -> &[u64; 4] {
        &self.0
    }

    /// Create from a u64 value
    pub const fn from_u64(val: u64) -> Self {
        Self([val, 0, 0, 0])
    }

    /// Create from a u128 value
    pub const fn from_u128(val: u128) -> Self {
        let low = val as u64;
        let high = (val >> 64) as u64;
        Self([low, high, 0, 0])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0, 0, 0]
    }

    /// Checked addition
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let mut result = [0u64; 4];
        let mut carry = 0u64;

        for i in 0..4 {
            let (sum1, overflow1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum2, overflow2) = sum1.overflowing_add(carry);
            result[i] = sum2;
            carry = (overflow1 as u64) + (overflow2 as u64);
        }

        if carry != 0 {
            None
        } else {
            Some(Self(result))
        }
    }

    /// Checked multiplication by a single limb
    pub fn checked_mul_u64(&self, rhs: u64) -> Option<Self> {
        let mut result = [0u64; 4];
        let mut carry = 0u128;

        for i in 0..4 {
            let product = (self.0[i] as u128) * (rhs as u128) + carry;
            result[i] = product as u64;
            carry = product >> 64;
        }

        if carry != 0 {
            None
        } else {
            Some(Self(result))
        }
    }

    /// Divide by a single limb, returning quotient and remainder.
    /// Returns `None` when `rhs` is zero.
    pub fn div_rem_u64(&self, rhs: u64) -> Option<(Self, u64)> {
        if rhs == 0 {
            return None;
        }

        let mut quotient = [0u64; 4];
        let mut rem = 0u128;

        for i in (0..4).rev() {
            let cur = (rem << 64) | self.0[i] as u128;
            quotient[i] = (cur / rhs as u128) as u64;
            rem = cur % rhs as u128;
        }

        Some((Self(quotient), rem as u64))
    }

    /// 10^exp, or `None` past 10^77.
    pub fn exp10(exp: u32) -> Option<Self> {
        let mut result = Self::ONE;
        for _ in 0..exp {
            result = result.checked_mul_u64(10)?;
        }
        Some(result)
    }

    /// Convert to big-endian bytes
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            let limb_bytes = self.0[3 - i].to_be_bytes();
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb_bytes);
        }
        bytes
    }

    /// Convert from big-endian bytes
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let mut limb_bytes = [0u8; 8];
            limb_bytes.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            limbs[3 - i] = u64::from_be_bytes(limb_bytes);
        }
        Self(limbs)
    }

    /// Parse from decimal string
    pub fn from_decimal_str(s: &str) -> Result<Self, TypesError> {
        if s.is_empty() {
            return Err(TypesError::InvalidNumber(s.to_string()));
        }

        let mut result = Self::ZERO;

        for c in s.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| TypesError::InvalidNumber(s.to_string()))?;
            result = result
                .checked_mul_u64(10)
                .and_then(|r| r.checked_add(&Self::from_u64(digit as u64)))
                .ok_or(TypesError::U256Overflow)?;
        }

        Ok(result)
    }

    /// Parse an Ethereum hex quantity (`0x`-prefixed, up to 64 digits).
    pub fn from_quantity(s: &str) -> Result<Self, TypesError> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| TypesError::InvalidQuantity(s.to_string()))?;

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypesError::InvalidQuantity(s.to_string()));
        }

        let digits = digits.trim_start_matches('0');
        if digits.len() > 64 {
            return Err(TypesError::U256Overflow);
        }

        let mut limbs = [0u64; 4];
        let mut end = digits.len();
        let mut i = 0;
        while end > 0 {
            let start = end.saturating_sub(16);
            limbs[i] = u64::from_str_radix(&digits[start..end], 16)?;
            end = start;
            i += 1;
        }

        Ok(Self(limbs))
    }

    /// Render as an Ethereum hex quantity: no leading zeros, `0x0` for zero.
    pub fn to_quantity(&self) -> String {
        let top = match (0..4).rev().find(|&i| self.0[i] != 0) {
            Some(top) => top,
            None => return "0x0".to_string(),
        };

        let mut s = format!("0x{:x}", self.0[top]);
        for i in (0..top).rev() {
            s.push_str(&format!("{:016x}", self.0[i]));
        }
        s
    }

    /// Convert to u128 (returns `None` if the value doesn't fit)
    pub fn to_u128(&self) -> Option<u128> {
        u128::try_from(*self).ok()
    }
}

impl From<u64> for U256 {
    fn from(val: u64) -> Self {
        Self::from_u64(val)
    }
}

impl From<u128> for U256 {
    fn from(val: u128) -> Self {
        Self::from_u128(val)
    }
}

impl TryFrom<U256> for u64 {
    type Error = TypesError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        if value.0[1] != 0 || value.0[2] != 0 || value.0[3] != 0 {
            Err(TypesError::U256Overflow)
        } else {
            Ok(value.0[0])
        }
    }
}

impl TryFrom<U256> for u128 {
    type Error = TypesError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        if value.0[2] != 0 || value.0[3] != 0 {
            Err(TypesError::U256Overflow)
        } else {
            Ok((value.0[1] as u128) << 64 | value.0[0] as u128)
        }
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.pad("0");
        }

        // Peel off 19 decimal digits per division.
        const CHUNK: u64 = 10_000_000_000_000_000_000;
        let mut chunks = Vec::new();
        let mut n = *self;
        while !n.is_zero() {
            let (q, r) = n.div_rem_u64(CHUNK).ok_or(fmt::Error)?;
            chunks.push(r);
            n = q;
        }

        let mut s = String::new();
        for (i, chunk) in chunks.iter().rev().enumerate() {
            if i == 0 {
                s.push_str(&chunk.to_string());
            } else {
                s.push_str(&format!("{:019}", chunk));
            }
        }
        f.pad(&s)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self)
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_quantity())
    }
}

impl FromStr for U256 {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") {
            Self::from_quantity(s)
        } else {
            Self::from_decimal_str(s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_quantity_zero() {
        assert_eq!(U256::ZERO.to_quantity(), "0x0");
        assert_eq!(U256::from_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(U256::from_quantity("0x0000").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_quantity_multi_limb() {
        let v = U256::from_limbs([0x1, 0x2, 0, 0]);
        assert_eq!(v.to_quantity(), "0x20000000000000001");
        assert_eq!(U256::from_quantity("0x20000000000000001").unwrap(), v);
    }

    #[test]
    fn test_quantity_rejects_malformed() {
        assert!(U256::from_quantity("0x").is_err());
        assert!(U256::from_quantity("1234").is_err());
        assert!(U256::from_quantity("0x+1").is_err());
        assert!(U256::from_quantity("0xg1").is_err());
        assert_eq!(
            U256::from_quantity(&format!("0x1{}", "0".repeat(64))),
            Err(TypesError::U256Overflow)
        );
    }

    #[test]
    fn test_quantity_max() {
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(U256::from_quantity(&max).unwrap(), U256::MAX);
        assert_eq!(U256::MAX.to_quantity(), max);
    }

    #[test]
    fn test_display_max() {
        assert_eq!(
            U256::MAX.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_display_chunk_boundary() {
        // 10^19 is exactly one chunk; the low chunk must be zero-padded.
        assert_eq!(U256::exp10(19).unwrap().to_string(), "10000000000000000000");
        assert_eq!(U256::exp10(38).unwrap().to_string(), format!("1{}", "0".repeat(38)));
    }

    #[test]
    fn test_exp10_overflow() {
        assert!(U256::exp10(77).is_some());
        assert!(U256::exp10(78).is_none());
    }

    #[test]
    fn test_div_rem_by_zero() {
        assert!(U256::ONE.div_rem_u64(0).is_none());
    }

    #[test]
    fn test_from_str_dispatch() {
        assert_eq!("100".parse::<U256>().unwrap(), U256::from(100u64));
        assert_eq!("0x64".parse::<U256>().unwrap(), U256::from(100u64));
        assert!("".parse::<U256>().is_err());
        assert!("12a".parse::<U256>().is_err());
    }

    proptest! {
        #[test]
        fn display_matches_u128(v in any::<u128>()) {
            prop_assert_eq!(U256::from(v).to_string(), v.to_string());
        }

        #[test]
        fn quantity_matches_u128_hex(v in any::<u128>()) {
            prop_assert_eq!(U256::from(v).to_quantity(), format!("0x{:x}", v));
        }

        #[test]
        fn div_rem_matches_u128(v in any::<u128>(), d in 1u64..) {
            let (q, r) = U256::from(v).div_rem_u64(d).unwrap();
            prop_assert_eq!(q.to_u128(), Some(v / d as u128));
            prop_assert_eq!(r as u128, v % d as u128);
        }
    }
}
