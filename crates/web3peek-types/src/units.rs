//! Wei unit conversion.

use crate::error::TypesError;
use crate::U256;

/// Decimals of one ether.
pub const ETHER_DECIMALS: u32 = 18;

/// Decimals of one gwei.
pub const GWEI_DECIMALS: u32 = 9;

/// Render an integer amount with `decimals` implied decimal places.
/// Trailing zeros of the fraction are trimmed: `1500000000000000000` with
/// 18 decimals is `"1.5"`, one ether is `"1"`.
pub fn format_units(value: &U256, decimals: u32) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits;
    }

    let (int_part, frac_part) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Format wei as ether.
pub fn format_ether(wei: &U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Parse a decimal amount (`"1.5"`) into its integer base unit.
pub fn parse_units(amount: &str, decimals: u32) -> Result<U256, TypesError> {
    let amount = amount.trim();
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(TypesError::InvalidNumber(amount.to_string()));
    }
    if frac_part.len() > decimals as usize {
        return Err(TypesError::InvalidNumber(format!(
            "{} has more than {} decimal places",
            amount, decimals
        )));
    }

    let padded = format!(
        "{}{:0<width$}",
        if int_part.is_empty() { "0" } else { int_part },
        frac_part,
        width = decimals as usize
    );
    U256::from_decimal_str(&padded)
}

/// Parse an ether amount into wei.
pub fn parse_ether(amount: &str) -> Result<U256, TypesError> {
    parse_units(amount, ETHER_DECIMALS)
}
