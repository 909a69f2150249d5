//! Unit formatting for native-currency amounts.

use alloy::primitives::U256;

use crate::ethereum::constants::ETHER_DECIMALS;

/// Format a U256 value with decimals, trimming trailing zeros.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 || value.is_zero() {
        return digits;
    }

    let (integer, fraction) = if digits.len() > decimals {
        let (integer, fraction) = digits.split_at(digits.len() - decimals);
        (integer.to_string(), fraction.to_string())
    } else {
        ("0".to_string(), format!("{}{}", "0".repeat(decimals - digits.len()), digits))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// Format a wei amount as ether, always keeping one fractional digit.
pub fn format_ether(wei: U256) -> String {
    let formatted = format_units(wei, ETHER_DECIMALS);
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}
