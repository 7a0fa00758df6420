//! Token amount formatting
//!
//! Converts fixed-point integer token amounts to and from human-readable
//! decimal strings. Everything works on the integer's decimal digits or on
//! `U256` arithmetic; floating point cannot represent 18-decimal quantities
//! exactly and is never used here.

use alloy::primitives::{Address, U256};
use std::fmt::Display;

use crate::error::AmountError;

/// Decimal count of both the V1 and V2 tokens
pub const TOKEN_DECIMALS: u8 = 18;

/// Fractional digits shown by [`format_display_amount`]
pub const DISPLAY_DECIMALS: u8 = 4;

/// Render a raw amount as a decimal string, trimming trailing zeros.
///
/// `1234560000000000000` with 18 decimals becomes `"1.23456"`, `0` becomes `"0"`.
pub fn to_decimal_string(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{:0>width$}", digits, width = decimals + 1)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Parse a human-entered decimal string into a raw amount.
///
/// Input without any digit (`""`, `"."`, an emptied text box) is zero.
pub fn from_decimal_string(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let input = input.trim();
    if !input.chars().any(|c| c.is_ascii_digit()) {
        return Ok(U256::ZERO);
    }
    let mut parts = input.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");

    if fraction.contains('.') {
        return Err(AmountError::MultipleDecimalPoints);
    }
    if let Some(c) = whole.chars().chain(fraction.chars()).find(|c| !c.is_ascii_digit()) {
        return Err(AmountError::InvalidCharacter(c));
    }
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals {
            found: fraction.len(),
            max: decimals,
        });
    }
    let digits = format!(
        "{}{:0<width$}",
        whole,
        fraction,
        width = decimals as usize
    );
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| AmountError::Overflow)
}

/// Insert `,` every three digits of the integer part.
///
/// Any fractional part, decimal point included, is left untouched:
/// `"1234.56789"` becomes `"1,234.56789"`.
pub fn with_thousands_separators(value: impl Display) -> String {
    let text = value.to_string();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let split = rest.find('.').unwrap_or(rest.len());
    let (whole, fraction) = rest.split_at(split);

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, fraction)
}

/// Render an amount for display: grouped integer part and exactly four
/// fractional digits, rounded half-up.
///
/// Display only; never feed the result back into a transaction.
pub fn format_display_amount(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return with_thousands_separators(amount);
    }

    let (whole, fraction) = if decimals > DISPLAY_DECIMALS {
        let divisor = U256::from(10u64).pow(U256::from(decimals - DISPLAY_DECIMALS));
        let quotient = amount / divisor;
        let remainder = amount % divisor;
        // remainder < divisor, so this compares 2 * remainder with divisor without overflow
        let scaled = if remainder >= divisor - remainder {
            quotient + U256::from(1u8)
        } else {
            quotient
        };
        let shown = U256::from(10u64).pow(U256::from(DISPLAY_DECIMALS));
        (scaled / shown, scaled % shown)
    } else {
        // Fewer decimals than shown: split first, then pad the fraction
        let unit = U256::from(10u64).pow(U256::from(decimals));
        let pad = U256::from(10u64).pow(U256::from(DISPLAY_DECIMALS - decimals));
        (amount / unit, (amount % unit) * pad)
    };
    format!(
        "{}.{:0>width$}",
        with_thousands_separators(whole),
        fraction.to_string(),
        width = DISPLAY_DECIMALS as usize
    )
}

/// Shorten an address for display: `0x1234...abcd`
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
