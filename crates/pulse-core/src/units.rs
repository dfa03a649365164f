//! WPU unit conversion
//!
//! Amounts are carried internally as `u128` base units with 18 decimals,
//! the same fixed-point convention the token contract uses. Whole-unit
//! strings only appear at the edges (CLI input, console output).

use crate::error::{Error, Result};

/// Number of fractional digits in a WPU amount
pub const WPU_DECIMALS: usize = 18;

/// Base units per whole WPU (10^18)
pub const WEI_PER_WPU: u128 = 1_000_000_000_000_000_000;

/// Parse a decimal whole-unit string (e.g. "1.5") into base units
///
/// Rejects signs, exponents, more than 18 fractional digits, values that do
/// not fit in a `u128`, and zero.
pub fn parse_wpu(input: &str) -> Result<u128> {
    let s = input.trim();
    if s.is_empty() {
        return Err(Error::InvalidAmount("amount is empty".to_string()));
    }

    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
        return Err(Error::InvalidAmount(format!(
            "'{}' is not a decimal number",
            s
        )));
    }

    if frac.len() > WPU_DECIMALS {
        return Err(Error::InvalidAmount(format!(
            "'{}' has more than {} decimal places",
            s, WPU_DECIMALS
        )));
    }

    let overflow = || Error::Overflow(format!("'{}' is too large", s));

    let whole_units: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let frac_units: u128 = if frac.is_empty() {
        0
    } else {
        format!("{:0<width$}", frac, width = WPU_DECIMALS)
            .parse()
            .map_err(|_| overflow())?
    };

    let total = whole_units
        .checked_mul(WEI_PER_WPU)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(overflow)?;

    if total == 0 {
        return Err(Error::InvalidAmount(
            "Amount must be a positive number".to_string(),
        ));
    }

    Ok(total)
}

/// Format base units as whole WPU, dropping trailing fractional zeros
///
/// `11 * WEI_PER_WPU` formats as "11", `WEI_PER_WPU / 2` as "0.5".
pub fn format_wpu(amount: u128) -> String {
    let whole = amount / WEI_PER_WPU;
    let frac = amount % WEI_PER_WPU;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = WPU_DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Convert base units to an approximate whole-unit float
pub fn to_whole_units(amount: u128) -> f64 {
    let whole = (amount / WEI_PER_WPU) as f64;
    let frac = (amount % WEI_PER_WPU) as f64 / WEI_PER_WPU as f64;
    whole + frac
}
