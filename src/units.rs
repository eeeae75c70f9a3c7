//! Amount helpers for native balances.
//!
//! The APIs send amounts as decimal strings in base units (wei, lamports). The
//! helpers here parse them into integers and render human-readable decimals
//! without going through floating point.

use crate::error::{Error, Result};
use alloy_primitives::U256;

/// 1 SOL = 10^9 lamports.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Decimals of the native currency on EVM chains.
pub const ETHER_DECIMALS: u32 = 18;

/// Decimals of SOL.
pub const SOL_DECIMALS: u32 = 9;

/// Parse a decimal string into a `U256`.
pub fn parse_u256(field: &'static str, value: &str) -> Result<U256> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    U256::from_str_radix(value, 10).map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parse a `0x`-prefixed hex string into a `U256`.
pub fn parse_u256_hex(field: &'static str, value: &str) -> Result<U256> {
    let invalid = || Error::InvalidNumber {
        field,
        value: value.to_string(),
    };
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(invalid)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    U256::from_str_radix(digits, 16).map_err(|_| invalid())
}

/// Parse a decimal string into a `u64`.
pub fn parse_u64(field: &'static str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Render an integer amount given as decimal digits with `decimals` fractional
/// digits, trimming trailing zeros: `("1500000000", 9)` → `"1.5"`.
pub fn format_units(digits: &str, decimals: u32) -> String {
    let decimals = decimals as usize;
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let (whole, fraction) = if digits.len() > decimals {
        digits.split_at(digits.len() - decimals)
    } else {
        ("", digits)
    };
    let fraction = format!("{fraction:0>decimals$}");
    let fraction = fraction.trim_end_matches('0');

    let whole = if whole.is_empty() { "0" } else { whole };
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

// ---------------------------------------------------------------------------
// Native balances
// ---------------------------------------------------------------------------

/// A native EVM balance in wei.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct EvmNative(U256);

impl EvmNative {
    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    /// Create an [`EvmNative`] from whole ether (multiplied by 10^18).
    pub fn from_ether(ether: u64) -> Self {
        Self(U256::from(ether) * U256::from(10u64.pow(ETHER_DECIMALS)))
    }

    pub fn wei(&self) -> U256 {
        self.0
    }

    /// Exact decimal ether amount, e.g. `"0.25"`.
    pub fn to_ether_string(&self) -> String {
        format_units(&self.0.to_string(), ETHER_DECIMALS)
    }
}

/// A native Solana balance in lamports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SolNative(u64);

impl SolNative {
    pub fn from_lamports(lamports: u64) -> Self {
        Self(lamports)
    }

    /// Create a [`SolNative`] from whole SOL (multiplied by 10^9). `None` if
    /// the lamport amount does not fit in a `u64`.
    pub fn from_sol(sol: u64) -> Option<Self> {
        sol.checked_mul(LAMPORTS_PER_SOL).map(Self)
    }

    pub fn lamports(&self) -> u64 {
        self.0
    }

    /// Approximate value in SOL as `f64` (useful for display).
    pub fn as_sol_f64(&self) -> f64 {
        self.0 as f64 / LAMPORTS_PER_SOL as f64
    }

    /// Exact decimal SOL amount, e.g. `"1.5"`.
    pub fn to_sol_string(&self) -> String {
        format_units(&self.0.to_string(), SOL_DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_units_places_the_decimal_point() {
        assert_eq!(format_units("1500000000", 9), "1.5");
        assert_eq!(format_units("1000000000", 9), "1");
        assert_eq!(format_units("12345", 9), "0.000012345");
        assert_eq!(format_units("0", 9), "0");
        assert_eq!(format_units("000", 18), "0");
        assert_eq!(format_units("42", 0), "42");
    }

    #[test]
    fn parse_u256_accepts_values_above_u128() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_u256("allowance", &max).expect("parse"), U256::MAX);
    }

    #[test]
    fn parse_u256_rejects_garbage() {
        let err = parse_u256("allowance", "12.5").expect_err("should fail");
        assert!(matches!(
            err,
            Error::InvalidNumber {
                field: "allowance",
                ..
            }
        ));
        assert!(parse_u256("allowance", "").is_err());
        assert!(parse_u256("allowance", "0x10").is_err());
    }

    #[test]
    fn parse_u256_hex_requires_prefix_and_digits() {
        assert_eq!(parse_u256_hex("token_id", "0x4d2").expect("hex"), U256::from(1234u64));
        assert_eq!(parse_u256_hex("token_id", "0XFF").expect("hex"), U256::from(255u64));
        for input in ["4d2", "0x", "0x+1", "0xg1", ""] {
            assert!(parse_u256_hex("token_id", input).is_err(), "input {input:?}");
        }
    }

    #[test]
    fn parse_u64_rejects_negative() {
        assert!(parse_u64("lamports", "-1").is_err());
        assert_eq!(parse_u64("lamports", "5000").expect("parse"), 5000);
    }

    #[test]
    fn evm_native_from_ether() {
        let balance = EvmNative::from_ether(2);
        assert_eq!(balance.wei().to_string(), "2000000000000000000");
        assert_eq!(balance.to_ether_string(), "2");
    }

    #[test]
    fn evm_native_fractional_string() {
        let balance = EvmNative::from_wei(U256::from(250_000_000_000_000_000u64));
        assert_eq!(balance.to_ether_string(), "0.25");
    }

    #[test]
    fn sol_native_round_trip() {
        let balance = SolNative::from_lamports(1_500_000_000);
        assert_eq!(balance.lamports(), 1_500_000_000);
        assert_eq!(balance.to_sol_string(), "1.5");
        assert!((balance.as_sol_f64() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn sol_native_from_sol() {
        assert_eq!(
            SolNative::from_sol(3).map(|balance| balance.lamports()),
            Some(3 * LAMPORTS_PER_SOL)
        );
    }

    #[test]
    fn sol_native_from_sol_overflow_is_none() {
        assert_eq!(SolNative::from_sol(u64::MAX), None);
        assert_eq!(SolNative::from_sol(u64::MAX / LAMPORTS_PER_SOL + 1), None);
        assert!(SolNative::from_sol(u64::MAX / LAMPORTS_PER_SOL).is_some());
    }
}
