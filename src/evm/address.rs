//! EVM addresses.

use crate::error::{Error, Result};
use alloy_primitives::{Address, hex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated 20-byte EVM address.
///
/// Accepts `0x`-prefixed hex in any case; mixed-case input must carry a valid
/// EIP-55 checksum. The API expects the [`lowercase`](EvmAddress::lowercase)
/// form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvmAddress(Address);

impl EvmAddress {
    /// Parse and validate an address.
    pub fn create(value: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidEvmAddress {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .ok_or_else(|| invalid("missing 0x prefix"))?;
        if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("expected 40 hex digits"));
        }

        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        if has_upper && has_lower {
            let checksummed = format!("0x{digits}");
            return Address::parse_checksummed(&checksummed, None)
                .map(Self)
                .map_err(|_| invalid("bad address checksum"));
        }

        Address::from_str(digits)
            .map(Self)
            .map_err(|err| invalid(&err.to_string()))
    }

    /// `0x`-prefixed lowercase hex, the wire form.
    pub fn lowercase(&self) -> String {
        format!("0x{}", hex::encode(self.0.as_slice()))
    }

    /// EIP-55 checksummed form.
    pub fn checksum(&self) -> String {
        self.0.to_checksum(None)
    }

    pub fn as_address(&self) -> &Address {
        &self.0
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksum())
    }
}

impl FromStr for EvmAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::create(s)
    }
}

impl From<Address> for EvmAddress {
    fn from(value: Address) -> Self {
        Self(value)
    }
}

impl From<EvmAddress> for Address {
    fn from(value: EvmAddress) -> Self {
        value.0
    }
}

impl Serialize for EvmAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.lowercase())
    }
}

impl<'de> Deserialize<'de> for EvmAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::create(&value).map_err(serde::de::Error::custom)
    }
}

/// An address given either as a validated [`EvmAddress`] or as raw text that is
/// validated when the request is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvmAddressish {
    Address(EvmAddress),
    Raw(String),
}

impl EvmAddressish {
    pub fn resolve(self) -> Result<EvmAddress> {
        match self {
            Self::Address(address) => Ok(address),
            Self::Raw(value) => EvmAddress::create(&value),
        }
    }
}

impl From<EvmAddress> for EvmAddressish {
    fn from(value: EvmAddress) -> Self {
        Self::Address(value)
    }
}

impl From<Address> for EvmAddressish {
    fn from(value: Address) -> Self {
        Self::Address(value.into())
    }
}

impl From<&str> for EvmAddressish {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for EvmAddressish {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VITALIK_CHECKSUM: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
    const VITALIK_LOWER: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

    #[test]
    fn lowercase_is_canonical_for_every_accepted_case() {
        let upper = format!("0x{}", &VITALIK_LOWER[2..].to_uppercase());
        for input in [VITALIK_CHECKSUM, VITALIK_LOWER, upper.as_str()] {
            let address = EvmAddress::create(input).expect("valid address");
            assert_eq!(address.lowercase(), VITALIK_LOWER, "input {input}");
        }
    }

    #[test]
    fn checksum_form_matches_eip55() {
        let address = EvmAddress::create(VITALIK_LOWER).expect("valid address");
        assert_eq!(address.checksum(), VITALIK_CHECKSUM);
        assert_eq!(address.to_string(), VITALIK_CHECKSUM);
    }

    #[test]
    fn bad_checksum_is_rejected() {
        // Flip the case of one checksummed letter.
        let tampered = VITALIK_CHECKSUM.replacen("dA", "Da", 1);
        let err = EvmAddress::create(&tampered).expect_err("should fail");
        assert!(matches!(err, Error::InvalidEvmAddress { .. }));
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for input in [
            "",
            "0x",
            "d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "0xd8da6bf26964af9d7eed9e03e53415d37aa9604",
            "0xd8da6bf26964af9d7eed9e03e53415d37aa960455",
            "0xz8da6bf26964af9d7eed9e03e53415d37aa96045",
        ] {
            assert!(EvmAddress::create(input).is_err(), "input {input:?}");
        }
    }

    #[test]
    fn addressish_resolves_raw_text() {
        let ish: EvmAddressish = VITALIK_CHECKSUM.into();
        assert_eq!(ish.resolve().expect("valid").lowercase(), VITALIK_LOWER);

        let ish: EvmAddressish = "nope".to_string().into();
        assert!(ish.resolve().is_err());
    }

    #[test]
    fn serde_uses_lowercase_form() {
        let address = EvmAddress::create(VITALIK_CHECKSUM).expect("valid");
        let json = serde_json::to_value(address).expect("serialize");
        assert_eq!(json, VITALIK_LOWER);

        let back: EvmAddress = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, address);
    }
}
