//! Solana addresses.

use crate::error::{Error, Result};
use regress::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Base58 alphabet (no `0`, `O`, `I`, `l`), 32 to 44 characters.
static BASE58_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("base58 address pattern is valid")
});

/// A base58-encoded Solana address. Addresses are case-sensitive and kept
/// verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolAddress(String);

impl SolAddress {
    pub fn create(value: &str) -> Result<Self> {
        if BASE58_ADDRESS.find(value).is_none() {
            return Err(Error::InvalidSolAddress(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SolAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SolAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::create(s)
    }
}

impl Serialize for SolAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SolAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::create(&value).map_err(serde::de::Error::custom)
    }
}

/// An address given as a validated [`SolAddress`] or as raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolAddressish {
    Address(SolAddress),
    Raw(String),
}

impl SolAddressish {
    pub fn resolve(self) -> Result<SolAddress> {
        match self {
            Self::Address(address) => Ok(address),
            Self::Raw(value) => SolAddress::create(&value),
        }
    }
}

impl From<SolAddress> for SolAddressish {
    fn from(value: SolAddress) -> Self {
        Self::Address(value)
    }
}

impl From<&str> for SolAddressish {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for SolAddressish {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_base58_addresses_verbatim() {
        for input in [
            "So11111111111111111111111111111111111111112",
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "11111111111111111111111111111111",
        ] {
            let address = SolAddress::create(input).expect("valid address");
            assert_eq!(address.as_str(), input);
        }
    }

    #[test]
    fn rejects_non_base58_and_bad_lengths() {
        for input in [
            "",
            "So111111111111111111111111111",
            "0o11111111111111111111111111111111111111112",
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1vEPjF",
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDtl",
            "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
        ] {
            assert!(SolAddress::create(input).is_err(), "input {input:?}");
        }
    }

    #[test]
    fn addressish_resolves() {
        let ish: SolAddressish = "So11111111111111111111111111111111111111112".into();
        assert!(ish.resolve().is_ok());
        let ish: SolAddressish = "not an address".to_string().into();
        assert!(matches!(ish.resolve(), Err(Error::InvalidSolAddress(_))));
    }
}
