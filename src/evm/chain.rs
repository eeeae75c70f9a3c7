//! EVM chain identifiers.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An EVM chain, identified by its chain id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvmChain(u64);

/// Chains the API knows by name.
const NAMED_CHAINS: &[(&str, EvmChain)] = &[
    ("eth", EvmChain::ETHEREUM),
    ("goerli", EvmChain::GOERLI),
    ("sepolia", EvmChain::SEPOLIA),
    ("polygon", EvmChain::POLYGON),
    ("mumbai", EvmChain::MUMBAI),
    ("bsc", EvmChain::BSC),
    ("bsc testnet", EvmChain::BSC_TESTNET),
    ("avalanche", EvmChain::AVALANCHE),
    ("fantom", EvmChain::FANTOM),
    ("cronos", EvmChain::CRONOS),
    ("arbitrum", EvmChain::ARBITRUM),
    ("optimism", EvmChain::OPTIMISM),
    ("base", EvmChain::BASE),
];

impl EvmChain {
    pub const ETHEREUM: Self = Self(1);
    pub const GOERLI: Self = Self(5);
    pub const SEPOLIA: Self = Self(11_155_111);
    pub const POLYGON: Self = Self(137);
    pub const MUMBAI: Self = Self(80_001);
    pub const BSC: Self = Self(56);
    pub const BSC_TESTNET: Self = Self(97);
    pub const AVALANCHE: Self = Self(43_114);
    pub const FANTOM: Self = Self(250);
    pub const CRONOS: Self = Self(25);
    pub const ARBITRUM: Self = Self(42_161);
    pub const OPTIMISM: Self = Self(10);
    pub const BASE: Self = Self(8_453);

    /// Create a chain from its id. Zero is not a valid chain id.
    pub fn from_id(id: u64) -> Result<Self> {
        if id == 0 {
            return Err(Error::InvalidChain(id.to_string()));
        }
        Ok(Self(id))
    }

    /// Parse `0x`-prefixed hex, decimal, or a known chain name.
    pub fn create(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let invalid = || Error::InvalidChain(value.to_string());

        let id = if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            u64::from_str_radix(hex, 16).map_err(|_| invalid())?
        } else if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            trimmed.parse().map_err(|_| invalid())?
        } else {
            let lowered = trimmed.to_ascii_lowercase();
            return NAMED_CHAINS
                .iter()
                .find(|(name, _)| *name == lowered)
                .map(|(_, chain)| *chain)
                .ok_or_else(invalid);
        };

        Self::from_id(id).map_err(|_| invalid())
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    /// `0x`-prefixed hex id, the wire form (`0x1`, `0x89`).
    pub fn api_hex(&self) -> String {
        format!("{:#x}", self.0)
    }

    /// Known name of the chain, if any.
    pub fn name(&self) -> Option<&'static str> {
        NAMED_CHAINS
            .iter()
            .find(|(_, chain)| chain == self)
            .map(|(name, _)| *name)
    }
}

impl fmt::Display for EvmChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_hex())
    }
}

impl FromStr for EvmChain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::create(s)
    }
}

impl Serialize for EvmChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.api_hex())
    }
}

impl<'de> Deserialize<'de> for EvmChain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Id(u64),
            Text(String),
        }

        let chain = match Repr::deserialize(deserializer)? {
            Repr::Id(id) => Self::from_id(id),
            Repr::Text(text) => Self::create(&text),
        };
        chain.map_err(serde::de::Error::custom)
    }
}

/// A chain given as an [`EvmChain`], a numeric id, or text (hex, decimal or a
/// known name), validated when the request is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvmChainish {
    Chain(EvmChain),
    Id(u64),
    Raw(String),
}

impl EvmChainish {
    pub fn resolve(self) -> Result<EvmChain> {
        match self {
            Self::Chain(chain) => Ok(chain),
            Self::Id(id) => EvmChain::from_id(id),
            Self::Raw(value) => EvmChain::create(&value),
        }
    }
}

impl From<EvmChain> for EvmChainish {
    fn from(value: EvmChain) -> Self {
        Self::Chain(value)
    }
}

impl From<u64> for EvmChainish {
    fn from(value: u64) -> Self {
        Self::Id(value)
    }
}

impl From<&str> for EvmChainish {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for EvmChainish {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

/// Resolve a caller-provided chain, falling back to the configured default.
pub fn resolve_default_chain(chain: Option<EvmChainish>, config: &Config) -> Result<EvmChain> {
    match chain {
        Some(chain) => chain.resolve(),
        None => Ok(config.default_evm_chain),
    }
}
