//! Solana clusters served by the API.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolNetwork {
    #[default]
    Mainnet,
    Devnet,
}

impl SolNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Devnet => "devnet",
        }
    }
}

impl fmt::Display for SolNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolNetwork {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "devnet" => Ok(Self::Devnet),
            _ => Err(Error::InvalidSolNetwork(s.to_string())),
        }
    }
}

/// A network given as a [`SolNetwork`] or as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolNetworkish {
    Network(SolNetwork),
    Raw(String),
}

impl SolNetworkish {
    pub fn resolve(self) -> Result<SolNetwork> {
        match self {
            Self::Network(network) => Ok(network),
            Self::Raw(value) => value.parse(),
        }
    }
}

impl From<SolNetwork> for SolNetworkish {
    fn from(value: SolNetwork) -> Self {
        Self::Network(value)
    }
}

impl From<&str> for SolNetworkish {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for SolNetworkish {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

/// Resolve a caller-provided network, falling back to the configured default.
pub fn resolve_default_network(
    network: Option<SolNetworkish>,
    config: &Config,
) -> Result<SolNetwork> {
    match network {
        Some(network) => network.resolve(),
        None => Ok(config.default_sol_network),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Mainnet".parse::<SolNetwork>().expect("parse"), SolNetwork::Mainnet);
        assert_eq!("devnet".parse::<SolNetwork>().expect("parse"), SolNetwork::Devnet);
        assert!(matches!(
            "testnet".parse::<SolNetwork>(),
            Err(Error::InvalidSolNetwork(_))
        ));
    }

    #[test]
    fn default_network_comes_from_config() {
        let config = Config::default().default_sol_network(SolNetwork::Devnet);
        assert_eq!(
            resolve_default_network(None, &config).expect("default"),
            SolNetwork::Devnet
        );
        assert_eq!(
            resolve_default_network(Some("mainnet".into()), &config).expect("explicit"),
            SolNetwork::Mainnet
        );
    }
}
