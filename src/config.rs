//! Client configuration.

use crate::evm::EvmChain;
use crate::sol::SolNetwork;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Base URL of the Moralis EVM API.
pub const EVM_API_BASE_URL: &str = "https://deep-index.moralis.io/api/v2";

/// Base URL of the Moralis Solana API.
pub const SOL_API_BASE_URL: &str = "https://solana-gateway.moralis.io";

/// Settings shared by every API module built on the same [`Core`](crate::Core).
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// let config: moralis_web3_api::Config =
///     serde_json::from_str(r#"{ "default_evm_chain": "polygon" }"#).unwrap();
/// assert_eq!(config.default_evm_chain.api_hex(), "0x89");
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub evm_api_base_url: String,
    pub sol_api_base_url: String,
    /// Chain used by EVM operations when the caller passes none.
    pub default_evm_chain: EvmChain,
    /// Network used by Solana operations when the caller passes none.
    pub default_sol_network: SolNetwork,
    /// The maximum time limit for an API request. Defaults to 30 seconds.
    pub http_timeout: Duration,
    pub user_agent: Option<String>,
    /// Headers attached to every request.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            evm_api_base_url: EVM_API_BASE_URL.to_string(),
            sol_api_base_url: SOL_API_BASE_URL.to_string(),
            default_evm_chain: EvmChain::ETHEREUM,
            default_sol_network: SolNetwork::Mainnet,
            http_timeout: defaults::http_timeout(),
            user_agent: None,
            default_headers: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn evm_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.evm_api_base_url = url.into();
        self
    }

    pub fn sol_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.sol_api_base_url = url.into();
        self
    }

    pub fn default_evm_chain(mut self, chain: EvmChain) -> Self {
        self.default_evm_chain = chain;
        self
    }

    pub fn default_sol_network(mut self, network: SolNetwork) -> Self {
        self.default_sol_network = network;
        self
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

mod defaults {
    use std::time::Duration;

    pub fn http_timeout() -> Duration {
        Duration::from_secs(30)
    }
}
