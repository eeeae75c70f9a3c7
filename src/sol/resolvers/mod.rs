//! Endpoint descriptors of the Solana API, grouped by namespace.
//!
//! Every Solana endpoint is addressed by a network and an account or mint
//! address, both carried in the path.

pub mod account;
pub mod nft;

use crate::config::Config;
use crate::error::Result;
use crate::sol::{SolAddressish, SolNetworkish, resolve_default_network};
use serde::Serialize;

/// Parameters of every Solana endpoint.
#[derive(Clone, Debug)]
pub struct SolAddressParams {
    /// Defaults to the configured network.
    pub network: Option<SolNetworkish>,
    pub address: SolAddressish,
}

impl SolAddressParams {
    pub fn new(address: impl Into<SolAddressish>) -> Self {
        Self {
            network: None,
            address: address.into(),
        }
    }

    pub fn network(mut self, network: impl Into<SolNetworkish>) -> Self {
        self.network = Some(network.into());
        self
    }
}

/// Path-only wire parameters; the query string stays empty.
#[derive(Debug, Serialize)]
pub struct SolAddressApiParams {
    #[serde(skip)]
    pub network: String,
    #[serde(skip)]
    pub address: String,
}

impl SolAddressApiParams {
    pub(crate) fn parse(params: SolAddressParams, config: &Config) -> Result<Self> {
        Ok(Self {
            network: resolve_default_network(params.network, config)?.to_string(),
            address: params.address.resolve()?.to_string(),
        })
    }
}
