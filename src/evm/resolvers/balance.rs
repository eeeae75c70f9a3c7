//! Native balance of a wallet.

use crate::config::Config;
use crate::error::Result;
use crate::evm::{EvmAddressish, EvmChainish, resolve_default_chain};
use crate::resolver::Resolver;
use crate::units::{EvmNative, parse_u256};
use serde::{Deserialize, Serialize};

/// `GET {address}/balance`
pub struct GetNativeBalance;

#[derive(Clone, Debug)]
pub struct GetNativeBalanceParams {
    pub chain: Option<EvmChainish>,
    pub address: EvmAddressish,
    pub to_block: Option<u64>,
}

impl GetNativeBalanceParams {
    pub fn new(address: impl Into<EvmAddressish>) -> Self {
        Self {
            chain: None,
            address: address.into(),
            to_block: None,
        }
    }

    pub fn chain(mut self, chain: impl Into<EvmChainish>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn to_block(mut self, block: u64) -> Self {
        self.to_block = Some(block);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct GetNativeBalanceApiParams {
    pub chain: String,
    #[serde(skip)]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeBalanceJson {
    pub balance: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeBalance {
    pub balance: EvmNative,
}

impl Resolver for GetNativeBalance {
    const NAME: &'static str = "getNativeBalance";

    type Params = GetNativeBalanceParams;
    type ApiParams = GetNativeBalanceApiParams;
    type ApiResult = NativeBalanceJson;
    type Output = NativeBalance;
    type Json = NativeBalanceJson;

    fn path(params: &Self::ApiParams) -> String {
        format!("{}/balance", params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        Ok(GetNativeBalanceApiParams {
            chain: resolve_default_chain(params.chain, config)?.api_hex(),
            address: params.address.resolve()?.lowercase(),
            to_block: params.to_block,
        })
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        Ok(NativeBalance {
            balance: EvmNative::from_wei(parse_u256("balance", &data.balance)?),
        })
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        NativeBalanceJson {
            balance: result.balance.wei().to_string(),
        }
    }
}
