//! ERC-20 endpoints: allowance, price and wallet balances.

use crate::config::Config;
use crate::error::Result;
use crate::evm::{EvmAddress, EvmAddressish, EvmChainish, resolve_default_chain};
use crate::resolver::Resolver;
use crate::units::{format_units, parse_u256};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// getTokenAllowance
// ---------------------------------------------------------------------------

/// `GET erc20/{address}/allowance`
pub struct GetTokenAllowance;

#[derive(Clone, Debug)]
pub struct GetTokenAllowanceParams {
    pub chain: Option<EvmChainish>,
    /// The ERC-20 contract.
    pub address: EvmAddressish,
    pub owner_address: EvmAddressish,
    pub spender_address: EvmAddressish,
}

impl GetTokenAllowanceParams {
    pub fn new(
        address: impl Into<EvmAddressish>,
        owner_address: impl Into<EvmAddressish>,
        spender_address: impl Into<EvmAddressish>,
    ) -> Self {
        Self {
            chain: None,
            address: address.into(),
            owner_address: owner_address.into(),
            spender_address: spender_address.into(),
        }
    }

    pub fn chain(mut self, chain: impl Into<EvmChainish>) -> Self {
        self.chain = Some(chain.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct GetTokenAllowanceApiParams {
    pub chain: String,
    #[serde(skip)]
    pub address: String,
    pub owner_address: String,
    pub spender_address: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAllowanceJson {
    pub allowance: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenAllowance {
    pub allowance: U256,
}

impl Resolver for GetTokenAllowance {
    const NAME: &'static str = "getTokenAllowance";

    type Params = GetTokenAllowanceParams;
    type ApiParams = GetTokenAllowanceApiParams;
    type ApiResult = TokenAllowanceJson;
    type Output = TokenAllowance;
    type Json = TokenAllowanceJson;

    fn path(params: &Self::ApiParams) -> String {
        format!("erc20/{}/allowance", params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        Ok(GetTokenAllowanceApiParams {
            chain: resolve_default_chain(params.chain, config)?.api_hex(),
            address: params.address.resolve()?.lowercase(),
            owner_address: params.owner_address.resolve()?.lowercase(),
            spender_address: params.spender_address.resolve()?.lowercase(),
        })
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        Ok(TokenAllowance {
            allowance: parse_u256("allowance", &data.allowance)?,
        })
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        TokenAllowanceJson {
            allowance: result.allowance.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// getTokenPrice
// ---------------------------------------------------------------------------

/// `GET erc20/{address}/price`
pub struct GetTokenPrice;

#[derive(Clone, Debug)]
pub struct GetTokenPriceParams {
    pub chain: Option<EvmChainish>,
    pub address: EvmAddressish,
    /// Exchange factory name, e.g. `uniswapv3`.
    pub exchange: Option<String>,
    pub to_block: Option<u64>,
}

impl GetTokenPriceParams {
    pub fn new(address: impl Into<EvmAddressish>) -> Self {
        Self {
            chain: None,
            address: address.into(),
            exchange: None,
            to_block: None,
        }
    }

    pub fn chain(mut self, chain: impl Into<EvmChainish>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    pub fn to_block(mut self, block: u64) -> Self {
        self.to_block = Some(block);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct GetTokenPriceApiParams {
    pub chain: String,
    #[serde(skip)]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativePriceJson {
    pub value: String,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_price: Option<NativePriceJson>,
    pub usd_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_name: Option<String>,
}

/// Price of the token in the chain's native currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativePrice {
    /// Amount in the native currency's base unit.
    pub value: U256,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TokenPrice {
    pub native_price: Option<NativePrice>,
    pub usd_price: f64,
    pub exchange_address: Option<EvmAddress>,
    pub exchange_name: Option<String>,
}

impl Resolver for GetTokenPrice {
    const NAME: &'static str = "getTokenPrice";

    type Params = GetTokenPriceParams;
    type ApiParams = GetTokenPriceApiParams;
    type ApiResult = TokenPriceJson;
    type Output = TokenPrice;
    type Json = TokenPriceJson;

    fn path(params: &Self::ApiParams) -> String {
        format!("erc20/{}/price", params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        Ok(GetTokenPriceApiParams {
            chain: resolve_default_chain(params.chain, config)?.api_hex(),
            address: params.address.resolve()?.lowercase(),
            exchange: params.exchange,
            to_block: params.to_block,
        })
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        let native_price = data
            .native_price
            .map(|price| -> Result<NativePrice> {
                Ok(NativePrice {
                    value: parse_u256("nativePrice.value", &price.value)?,
                    decimals: price.decimals,
                    name: price.name,
                    symbol: price.symbol,
                })
            })
            .transpose()?;

        Ok(TokenPrice {
            native_price,
            usd_price: data.usd_price,
            exchange_address: data
                .exchange_address
                .as_deref()
                .map(EvmAddress::create)
                .transpose()?,
            exchange_name: data.exchange_name,
        })
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        TokenPriceJson {
            native_price: result.native_price.as_ref().map(|price| NativePriceJson {
                value: price.value.to_string(),
                decimals: price.decimals,
                name: price.name.clone(),
                symbol: price.symbol.clone(),
            }),
            usd_price: result.usd_price,
            exchange_address: result.exchange_address.map(|address| address.lowercase()),
            exchange_name: result.exchange_name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// getWalletTokenBalances
// ---------------------------------------------------------------------------

/// `GET {address}/erc20`
pub struct GetWalletTokenBalances;

#[derive(Clone, Debug)]
pub struct GetWalletTokenBalancesParams {
    pub chain: Option<EvmChainish>,
    /// The wallet.
    pub address: EvmAddressish,
    pub to_block: Option<u64>,
}

impl GetWalletTokenBalancesParams {
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
pub struct GetWalletTokenBalancesApiParams {
    pub chain: String,
    #[serde(skip)]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc20BalanceJson {
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub decimals: u32,
    pub balance: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Erc20Balance {
    pub token_address: EvmAddress,
    pub name: String,
    pub symbol: String,
    pub logo: Option<String>,
    pub thumbnail: Option<String>,
    pub decimals: u32,
    /// Balance in the token's base unit.
    pub balance: U256,
}

impl Erc20Balance {
    /// Exact decimal balance, e.g. `"123.456789"`.
    pub fn amount(&self) -> String {
        format_units(&self.balance.to_string(), self.decimals)
    }
}

impl Resolver for GetWalletTokenBalances {
    const NAME: &'static str = "getWalletTokenBalances";

    type Params = GetWalletTokenBalancesParams;
    type ApiParams = GetWalletTokenBalancesApiParams;
    type ApiResult = Vec<Erc20BalanceJson>;
    type Output = Vec<Erc20Balance>;
    type Json = Vec<Erc20BalanceJson>;

    fn path(params: &Self::ApiParams) -> String {
        format!("{}/erc20", params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        Ok(GetWalletTokenBalancesApiParams {
            chain: resolve_default_chain(params.chain, config)?.api_hex(),
            address: params.address.resolve()?.lowercase(),
            to_block: params.to_block,
        })
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        data.into_iter()
            .map(|token| {
                Ok(Erc20Balance {
                    token_address: EvmAddress::create(&token.token_address)?,
                    balance: parse_u256("balance", &token.balance)?,
                    name: token.name,
                    symbol: token.symbol,
                    logo: token.logo,
                    thumbnail: token.thumbnail,
                    decimals: token.decimals,
                })
            })
            .collect()
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        result
            .iter()
            .map(|token| Erc20BalanceJson {
                token_address: token.token_address.lowercase(),
                name: token.name.clone(),
                symbol: token.symbol.clone(),
                logo: token.logo.clone(),
                thumbnail: token.thumbnail.clone(),
                decimals: token.decimals,
                balance: token.balance.to_string(),
            })
            .collect()
    }
}
