//! Account endpoints: native balance, NFTs, SPL tokens and the combined
//! portfolio.

use super::{SolAddressApiParams, SolAddressParams};
use crate::config::Config;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::sol::SolAddress;
use crate::units::{SolNative, format_units, parse_u64};
use serde::{Deserialize, Serialize};

pub type GetBalanceParams = SolAddressParams;
pub type GetNftsParams = SolAddressParams;
pub type GetPortfolioParams = SolAddressParams;
pub type GetSplParams = SolAddressParams;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeBalanceJson {
    pub lamports: String,
    pub solana: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolNftJson {
    pub associated_token_address: String,
    pub mint: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplTokenJson {
    pub associated_token_address: String,
    pub mint: String,
    pub amount_raw: String,
    pub amount: String,
    pub decimals: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioJson {
    pub native_balance: NativeBalanceJson,
    pub nfts: Vec<SolNftJson>,
    pub tokens: Vec<SplTokenJson>,
}

// ---------------------------------------------------------------------------
// Typed results
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolNft {
    pub associated_token_address: SolAddress,
    pub mint: SolAddress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplToken {
    pub associated_token_address: SolAddress,
    pub mint: SolAddress,
    /// Amount in the token's base unit.
    pub amount_raw: u64,
    /// Decimal amount as reported by the service, e.g. `"12.5"`.
    pub amount: String,
    pub decimals: u32,
}

impl SplToken {
    /// Exact decimal amount computed from [`amount_raw`](Self::amount_raw).
    pub fn formatted_amount(&self) -> String {
        format_units(&self.amount_raw.to_string(), self.decimals)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Portfolio {
    pub native_balance: SolNative,
    pub nfts: Vec<SolNft>,
    pub tokens: Vec<SplToken>,
}

fn native_from_json(data: &NativeBalanceJson) -> Result<SolNative> {
    Ok(SolNative::from_lamports(parse_u64("lamports", &data.lamports)?))
}

fn native_to_json(balance: &SolNative) -> NativeBalanceJson {
    NativeBalanceJson {
        lamports: balance.lamports().to_string(),
        solana: balance.to_sol_string(),
    }
}

fn nft_from_json(data: SolNftJson) -> Result<SolNft> {
    Ok(SolNft {
        associated_token_address: SolAddress::create(&data.associated_token_address)?,
        mint: SolAddress::create(&data.mint)?,
    })
}

fn nft_to_json(nft: &SolNft) -> SolNftJson {
    SolNftJson {
        associated_token_address: nft.associated_token_address.to_string(),
        mint: nft.mint.to_string(),
    }
}

fn token_from_json(data: SplTokenJson) -> Result<SplToken> {
    Ok(SplToken {
        associated_token_address: SolAddress::create(&data.associated_token_address)?,
        mint: SolAddress::create(&data.mint)?,
        amount_raw: parse_u64("amountRaw", &data.amount_raw)?,
        amount: data.amount,
        decimals: data.decimals,
    })
}

fn token_to_json(token: &SplToken) -> SplTokenJson {
    SplTokenJson {
        associated_token_address: token.associated_token_address.to_string(),
        mint: token.mint.to_string(),
        amount_raw: token.amount_raw.to_string(),
        amount: token.amount.clone(),
        decimals: token.decimals,
    }
}

// ---------------------------------------------------------------------------
// Resolvers
// ---------------------------------------------------------------------------

/// `GET account/{network}/{address}/balance`
pub struct GetBalance;

impl Resolver for GetBalance {
    const NAME: &'static str = "getBalance";

    type Params = GetBalanceParams;
    type ApiParams = SolAddressApiParams;
    type ApiResult = NativeBalanceJson;
    type Output = SolNative;
    type Json = NativeBalanceJson;

    fn path(params: &Self::ApiParams) -> String {
        format!("account/{}/{}/balance", params.network, params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        SolAddressApiParams::parse(params, config)
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        native_from_json(&data)
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        native_to_json(result)
    }
}

/// `GET account/{network}/{address}/nft`
pub struct GetNfts;

impl Resolver for GetNfts {
    const NAME: &'static str = "getNFTs";

    type Params = GetNftsParams;
    type ApiParams = SolAddressApiParams;
    type ApiResult = Vec<SolNftJson>;
    type Output = Vec<SolNft>;
    type Json = Vec<SolNftJson>;

    fn path(params: &Self::ApiParams) -> String {
        format!("account/{}/{}/nft", params.network, params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        SolAddressApiParams::parse(params, config)
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        data.into_iter().map(nft_from_json).collect()
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        result.iter().map(nft_to_json).collect()
    }
}

/// `GET account/{network}/{address}/portfolio`
pub struct GetPortfolio;

impl Resolver for GetPortfolio {
    const NAME: &'static str = "getPortfolio";

    type Params = GetPortfolioParams;
    type ApiParams = SolAddressApiParams;
    type ApiResult = PortfolioJson;
    type Output = Portfolio;
    type Json = PortfolioJson;

    fn path(params: &Self::ApiParams) -> String {
        format!("account/{}/{}/portfolio", params.network, params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        SolAddressApiParams::parse(params, config)
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        Ok(Portfolio {
            native_balance: native_from_json(&data.native_balance)?,
            nfts: data
                .nfts
                .into_iter()
                .map(nft_from_json)
                .collect::<Result<_>>()?,
            tokens: data
                .tokens
                .into_iter()
                .map(token_from_json)
                .collect::<Result<_>>()?,
        })
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        PortfolioJson {
            native_balance: native_to_json(&result.native_balance),
            nfts: result.nfts.iter().map(nft_to_json).collect(),
            tokens: result.tokens.iter().map(token_to_json).collect(),
        }
    }
}

/// `GET account/{network}/{address}/tokens`
pub struct GetSpl;

impl Resolver for GetSpl {
    const NAME: &'static str = "getSPL";

    type Params = GetSplParams;
    type ApiParams = SolAddressApiParams;
    type ApiResult = Vec<SplTokenJson>;
    type Output = Vec<SplToken>;
    type Json = Vec<SplTokenJson>;

    fn path(params: &Self::ApiParams) -> String {
        format!("account/{}/{}/tokens", params.network, params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        SolAddressApiParams::parse(params, config)
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        data.into_iter().map(token_from_json).collect()
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        result.iter().map(token_to_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resolver::ApiResponse;
    use crate::sol::SolNetwork;

    const WALLET: &str = "BWeBmN8zYDXgx2tnGj72cA533GZEWAVeqR9Eu29txaPT";
    const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
    const TOKEN_ACCOUNT: &str = "8NsfV5bTqkFbiYmvTwSxNcCBqKUtGAnPGykRkiNx9ufv";

    fn usdc_json() -> serde_json::Value {
        serde_json::json!({
            "associatedTokenAddress": TOKEN_ACCOUNT,
            "mint": USDC_MINT,
            "amountRaw": "12500000",
            "amount": "12.5",
            "decimals": 6
        })
    }

    #[test]
    fn paths_carry_network_and_address_verbatim() {
        let config = Config::default();
        let request = GetBalance::request(SolAddressParams::new(WALLET), &config).expect("request");
        assert_eq!(request.path, format!("account/mainnet/{WALLET}/balance"));
        assert_eq!(request.query, None);

        let request = GetSpl::request(
            SolAddressParams::new(WALLET).network(SolNetwork::Devnet),
            &config,
        )
        .expect("request");
        assert_eq!(request.path, format!("account/devnet/{WALLET}/tokens"));

        let request = GetNfts::request(SolAddressParams::new(WALLET), &config).expect("request");
        assert_eq!(request.path, format!("account/mainnet/{WALLET}/nft"));

        let request =
            GetPortfolio::request(SolAddressParams::new(WALLET), &config).expect("request");
        assert_eq!(request.path, format!("account/mainnet/{WALLET}/portfolio"));
    }

    #[test]
    fn invalid_inputs_fail_before_any_request() {
        let config = Config::default();
        let err = GetBalance::request(SolAddressParams::new("0xabc"), &config).expect_err("addr");
        assert!(matches!(err, Error::InvalidSolAddress(_)));

        let err = GetBalance::request(SolAddressParams::new(WALLET).network("testnet"), &config)
            .expect_err("network");
        assert!(matches!(err, Error::InvalidSolNetwork(_)));
    }

    #[test]
    fn balance_round_trips() {
        let raw = serde_json::json!({ "lamports": "1500000000", "solana": "1.5" });
        let response = ApiResponse::<GetBalance>::from_raw(raw.clone()).expect("decode");
        assert_eq!(response.result().lamports(), 1_500_000_000);
        assert_eq!(response.to_json().expect("json"), raw);
    }

    #[test]
    fn spl_tokens_expose_decimal_amounts() {
        let raw = serde_json::json!([usdc_json()]);
        let response = ApiResponse::<GetSpl>::from_raw(raw.clone()).expect("decode");
        let token = &response.result()[0];
        assert_eq!(token.amount_raw, 12_500_000);
        assert_eq!(token.amount, "12.5");
        assert_eq!(token.formatted_amount(), "12.5");
        assert_eq!(response.to_json().expect("json"), raw);
    }

    #[test]
    fn spl_amount_keeps_the_wire_formatting() {
        let mut token = usdc_json();
        token["amount"] = serde_json::json!("12.500000");
        let raw = serde_json::json!([token]);
        let response = ApiResponse::<GetSpl>::from_raw(raw.clone()).expect("decode");
        assert_eq!(response.result()[0].amount, "12.500000");
        assert_eq!(response.to_json().expect("json"), raw);
    }

    #[test]
    fn portfolio_converts_every_section() {
        let raw = serde_json::json!({
            "nativeBalance": { "lamports": "2039280", "solana": "0.00203928" },
            "nfts": [{ "associatedTokenAddress": TOKEN_ACCOUNT, "mint": USDC_MINT }],
            "tokens": [usdc_json()]
        });
        let response = ApiResponse::<GetPortfolio>::from_raw(raw.clone()).expect("decode");
        let portfolio = response.result();
        assert_eq!(portfolio.native_balance.lamports(), 2_039_280);
        assert_eq!(portfolio.nfts.len(), 1);
        assert_eq!(portfolio.tokens.len(), 1);
        assert_eq!(response.to_json().expect("json"), raw);
    }

    #[test]
    fn malformed_lamports_are_rejected() {
        let raw = serde_json::json!({ "lamports": "1.5", "solana": "0.0000000015" });
        let err = ApiResponse::<GetBalance>::from_raw(raw).expect_err("invalid");
        assert!(matches!(err, Error::InvalidNumber { field: "lamports", .. }));
    }
}
