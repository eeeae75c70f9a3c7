//! The EVM API: wallets, ERC-20 tokens and NFTs on EVM chains.

mod address;
mod chain;
pub mod resolvers;

pub use address::{EvmAddress, EvmAddressish};
pub use chain::{EvmChain, EvmChainish, resolve_default_chain};

#[cfg(feature = "client")]
pub use api::{BalanceApi, EvmApi, NftApi, TokenApi};

#[cfg(feature = "client")]
mod api {
    use super::resolvers::balance::{GetNativeBalance, GetNativeBalanceParams};
    use super::resolvers::nft::{GetNftMetadata, GetNftMetadataParams};
    use super::resolvers::token::{
        GetTokenAllowance, GetTokenAllowanceParams, GetTokenPrice, GetTokenPriceParams,
        GetWalletTokenBalances, GetWalletTokenBalancesParams,
    };
    use crate::client::{ApiClient, Core};
    use crate::error::Result;
    use crate::resolver::ApiResponse;

    /// The EVM API module.
    ///
    /// ```no_run
    /// use moralis_web3_api::{Config, Core, EvmApi};
    /// use moralis_web3_api::evm::resolvers::token::GetTokenAllowanceParams;
    ///
    /// # async fn run() -> moralis_web3_api::Result<()> {
    /// let evm = EvmApi::create(&Core::new(Config::default())?);
    /// let response = evm
    ///     .token()
    ///     .get_token_allowance(GetTokenAllowanceParams::new(
    ///         "0xdac17f958d2ee523a2206206994597c13d831ec7",
    ///         "0x7c276dcaab99bd16163c1bcce671cad6a1ec0945",
    ///         "0x1111111254eeb25477b68fb85ed929f73a960582",
    ///     ))
    ///     .await?;
    /// println!("allowance: {}", response.result().allowance);
    /// # Ok(())
    /// # }
    /// ```
    #[derive(Clone, Debug)]
    pub struct EvmApi {
        client: ApiClient,
    }

    impl EvmApi {
        pub const MODULE_NAME: &'static str = "evmApi";

        pub fn create(core: &Core) -> Self {
            let base_url = core.config().evm_api_base_url.clone();
            Self {
                client: ApiClient::new(core.clone(), Self::MODULE_NAME, base_url),
            }
        }

        pub fn base_url(&self) -> &str {
            self.client.base_url()
        }

        pub fn balance(&self) -> BalanceApi<'_> {
            BalanceApi { client: &self.client }
        }

        pub fn token(&self) -> TokenApi<'_> {
            TokenApi { client: &self.client }
        }

        pub fn nft(&self) -> NftApi<'_> {
            NftApi { client: &self.client }
        }
    }

    // ── Balance ──────────────────────────────────────────────────

    #[derive(Clone, Copy, Debug)]
    pub struct BalanceApi<'a> {
        client: &'a ApiClient,
    }

    impl BalanceApi<'_> {
        /// Returns the native balance of a wallet.
        pub async fn get_native_balance(
            &self,
            params: GetNativeBalanceParams,
        ) -> Result<ApiResponse<GetNativeBalance>> {
            self.client.fetch::<GetNativeBalance>(params).await
        }
    }

    // ── Token ────────────────────────────────────────────────────

    #[derive(Clone, Copy, Debug)]
    pub struct TokenApi<'a> {
        client: &'a ApiClient,
    }

    impl TokenApi<'_> {
        /// Returns how much a spender may transfer on behalf of an owner.
        pub async fn get_token_allowance(
            &self,
            params: GetTokenAllowanceParams,
        ) -> Result<ApiResponse<GetTokenAllowance>> {
            self.client.fetch::<GetTokenAllowance>(params).await
        }

        /// Returns the price of a token in USD and in the native currency.
        pub async fn get_token_price(
            &self,
            params: GetTokenPriceParams,
        ) -> Result<ApiResponse<GetTokenPrice>> {
            self.client.fetch::<GetTokenPrice>(params).await
        }

        /// Returns the ERC-20 balances of a wallet.
        pub async fn get_wallet_token_balances(
            &self,
            params: GetWalletTokenBalancesParams,
        ) -> Result<ApiResponse<GetWalletTokenBalances>> {
            self.client.fetch::<GetWalletTokenBalances>(params).await
        }
    }

    // ── NFT ──────────────────────────────────────────────────────

    #[derive(Clone, Copy, Debug)]
    pub struct NftApi<'a> {
        client: &'a ApiClient,
    }

    impl NftApi<'_> {
        /// Returns the metadata of one NFT.
        pub async fn get_nft_metadata(
            &self,
            params: GetNftMetadataParams,
        ) -> Result<ApiResponse<GetNftMetadata>> {
            self.client.fetch::<GetNftMetadata>(params).await
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::config::Config;
        use crate::error::Error;
        use crate::evm::EvmChain;
        use alloy_primitives::U256;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        const USDT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
        const OWNER: &str = "0x7c276dcaab99bd16163c1bcce671cad6a1ec0945";
        const SPENDER: &str = "0x1111111254eeb25477b68fb85ed929f73a960582";

        fn evm_api(server: &MockServer, config: Config) -> EvmApi {
            let core = Core::new(config.evm_api_base_url(server.uri())).expect("core");
            EvmApi::create(&core)
        }

        #[tokio::test]
        async fn token_allowance_sends_lowercased_query() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/erc20/0xdac17f958d2ee523a2206206994597c13d831ec7/allowance"))
                .and(query_param("chain", "0x1"))
                .and(query_param("owner_address", OWNER))
                .and(query_param("spender_address", SPENDER))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({ "allowance": "115792089237316195423570985008687907853269984665640564039457584007913129639935" })),
                )
                .expect(1)
                .mount(&server)
                .await;

            let response = evm_api(&server, Config::default())
                .token()
                .get_token_allowance(GetTokenAllowanceParams::new(USDT, OWNER, SPENDER))
                .await
                .expect("allowance");
            assert_eq!(response.result().allowance, U256::MAX);
        }

        #[tokio::test]
        async fn native_balance_uses_configured_default_chain() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(format!("/{OWNER}/balance")))
                .and(query_param("chain", "0x89"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({ "balance": "1500000000000000000" })),
                )
                .mount(&server)
                .await;

            let response = evm_api(&server, Config::default().default_evm_chain(EvmChain::POLYGON))
                .balance()
                .get_native_balance(GetNativeBalanceParams::new(OWNER))
                .await
                .expect("balance");
            assert_eq!(response.result().balance.to_ether_string(), "1.5");
        }

        #[tokio::test]
        async fn error_status_carries_endpoint_and_body() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(401).set_body_string("Invalid key"))
                .mount(&server)
                .await;

            let err = evm_api(&server, Config::default())
                .token()
                .get_wallet_token_balances(GetWalletTokenBalancesParams::new(OWNER))
                .await
                .expect_err("status");
            assert!(matches!(
                err,
                Error::Status { endpoint: "getWalletTokenBalances", status: 401, ref body } if body == "Invalid key"
            ));
        }

        #[tokio::test]
        async fn invalid_address_fails_without_a_request() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;

            let err = evm_api(&server, Config::default())
                .nft()
                .get_nft_metadata(GetNftMetadataParams::new("0x123", U256::from(1u64)))
                .await
                .expect_err("invalid");
            assert!(matches!(err, Error::InvalidEvmAddress { .. }));
        }
    }
}
