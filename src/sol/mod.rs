//! The Solana API: balances, SPL tokens and NFTs.

mod address;
mod network;
pub mod resolvers;

pub use address::{SolAddress, SolAddressish};
pub use network::{SolNetwork, SolNetworkish, resolve_default_network};

#[cfg(feature = "client")]
pub use api::{AccountApi, NftApi, SolApi};

#[cfg(feature = "client")]
mod api {
    use super::resolvers::SolAddressParams;
    use super::resolvers::account::{GetBalance, GetNfts, GetPortfolio, GetSpl};
    use super::resolvers::nft::GetNftMetadata;
    use crate::client::{ApiClient, Core};
    use crate::error::Result;
    use crate::resolver::ApiResponse;

    /// The Solana API module.
    #[derive(Clone, Debug)]
    pub struct SolApi {
        client: ApiClient,
    }

    impl SolApi {
        pub const MODULE_NAME: &'static str = "solApi";

        pub fn create(core: &Core) -> Self {
            let base_url = core.config().sol_api_base_url.clone();
            Self {
                client: ApiClient::new(core.clone(), Self::MODULE_NAME, base_url),
            }
        }

        pub fn base_url(&self) -> &str {
            self.client.base_url()
        }

        pub fn account(&self) -> AccountApi<'_> {
            AccountApi { client: &self.client }
        }

        pub fn nft(&self) -> NftApi<'_> {
            NftApi { client: &self.client }
        }
    }

    // ── Account ──────────────────────────────────────────────────

    #[derive(Clone, Copy, Debug)]
    pub struct AccountApi<'a> {
        client: &'a ApiClient,
    }

    impl AccountApi<'_> {
        /// Returns the native SOL balance of an account.
        pub async fn get_balance(&self, params: SolAddressParams) -> Result<ApiResponse<GetBalance>> {
            self.client.fetch::<GetBalance>(params).await
        }

        /// Returns the NFTs held by an account.
        pub async fn get_nfts(&self, params: SolAddressParams) -> Result<ApiResponse<GetNfts>> {
            self.client.fetch::<GetNfts>(params).await
        }

        /// Returns native balance, NFTs and SPL tokens in one call.
        pub async fn get_portfolio(
            &self,
            params: SolAddressParams,
        ) -> Result<ApiResponse<GetPortfolio>> {
            self.client.fetch::<GetPortfolio>(params).await
        }

        /// Returns the SPL token balances of an account.
        pub async fn get_spl(&self, params: SolAddressParams) -> Result<ApiResponse<GetSpl>> {
            self.client.fetch::<GetSpl>(params).await
        }
    }

    // ── NFT ──────────────────────────────────────────────────────

    #[derive(Clone, Copy, Debug)]
    pub struct NftApi<'a> {
        client: &'a ApiClient,
    }

    impl NftApi<'_> {
        /// Returns the Metaplex metadata of an NFT mint.
        pub async fn get_nft_metadata(
            &self,
            params: SolAddressParams,
        ) -> Result<ApiResponse<GetNftMetadata>> {
            self.client.fetch::<GetNftMetadata>(params).await
        }
    }

}
