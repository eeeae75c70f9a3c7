//! NFT metadata on Solana.

use super::{SolAddressApiParams, SolAddressParams};
use crate::config::Config;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::sol::SolAddress;
use serde::{Deserialize, Serialize};

pub type GetNftMetadataParams = SolAddressParams;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaplexJson {
    pub metadata_uri: String,
    pub update_authority: String,
    pub seller_fee_basis_points: u16,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub master_edition: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolNftMetadataJson {
    pub mint: String,
    pub standard: String,
    pub name: String,
    pub symbol: String,
    pub metaplex: MetaplexJson,
}

/// Metaplex token-metadata account fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metaplex {
    pub metadata_uri: String,
    pub update_authority: SolAddress,
    pub seller_fee_basis_points: u16,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub master_edition: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolNftMetadata {
    pub mint: SolAddress,
    pub standard: String,
    pub name: String,
    pub symbol: String,
    pub metaplex: Metaplex,
}

/// `GET nft/{network}/{address}/metadata`
pub struct GetNftMetadata;

impl Resolver for GetNftMetadata {
    const NAME: &'static str = "getNFTMetadata";

    type Params = GetNftMetadataParams;
    type ApiParams = SolAddressApiParams;
    type ApiResult = SolNftMetadataJson;
    type Output = SolNftMetadata;
    type Json = SolNftMetadataJson;

    fn path(params: &Self::ApiParams) -> String {
        format!("nft/{}/{}/metadata", params.network, params.address)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        SolAddressApiParams::parse(params, config)
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        let metaplex = data.metaplex;
        Ok(SolNftMetadata {
            mint: SolAddress::create(&data.mint)?,
            standard: data.standard,
            name: data.name,
            symbol: data.symbol,
            metaplex: Metaplex {
                update_authority: SolAddress::create(&metaplex.update_authority)?,
                metadata_uri: metaplex.metadata_uri,
                seller_fee_basis_points: metaplex.seller_fee_basis_points,
                primary_sale_happened: metaplex.primary_sale_happened,
                is_mutable: metaplex.is_mutable,
                master_edition: metaplex.master_edition,
            },
        })
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        let metaplex = &result.metaplex;
        SolNftMetadataJson {
            mint: result.mint.to_string(),
            standard: result.standard.clone(),
            name: result.name.clone(),
            symbol: result.symbol.clone(),
            metaplex: MetaplexJson {
                metadata_uri: metaplex.metadata_uri.clone(),
                update_authority: metaplex.update_authority.to_string(),
                seller_fee_basis_points: metaplex.seller_fee_basis_points,
                primary_sale_happened: metaplex.primary_sale_happened,
                is_mutable: metaplex.is_mutable,
                master_edition: metaplex.master_edition,
            },
        }
    }
}
