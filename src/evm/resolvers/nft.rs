//! NFT metadata.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::evm::{EvmAddress, EvmAddressish, EvmChainish, resolve_default_chain};
use crate::resolver::Resolver;
use crate::units::{parse_u64, parse_u256, parse_u256_hex};
use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET nft/{address}/{token_id}`
pub struct GetNftMetadata;

/// Encoding of token ids in the response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenIdFormat {
    Decimal,
    Hex,
}

#[derive(Clone, Debug)]
pub struct GetNftMetadataParams {
    pub chain: Option<EvmChainish>,
    /// The NFT contract.
    pub address: EvmAddressish,
    pub token_id: U256,
    pub format: Option<TokenIdFormat>,
}

impl GetNftMetadataParams {
    pub fn new(address: impl Into<EvmAddressish>, token_id: U256) -> Self {
        Self {
            chain: None,
            address: address.into(),
            token_id,
            format: None,
        }
    }

    pub fn chain(mut self, chain: impl Into<EvmChainish>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn format(mut self, format: TokenIdFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct GetNftMetadataApiParams {
    pub chain: String,
    #[serde(skip)]
    pub address: String,
    #[serde(skip)]
    pub token_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<TokenIdFormat>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadataJson {
    pub token_address: String,
    pub token_id: String,
    pub contract_type: String,
    #[serde(default)]
    pub owner_of: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub block_number_minted: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    /// Metadata document, encoded as a JSON string.
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub token_hash: Option<String>,
    #[serde(default)]
    pub last_token_uri_sync: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_metadata_sync: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NftMetadata {
    pub token_address: EvmAddress,
    pub token_id: U256,
    /// Encoding the service used for `token_id`; kept for the reverse transform.
    pub token_id_format: TokenIdFormat,
    /// `ERC721` or `ERC1155`.
    pub contract_type: String,
    pub owner_of: Option<EvmAddress>,
    pub block_number: Option<u64>,
    pub block_number_minted: Option<u64>,
    pub token_uri: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub amount: Option<U256>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub token_hash: Option<String>,
    pub last_token_uri_sync: Option<DateTime<Utc>>,
    pub last_metadata_sync: Option<DateTime<Utc>>,
}

impl Resolver for GetNftMetadata {
    const NAME: &'static str = "getNFTMetadata";

    type Params = GetNftMetadataParams;
    type ApiParams = GetNftMetadataApiParams;
    type ApiResult = NftMetadataJson;
    type Output = NftMetadata;
    type Json = NftMetadataJson;

    fn path(params: &Self::ApiParams) -> String {
        format!("nft/{}/{}", params.address, params.token_id)
    }

    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams> {
        Ok(GetNftMetadataApiParams {
            chain: resolve_default_chain(params.chain, config)?.api_hex(),
            address: params.address.resolve()?.lowercase(),
            token_id: params.token_id.to_string(),
            format: params.format,
        })
    }

    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output> {
        let metadata = data
            .metadata
            .as_deref()
            .map(|text| {
                serde_json::from_str(text).map_err(|source| Error::InvalidJsonString {
                    field: "metadata",
                    source,
                })
            })
            .transpose()?;

        let (token_id, token_id_format) =
            if data.token_id.starts_with("0x") || data.token_id.starts_with("0X") {
                (parse_u256_hex("token_id", &data.token_id)?, TokenIdFormat::Hex)
            } else {
                (parse_u256("token_id", &data.token_id)?, TokenIdFormat::Decimal)
            };

        Ok(NftMetadata {
            token_address: EvmAddress::create(&data.token_address)?,
            token_id,
            token_id_format,
            contract_type: data.contract_type,
            owner_of: data.owner_of.as_deref().map(EvmAddress::create).transpose()?,
            block_number: data
                .block_number
                .as_deref()
                .map(|value| parse_u64("block_number", value))
                .transpose()?,
            block_number_minted: data
                .block_number_minted
                .as_deref()
                .map(|value| parse_u64("block_number_minted", value))
                .transpose()?,
            token_uri: data.token_uri,
            metadata,
            amount: data
                .amount
                .as_deref()
                .map(|value| parse_u256("amount", value))
                .transpose()?,
            name: data.name,
            symbol: data.symbol,
            token_hash: data.token_hash,
            last_token_uri_sync: data.last_token_uri_sync,
            last_metadata_sync: data.last_metadata_sync,
        })
    }

    fn result_to_json(result: &Self::Output) -> Self::Json {
        NftMetadataJson {
            token_address: result.token_address.lowercase(),
            token_id: match result.token_id_format {
                TokenIdFormat::Decimal => result.token_id.to_string(),
                TokenIdFormat::Hex => format!("0x{:x}", result.token_id),
            },
            contract_type: result.contract_type.clone(),
            owner_of: result.owner_of.map(|address| address.lowercase()),
            block_number: result.block_number.map(|block| block.to_string()),
            block_number_minted: result.block_number_minted.map(|block| block.to_string()),
            token_uri: result.token_uri.clone(),
            metadata: result.metadata.as_ref().map(|value| value.to_string()),
            amount: result.amount.map(|amount| amount.to_string()),
            name: result.name.clone(),
            symbol: result.symbol.clone(),
            token_hash: result.token_hash.clone(),
            last_token_uri_sync: result.last_token_uri_sync,
            last_metadata_sync: result.last_metadata_sync,
        }
    }
}
