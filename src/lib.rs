//! Typed async client for the Moralis EVM and Solana data APIs.
//!
//! Every API operation is described by a [`Resolver`]: how caller parameters
//! become a wire request (path and query, with addresses normalized and default
//! chains resolved) and how the wire response becomes typed values such as
//! [`U256`](alloy_primitives::U256) amounts. The API modules expose those
//! operations as namespaced async methods.
//!
//! # Features
//!
//! - **`client`** (enabled by default): [`Core`], [`EvmApi`] and [`SolApi`],
//!   built on `reqwest`. Without it the resolvers, value types and the
//!   [`codegen`] renderer are still available.
//! - **`cli`**: the `generate-web3-api-types` binary, which regenerates the
//!   Web3 API TypeScript declarations from the service's OpenAPI schema.
//!
//! # Quick start
//!
//! ```no_run
//! use moralis_web3_api::{Config, Core, EvmApi, SolApi};
//! use moralis_web3_api::evm::resolvers::balance::GetNativeBalanceParams;
//! use moralis_web3_api::sol::resolvers::SolAddressParams;
//!
//! #[tokio::main]
//! async fn main() -> moralis_web3_api::Result<()> {
//!     let core = Core::new(Config::default().default_header("x-api-key", "<key>"))?;
//!
//!     let evm = EvmApi::create(&core);
//!     let balance = evm
//!         .balance()
//!         .get_native_balance(GetNativeBalanceParams::new(
//!             "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
//!         ))
//!         .await?;
//!     println!("{} ETH", balance.result().balance.to_ether_string());
//!
//!     let sol = SolApi::create(&core);
//!     let balance = sol
//!         .account()
//!         .get_balance(SolAddressParams::new("BWeBmN8zYDXgx2tnGj72cA533GZEWAVeqR9Eu29txaPT"))
//!         .await?;
//!     println!("{} SOL", balance.result().to_sol_string());
//!     Ok(())
//! }
//! ```

pub mod codegen;
mod config;
mod error;
pub mod evm;
pub mod resolver;
pub mod sol;
pub mod units;

#[cfg(feature = "client")]
pub mod client;

pub use config::{Config, EVM_API_BASE_URL, SOL_API_BASE_URL};
pub use error::{Error, Result};
pub use resolver::{ApiResponse, EndpointRequest, Resolver};

#[cfg(feature = "client")]
pub use client::{ApiClient, Core};

#[cfg(feature = "client")]
pub use evm::EvmApi;

#[cfg(feature = "client")]
pub use sol::SolApi;
