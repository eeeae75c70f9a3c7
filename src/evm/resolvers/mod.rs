//! Endpoint descriptors of the EVM API, grouped by namespace.

pub mod balance;
pub mod nft;
pub mod token;
