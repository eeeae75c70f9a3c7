//! Error type shared by the resolvers and the HTTP client.

/// Client error type.
///
/// Validation variants come out of the parameter and response transforms and are
/// reported before (or instead of) any network traffic. The remaining variants
/// describe transport and decoding failures of a single call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid EVM address {value:?}: {reason}")]
    InvalidEvmAddress { value: String, reason: String },
    #[error("invalid EVM chain {0:?}")]
    InvalidChain(String),
    #[error("invalid Solana address {0:?}")]
    InvalidSolAddress(String),
    #[error("invalid Solana network {0:?}, expected `mainnet` or `devnet`")]
    InvalidSolNetwork(String),
    #[error("field `{field}` is not a valid integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("field `{field}` does not hold valid JSON: {source}")]
    InvalidJsonString {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
    #[cfg(feature = "client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "client")]
    #[error("invalid default header {0:?}")]
    InvalidHeader(String),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
