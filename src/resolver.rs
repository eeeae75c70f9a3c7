//! Declarative endpoint descriptors.
//!
//! Each API operation is a zero-sized type implementing [`Resolver`]. The
//! descriptor knows how to turn ergonomic parameters into the wire request and
//! how to turn the wire response into typed values (and back). The HTTP engine in
//! [`client`](crate::client) drives any resolver without knowing its shape.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

/// Specification of one API operation.
pub trait Resolver {
    /// Operation name, as used in the service's schema.
    const NAME: &'static str;

    /// Parameters accepted from the caller.
    type Params;
    /// Normalized wire parameters. Fields serialized by `Serialize` form the
    /// query string; path-only fields should be `#[serde(skip)]`.
    type ApiParams: Serialize;
    /// Response body as returned by the service.
    type ApiResult: DeserializeOwned;
    /// Typed result handed to the caller.
    type Output;
    /// JSON shape produced by [`Resolver::result_to_json`].
    type Json: Serialize;

    /// Relative path of the endpoint, without a leading slash.
    fn path(params: &Self::ApiParams) -> String;

    /// Validates and normalizes caller parameters.
    fn parse_params(params: Self::Params, config: &Config) -> Result<Self::ApiParams>;

    /// Converts the wire response into the typed result.
    fn api_to_result(data: Self::ApiResult) -> Result<Self::Output>;

    /// Converts a typed result back into its wire-compatible JSON form.
    fn result_to_json(result: &Self::Output) -> Self::Json;

    /// The url-encoded query string. Defaults to every serialized field of the
    /// wire parameters.
    #[inline]
    fn query(params: &Self::ApiParams) -> Result<Option<String>> {
        serialize_query(params)
    }

    /// Runs the parameter transform and builds the wire request.
    fn request(params: Self::Params, config: &Config) -> Result<EndpointRequest> {
        let api_params = Self::parse_params(params, config)?;
        Ok(EndpointRequest {
            name: Self::NAME,
            path: Self::path(&api_params),
            query: Self::query(&api_params)?,
        })
    }
}

/// A resolved wire request: relative path plus query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointRequest {
    pub name: &'static str,
    pub path: String,
    pub query: Option<String>,
}

impl EndpointRequest {
    /// Joins the request onto a base URL.
    pub fn url(&self, base_url: &str) -> Result<url::Url> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        let mut url = url::Url::parse(&joined)?;
        url.set_query(self.query.as_deref());
        Ok(url)
    }
}

/// Serializes parameters into a URL query string; an empty query yields `None`.
pub fn serialize_query<Q: Serialize>(q: &Q) -> Result<Option<String>> {
    let query = serde_urlencoded::to_string(q)?;
    Ok((!query.is_empty()).then_some(query))
}

/// The outcome of one call: the raw wire JSON and the typed result.
pub struct ApiResponse<R: Resolver> {
    raw: serde_json::Value,
    result: R::Output,
    _resolver: PhantomData<R>,
}

impl<R: Resolver> ApiResponse<R> {
    /// Decodes a wire body and applies the response transform.
    pub fn from_raw(raw: serde_json::Value) -> Result<Self> {
        let data: R::ApiResult = serde_json::from_value(raw.clone())?;
        let result = R::api_to_result(data)?;
        Ok(Self {
            raw,
            result,
            _resolver: PhantomData,
        })
    }

    /// The body exactly as the service returned it.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    pub fn result(&self) -> &R::Output {
        &self.result
    }

    pub fn into_result(self) -> R::Output {
        self.result
    }

    /// Re-serializes the typed result into its wire-compatible JSON form.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(R::result_to_json(&self.result)).map_err(Error::from)
    }
}

impl<R: Resolver> fmt::Debug for ApiResponse<R>
where
    R::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiResponse")
            .field("endpoint", &R::NAME)
            .field("result", &self.result)
            .finish()
    }
}
