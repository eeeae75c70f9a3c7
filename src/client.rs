//! Async HTTP engine shared by the API modules.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver::{ApiResponse, Resolver};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use tracing::debug;

/// HTTP client and configuration shared by every module created from it.
///
/// Cloning is cheap: the connection pool and the configuration are shared.
#[derive(Clone, Debug)]
pub struct Core {
    client: Client,
    config: Arc<Config>,
}

impl Core {
    /// Build the HTTP client from a configuration.
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidHeader(name.as_str().to_string()))?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .timeout(config.http_timeout)
            .default_headers(headers);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            config: Arc::new(config),
        })
    }

    /// Build a core from the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Resolves endpoints of one API module against its base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    core: Core,
    module: &'static str,
    base_url: String,
}

impl ApiClient {
    pub fn new(core: Core, module: &'static str, base_url: impl Into<String>) -> Self {
        Self {
            core,
            module,
            base_url: base_url.into(),
        }
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one operation: transform the parameters, send the request, and
    /// transform the response.
    pub async fn fetch<R: Resolver>(&self, params: R::Params) -> Result<ApiResponse<R>> {
        let request = R::request(params, self.core.config())?;
        let url = request.url(&self.base_url)?;

        debug!(module = self.module, endpoint = R::NAME, %url, "sending request");

        let response = self.core.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(
                module = self.module,
                endpoint = R::NAME,
                status = status.as_u16(),
                "request failed"
            );
            return Err(Error::Status {
                endpoint: R::NAME,
                status: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value = response.json().await?;
        ApiResponse::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_creation() {
        let core = Core::with_defaults().expect("core");
        assert_eq!(
            core.config().evm_api_base_url,
            "https://deep-index.moralis.io/api/v2"
        );

        let core = Core::new(Config::default().evm_api_base_url("http://localhost:3030"))
            .expect("core");
        assert_eq!(core.config().evm_api_base_url, "http://localhost:3030");
    }

    #[test]
    fn invalid_default_header_is_rejected() {
        let config = Config::default().default_header("bad header", "value");
        let err = Core::new(config).expect_err("invalid header");
        assert!(matches!(err, Error::InvalidHeader(name) if name == "bad header"));
    }

    #[test]
    fn api_client_keeps_module_and_base_url() {
        let core = Core::with_defaults().expect("core");
        let client = ApiClient::new(core, "evmApi", "https://example.com/api");
        assert_eq!(client.module(), "evmApi");
        assert_eq!(client.base_url(), "https://example.com/api");
    }
}
