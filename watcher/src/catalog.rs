//! Client for the catalog toppings endpoint.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use shared::ToppingsResponse;

use crate::config::WatchConfig;
use crate::error::{ConfigError, CycleError};

const ORIGIN: &str = "https://www.rappi.com.ar";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Source of the current toppings payload.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_toppings(&self) -> Result<ToppingsResponse, CycleError>;
}

/// Fetches the toppings payload over HTTP with the browser-like headers the
/// catalog expects.
pub struct HttpCatalogClient {
    client: Client,
    url: String,
}

impl HttpCatalogClient {
    pub fn new(config: &WatchConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .default_headers(catalog_headers(&config.auth_token)?)
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self {
            client,
            url: config.catalog_url.clone(),
        })
    }
}

fn catalog_headers(auth_token: &str) -> Result<HeaderMap, ConfigError> {
    let mut authorization =
        HeaderValue::from_str(auth_token).map_err(|source| ConfigError::InvalidHeader {
            name: "RAPPI_AUTH_TOKEN",
            source,
        })?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(header::ORIGIN, HeaderValue::from_static(ORIGIN));
    Ok(headers)
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_toppings(&self) -> Result<ToppingsResponse, CycleError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CycleError::status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
