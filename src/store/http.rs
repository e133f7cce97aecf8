use crate::config::Config;
use crate::errors::{StoreError, StoreResult};
use crate::models::{ContactRequest, Property};
use crate::store::traits::ListingStore;
use crate::store::types::{OrderSpec, PropertyQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

const PROPERTY_ENTITY: &str = "Property";
const CONTACT_REQUEST_ENTITY: &str = "ContactRequest";

/// Listing store backed by the hosted entities REST API
pub struct HttpListingStore {
    client: Client,
    base_url: String,
    app_id: String,
}

impl HttpListingStore {
    /// Create a store for the given API root and application
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key).context("API key is not a valid header value")?;
            headers.insert("api_key", value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("line-property/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
        })
    }

    /// Create a store from loaded configuration; requires an application id
    pub fn from_config(config: &Config) -> Result<Self> {
        let app_id = config
            .app_id
            .as_deref()
            .context("LINE_APP_ID must be set to use the hosted store")?;
        Self::new(
            config.api_url.clone(),
            app_id,
            config.api_key.as_deref(),
            config.http_timeout,
        )
    }

    fn entity_url(&self, entity: &str) -> String {
        format!("{}/apps/{}/entities/{}", self.base_url, self.app_id, entity)
    }

    /// Turn a non-success status into `StoreError::Status`, keeping the body
    /// for diagnostics
    async fn check_status(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Store returned status: {}", status);
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Decode a record array one record at a time; records that are not
    /// listings at all are skipped instead of failing the whole page
    fn decode_properties(body: &str) -> StoreResult<Vec<Property>> {
        let records: Vec<Value> = serde_json::from_str(body)?;
        let total = records.len();

        let properties: Vec<Property> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(property) => Some(property),
                Err(err) => {
                    warn!("Skipping undecodable property record: {}", err);
                    None
                }
            })
            .collect();

        if properties.len() < total {
            debug!("Decoded {} of {} property records", properties.len(), total);
        }
        Ok(properties)
    }

    async fn fetch_properties(&self, query: &[(&str, String)]) -> StoreResult<Vec<Property>> {
        let url = self.entity_url(PROPERTY_ENTITY);
        debug!("Fetching URL: {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let body = Self::check_status(response).await?.text().await?;

        debug!("Downloaded {} bytes of listings", body.len());
        Self::decode_properties(&body)
    }
}

#[async_trait]
impl ListingStore for HttpListingStore {
    async fn list(&self, order: &OrderSpec, limit: usize) -> StoreResult<Vec<Property>> {
        let properties = self
            .fetch_properties(&[("sort", order.to_string()), ("limit", limit.to_string())])
            .await?;
        info!("Fetched {} properties ({}, limit {})", properties.len(), order, limit);
        Ok(properties)
    }

    async fn filter(&self, query: &PropertyQuery) -> StoreResult<Vec<Property>> {
        let encoded = serde_json::to_string(query)?;
        let properties = self.fetch_properties(&[("q", encoded)]).await?;
        info!("Filter matched {} properties", properties.len());
        Ok(properties)
    }

    async fn create(&self, request: &ContactRequest) -> StoreResult<()> {
        let url = self.entity_url(CONTACT_REQUEST_ENTITY);
        debug!("Posting contact request to {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        Self::check_status(response).await?;

        info!("Contact request stored");
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "hosted"
    }
}
