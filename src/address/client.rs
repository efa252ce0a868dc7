use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::DaDataConfig;

/// One suggestion as the provider returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSuggestion {
    pub value: String,
    #[serde(default)]
    pub data: ProviderAddress,
}

/// Address details nested under a suggestion. Every field is optional on the
/// wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderAddress {
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub geo_lat: Option<String>,
    #[serde(default)]
    pub geo_lon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    suggestions: Vec<ProviderSuggestion>,
}

/// Outbound calls to the geocoding provider, behind a trait so tests can
/// substitute a stub.
#[async_trait]
pub trait GeocodeClient: Send + Sync {
    async fn suggest(&self, query: &str) -> anyhow::Result<Vec<ProviderSuggestion>>;
    async fn geolocate(&self, lat: &str, lon: &str) -> anyhow::Result<Vec<ProviderSuggestion>>;
}

/// DaData suggestion API client.
#[derive(Clone)]
pub struct DaDataClient {
    http: reqwest::Client,
    api_key: String,
    secret_key: String,
    base_url: String,
}

impl DaDataClient {
    pub fn new(config: &DaDataConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GeocodeClient for DaDataClient {
    async fn suggest(&self, query: &str) -> anyhow::Result<Vec<ProviderSuggestion>> {
        let url = format!("{}/suggest/address", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.api_key))
            .header("X-Secret", &self.secret_key)
            .json(&json!({ "query": query }))
            .send()
            .await
            .context("dadata suggest request")?
            .error_for_status()
            .context("dadata suggest status")?;

        let body: ProviderResponse = response.json().await.context("dadata suggest body")?;
        debug!(count = body.suggestions.len(), "dadata suggest");
        Ok(body.suggestions)
    }

    async fn geolocate(&self, lat: &str, lon: &str) -> anyhow::Result<Vec<ProviderSuggestion>> {
        let url = format!("{}/geolocate/address", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.api_key))
            .json(&json!({ "lat": lat, "lon": lon }))
            .send()
            .await
            .context("dadata geolocate request")?
            .error_for_status()
            .context("dadata geolocate status")?;

        let body: ProviderResponse = response.json().await.context("dadata geolocate body")?;
        debug!(count = body.suggestions.len(), "dadata geolocate");
        Ok(body.suggestions)
    }
}
