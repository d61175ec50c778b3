//! People API client
//!
//! Searches the SWAPI people endpoint by name. The API itself is an external
//! collaborator: this module only issues the request and decodes
//! `{ "results": [...] }`.

use crate::models::Person;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("holocron/", env!("CARGO_PKG_VERSION"));

/// People API client errors
#[derive(Debug, Error)]
pub enum SwapiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Search response body
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub count: Option<u64>,
    pub results: Vec<Person>,
}

/// Remote source of people records
#[async_trait]
pub trait PeopleSource: Send + Sync {
    /// Search people by name; an empty result is not an error here
    async fn search(&self, name: &str) -> Result<Vec<Person>, SwapiError>;
}

/// HTTP client for the people API
pub struct SwapiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    /// Build a client for `base_url` (e.g. `https://swapi.dev/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SwapiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SwapiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn people_url(&self) -> String {
        format!("{}/people/", self.base_url)
    }
}

#[async_trait]
impl PeopleSource for SwapiClient {
    async fn search(&self, name: &str) -> Result<Vec<Person>, SwapiError> {
        let url = self.people_url();

        tracing::debug!(name = %name, url = %url, "Querying people API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("search", name)])
            .send()
            .await
            .map_err(|e| SwapiError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SwapiError::Api(status.as_u16(), error_text));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SwapiError::Parse(e.to_string()))?;

        tracing::info!(
            name = %name,
            results = body.results.len(),
            "Retrieved people from API"
        );

        Ok(body.results)
    }
}
