//! Opening data client. `OpeningSource` is the seam the practice controller
//! depends on; `HttpOpeningClient` talks to the opening service over HTTP.

use std::future::Future;

use opening_core::model::{Opening, OpeningSummary, RandomPick};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::TrainerConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

pub trait OpeningSource {
    fn list_openings(&self) -> impl Future<Output = Result<Vec<OpeningSummary>, FetchError>> + Send;

    fn opening_detail(&self, id: u32) -> impl Future<Output = Result<Opening, FetchError>> + Send;

    /// Ordered SAN moves of one variation.
    fn variation_moves(
        &self,
        id: u32,
        variation_name: &str,
    ) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;

    fn random_variation(&self) -> impl Future<Output = Result<RandomPick, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpOpeningClient {
    client: Client,
    base_url: Url,
}

impl HttpOpeningClient {
    pub fn new(config: &TrainerConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| FetchError::Transport(format!("bad API URL {}: {e}", config.api_url)))?;
        let client = Client::builder()
            .user_agent("ChessWiz/1.0")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport(format!("cannot build path on {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, FetchError> {
        let url = self.url(segments)?;
        debug!(%url, "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "Opening service returned an error");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("body read error: {e}")))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

impl OpeningSource for HttpOpeningClient {
    #[instrument(skip(self))]
    async fn list_openings(&self) -> Result<Vec<OpeningSummary>, FetchError> {
        self.get_json(&["api", "openings"]).await
    }

    #[instrument(skip(self))]
    async fn opening_detail(&self, id: u32) -> Result<Opening, FetchError> {
        self.get_json(&["api", "openings", &id.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn variation_moves(&self, id: u32, variation_name: &str) -> Result<Vec<String>, FetchError> {
        self.get_json(&["api", "openings", &id.to_string(), variation_name])
            .await
    }

    #[instrument(skip(self))]
    async fn random_variation(&self) -> Result<RandomPick, FetchError> {
        self.get_json(&["api", "practice", "random"]).await
    }
}
