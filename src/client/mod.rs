use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use url::Url;

use crate::error::ClientError;
use crate::models::{ScrapeRequest, ScrapeResult};

/// Fixed path of the scrape endpoint, joined onto the configured base URL.
pub const SCRAPE_PATH: &str = "/api/scrape";

/// Anything that can turn a URL into a `ScrapeResult`.
#[async_trait]
pub trait ScrapeClient: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, ClientError>;
}

/// `ScrapeClient` that POSTs `{ "url": ... }` to `{base}/api/scrape`.
#[derive(Clone, Debug)]
pub struct HttpScrapeClient {
    http: ReqwestClient,
    endpoint: Url,
}

impl HttpScrapeClient {
    /// `timeout` of `None` leaves reqwest's default (no overall deadline).
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let endpoint = endpoint_url(base_url)?;

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolve the scrape endpoint against `base_url`. Any path on the base is
/// replaced, matching how a browser resolves an absolute path.
pub fn endpoint_url(base_url: &str) -> Result<Url, ClientError> {
    let base = Url::parse(base_url)?;
    Ok(base.join(SCRAPE_PATH)?)
}

#[async_trait]
impl ScrapeClient for HttpScrapeClient {
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, ClientError> {
        let body = ScrapeRequest {
            url: url.to_string(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = ?e, endpoint = %self.endpoint, "Scrape endpoint unreachable");
                ClientError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url, "Scrape endpoint returned error status");
            return Err(ClientError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(ClientError::Transport)?;
        let result: ScrapeResult = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            url,
            images = result.images().len(),
            links = result.links().len(),
            "Scrape endpoint responded"
        );
        Ok(result)
    }
}
