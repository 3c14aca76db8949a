//! FileList HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::{Credentials, FileListConfig};
use crate::identifier::LookupKey;
use crate::metrics::UPSTREAM_REQUESTS;

use super::types::{parse_search_response, SearchOutcome, UpstreamError};

/// Trait for the torrent index backing the add-on.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Search by IMDb id. Returns the validated outcome of one request.
    async fn search(
        &self,
        key: &LookupKey,
        credentials: &Credentials,
    ) -> Result<SearchOutcome, UpstreamError>;

    /// Download the raw .torrent for a FileList torrent id.
    async fn download_descriptor(&self, id: &str, passkey: &str) -> Result<Vec<u8>, UpstreamError>;
}

/// FileList search/download implementation.
pub struct FileListClient {
    client: Client,
    api_url: String,
    download_url: String,
    search_timeout: Duration,
    descriptor_timeout: Duration,
}

impl FileListClient {
    /// Create a new client from the `[filelist]` configuration.
    pub fn new(config: &FileListConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(concat!("filelist-addon/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            download_url: config.download_url.clone(),
            search_timeout: Duration::from_secs(config.timeout_secs as u64),
            descriptor_timeout: Duration::from_secs(config.descriptor_timeout_secs as u64),
        })
    }

    /// Build the search API URL.
    fn build_search_url(&self, key: &LookupKey, credentials: &Credentials) -> String {
        let mut url = format!(
            "{}?username={}&passkey={}&action=search-torrents&type=imdb&query={}",
            self.api_url,
            urlencoding::encode(&credentials.username),
            urlencoding::encode(&credentials.passkey),
            urlencoding::encode(key.imdb_query())
        );

        if let Some((season, episode)) = key.episode() {
            url.push_str(&format!("&season={}&episode={}", season, episode));
        }

        url
    }

    /// Build the descriptor download URL.
    fn build_download_url(&self, id: &str, passkey: &str) -> String {
        format!(
            "{}?id={}&passkey={}",
            self.download_url,
            urlencoding::encode(id),
            urlencoding::encode(passkey)
        )
    }

    async fn get_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, UpstreamError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl IndexClient for FileListClient {
    fn name(&self) -> &str {
        "filelist"
    }

    async fn search(
        &self,
        key: &LookupKey,
        credentials: &Credentials,
    ) -> Result<SearchOutcome, UpstreamError> {
        debug!(key = %key, episode = ?key.episode(), "Searching FileList");

        let url = self.build_search_url(key, credentials);
        let body = match self.get_bytes(&url, self.search_timeout).await {
            Ok(body) => body,
            Err(e) => {
                UPSTREAM_REQUESTS
                    .with_label_values(&["search", "unavailable"])
                    .inc();
                return Err(e);
            }
        };

        let outcome = parse_search_response(&body);
        match &outcome {
            SearchOutcome::Candidates(candidates) => {
                UPSTREAM_REQUESTS.with_label_values(&["search", "ok"]).inc();
                debug!(key = %key, results = candidates.len(), "FileList search complete");
            }
            SearchOutcome::Malformed(_) => {
                UPSTREAM_REQUESTS
                    .with_label_values(&["search", "malformed"])
                    .inc();
            }
        }

        Ok(outcome)
    }

    async fn download_descriptor(&self, id: &str, passkey: &str) -> Result<Vec<u8>, UpstreamError> {
        debug!(id = id, "Downloading .torrent from FileList");

        let url = self.build_download_url(id, passkey);
        let result = self.get_bytes(&url, self.descriptor_timeout).await;

        let label = if result.is_ok() { "ok" } else { "unavailable" };
        UPSTREAM_REQUESTS
            .with_label_values(&["download", label])
            .inc();

        result
    }
}
