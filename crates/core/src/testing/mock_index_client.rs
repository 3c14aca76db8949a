//! Mock torrent index for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Credentials;
use crate::filelist::{Candidate, IndexClient, SearchOutcome, UpstreamError};
use crate::identifier::LookupKey;

/// Mock index client for testing.
///
/// Returns canned search results and .torrent bytes, and records every call.
pub struct MockIndexClient {
    /// Results returned by every search unless a one-shot override is set.
    results: Arc<RwLock<Vec<Candidate>>>,
    /// Outcome returned by the next search only.
    next_outcome: Arc<RwLock<Option<SearchOutcome>>>,
    /// Error returned by the next search only.
    next_error: Arc<RwLock<Option<UpstreamError>>>,
    /// Descriptor responses keyed by torrent id.
    descriptors: Arc<RwLock<HashMap<String, Result<Vec<u8>, UpstreamError>>>>,
    /// Recorded search keys.
    searches: Arc<RwLock<Vec<LookupKey>>>,
    /// Recorded (id, passkey) descriptor downloads.
    downloads: Arc<RwLock<Vec<(String, String)>>>,
}

impl std::fmt::Debug for MockIndexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockIndexClient").finish_non_exhaustive()
    }
}

impl Default for MockIndexClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockIndexClient {
    /// Create a new mock that returns no results.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            next_outcome: Arc::new(RwLock::new(None)),
            next_error: Arc::new(RwLock::new(None)),
            descriptors: Arc::new(RwLock::new(HashMap::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            downloads: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the results returned by searches.
    pub async fn set_results(&self, results: Vec<Candidate>) {
        *self.results.write().await = results;
    }

    /// Return `outcome` from the next search (one-shot).
    pub async fn set_next_outcome(&self, outcome: SearchOutcome) {
        *self.next_outcome.write().await = Some(outcome);
    }

    /// Fail the next search with `error` (one-shot).
    pub async fn set_next_error(&self, error: UpstreamError) {
        *self.next_error.write().await = Some(error);
    }

    /// Serve `bytes` for descriptor `id`.
    pub async fn set_descriptor(&self, id: &str, bytes: Vec<u8>) {
        self.descriptors
            .write()
            .await
            .insert(id.to_string(), Ok(bytes));
    }

    /// Fail downloads of descriptor `id` with `error`.
    pub async fn set_descriptor_error(&self, id: &str, error: UpstreamError) {
        self.descriptors
            .write()
            .await
            .insert(id.to_string(), Err(error));
    }

    /// Number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Keys of all searches performed, in order.
    pub async fn recorded_searches(&self) -> Vec<LookupKey> {
        self.searches.read().await.clone()
    }

    /// Number of descriptor downloads attempted.
    pub async fn download_count(&self) -> usize {
        self.downloads.read().await.len()
    }

    /// (id, passkey) of all descriptor downloads, in order.
    pub async fn recorded_downloads(&self) -> Vec<(String, String)> {
        self.downloads.read().await.clone()
    }
}

#[async_trait]
impl IndexClient for MockIndexClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        key: &LookupKey,
        _credentials: &Credentials,
    ) -> Result<SearchOutcome, UpstreamError> {
        self.searches.write().await.push(key.clone());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        if let Some(outcome) = self.next_outcome.write().await.take() {
            return Ok(outcome);
        }

        Ok(SearchOutcome::Candidates(self.results.read().await.clone()))
    }

    async fn download_descriptor(&self, id: &str, passkey: &str) -> Result<Vec<u8>, UpstreamError> {
        self.downloads
            .write()
            .await
            .push((id.to_string(), passkey.to_string()));

        match self.descriptors.read().await.get(id) {
            Some(result) => result.clone(),
            None => Err(UpstreamError::Status(404)),
        }
    }
}
