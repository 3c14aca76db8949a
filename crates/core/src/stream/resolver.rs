//! Stream resolution entry point.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::cache::StreamCache;
use crate::config::{Config, Credentials};
use crate::filelist::{IndexClient, SearchOutcome};
use crate::identifier::{normalize, LookupKey};
use crate::metrics::STREAMS_RETURNED;
use crate::ranking::rank_candidates;

use super::format::stream_title;
use super::links::LinkResolver;
use super::types::{ResolveError, StreamRecord, StreamRequest, StreamResponse, SUPPORTED_MEDIA_TYPES};

/// Turns host stream requests into FileList stream records.
///
/// Constructed once at startup and shared between requests.
pub struct StreamResolver {
    index: Arc<dyn IndexClient>,
    cache: Arc<StreamCache>,
    links: LinkResolver,
    credentials: Option<Credentials>,
    max_results: usize,
}

impl StreamResolver {
    pub fn new(config: &Config, index: Arc<dyn IndexClient>, cache: Arc<StreamCache>) -> Self {
        Self {
            index,
            cache,
            links: LinkResolver::new(config.streams.link_strategy, &config.streams.base_url),
            credentials: config.filelist.credentials(),
            max_results: config.streams.max_results,
        }
    }

    pub fn cache(&self) -> &StreamCache {
        &self.cache
    }

    pub fn index(&self) -> &dyn IndexClient {
        self.index.as_ref()
    }

    /// Resolve streams for a request. Never fails: every error is logged
    /// and turned into an empty list.
    pub async fn resolve(&self, request: &StreamRequest) -> StreamResponse {
        let streams = match self.try_resolve(request).await {
            Ok(streams) => streams,
            Err(ResolveError::ConfigurationMissing) => {
                error!("Missing FILELIST_USER or FILELIST_PASSKEY, returning no streams");
                Vec::new()
            }
            Err(ResolveError::UnsupportedMediaType(media_type)) => {
                debug!(media_type = %media_type, "Ignoring unsupported media type");
                Vec::new()
            }
            Err(e @ ResolveError::Upstream(_)) => {
                warn!(id = ?request.id, error = %e, "Error fetching FileList data");
                Vec::new()
            }
            Err(e @ ResolveError::Malformed(_)) => {
                warn!(id = ?request.id, error = %e, "Treating FileList response as empty");
                Vec::new()
            }
        };

        STREAMS_RETURNED.observe(streams.len() as f64);
        StreamResponse { streams }
    }

    async fn try_resolve(&self, request: &StreamRequest) -> Result<Vec<StreamRecord>, ResolveError> {
        if !SUPPORTED_MEDIA_TYPES.contains(&request.media_type.as_str()) {
            return Err(ResolveError::UnsupportedMediaType(request.media_type.clone()));
        }

        let key = normalize(request.id.as_deref());

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ResolveError::ConfigurationMissing)?;

        if let Some(streams) = self.cache.get(&key).await {
            info!(key = %key, streams = streams.len(), "Cache hit");
            return Ok(streams);
        }

        let (streams, degraded) = self.fetch_streams(&key, credentials).await?;

        // Partial magnet results are served but never cached.
        if degraded {
            warn!(key = %key, streams = streams.len(), "Partial results, not caching");
        } else {
            self.cache.put(key.clone(), streams.clone()).await;
            info!(key = %key, streams = streams.len(), "Cached results");
        }

        Ok(streams)
    }

    async fn fetch_streams(
        &self,
        key: &LookupKey,
        credentials: &Credentials,
    ) -> Result<(Vec<StreamRecord>, bool), ResolveError> {
        info!(key = %key, backend = self.index.name(), "Fetching results");

        let candidates = match self.index.search(key, credentials).await? {
            SearchOutcome::Candidates(candidates) => candidates,
            SearchOutcome::Malformed(reason) => return Err(ResolveError::Malformed(reason)),
        };

        let total = candidates.len();
        let ranked = rank_candidates(candidates, self.max_results);
        debug!(key = %key, total = total, kept = ranked.len(), "Ranked candidates");

        let resolution = self
            .links
            .resolve(self.index.as_ref(), &credentials.passkey, ranked)
            .await;
        let degraded = resolution.is_degraded();

        let streams = resolution
            .resolved
            .into_iter()
            .map(|r| StreamRecord::new(stream_title(&r.candidate), r.url))
            .collect();

        Ok((streams, degraded))
    }
}
