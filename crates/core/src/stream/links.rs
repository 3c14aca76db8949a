//! Playable link resolution for ranked candidates.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::LinkStrategy;
use crate::descriptor::{parse_descriptor, DescriptorError};
use crate::filelist::{Candidate, IndexClient};
use crate::metrics::DESCRIPTOR_RESOLUTIONS;

/// A candidate paired with the link the host should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCandidate {
    pub candidate: Candidate,
    pub url: String,
}

/// Outcome of link resolution for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkResolution {
    /// Candidates with a playable link, in ranking order.
    pub resolved: Vec<ResolvedCandidate>,
    /// Candidates dropped because their descriptor could not be fetched or
    /// parsed. These may succeed on a later attempt.
    pub failed: usize,
}

impl LinkResolution {
    /// True when some candidate was lost to a descriptor failure.
    pub fn is_degraded(&self) -> bool {
        self.failed > 0
    }
}

/// Produces playable links according to the configured [`LinkStrategy`].
#[derive(Debug, Clone)]
pub struct LinkResolver {
    strategy: LinkStrategy,
    base_url: String,
}

impl LinkResolver {
    pub fn new(strategy: LinkStrategy, base_url: &str) -> Self {
        Self {
            strategy,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn strategy(&self) -> LinkStrategy {
        self.strategy
    }

    /// `<base_url>/torrent/<id>`
    pub fn proxy_url(&self, id: &str) -> String {
        format!("{}/torrent/{}", self.base_url, urlencoding::encode(id))
    }

    /// Resolve links for every candidate.
    ///
    /// Candidates whose link cannot be produced are dropped and logged; the
    /// others keep their relative order. With [`LinkStrategy::Magnet`] all
    /// descriptors are fetched concurrently and descriptor failures are
    /// counted in [`LinkResolution::failed`].
    pub async fn resolve(
        &self,
        index: &dyn IndexClient,
        passkey: &str,
        candidates: Vec<Candidate>,
    ) -> LinkResolution {
        match self.strategy {
            LinkStrategy::Magnet => {
                let lookups = candidates.into_iter().map(|candidate| async move {
                    let result = resolve_magnet(index, passkey, &candidate).await;
                    (candidate, result)
                });

                let mut resolution = LinkResolution::default();
                for (candidate, result) in join_all(lookups).await {
                    match result {
                        Ok(url) => {
                            DESCRIPTOR_RESOLUTIONS.with_label_values(&["ok"]).inc();
                            resolution.resolved.push(ResolvedCandidate { candidate, url });
                        }
                        Err(e) => {
                            DESCRIPTOR_RESOLUTIONS.with_label_values(&["failed"]).inc();
                            warn!(
                                id = ?candidate.id,
                                name = %candidate.name,
                                error = %e,
                                "Dropping candidate, descriptor resolution failed"
                            );
                            resolution.failed += 1;
                        }
                    }
                }
                resolution
            }
            LinkStrategy::Proxy => LinkResolution {
                resolved: candidates
                    .into_iter()
                    .filter_map(|candidate| match candidate.id.as_deref() {
                        Some(id) => {
                            let url = self.proxy_url(id);
                            Some(ResolvedCandidate { candidate, url })
                        }
                        None => {
                            warn!(name = %candidate.name, "Dropping candidate without id for proxy link");
                            None
                        }
                    })
                    .collect(),
                failed: 0,
            },
            LinkStrategy::Direct => LinkResolution {
                resolved: candidates
                    .into_iter()
                    .filter_map(|candidate| match candidate.download_link.clone() {
                        Some(url) => Some(ResolvedCandidate { candidate, url }),
                        None => {
                            warn!(name = %candidate.name, "Dropping candidate without download_link");
                            None
                        }
                    })
                    .collect(),
                failed: 0,
            },
        }
    }
}

async fn resolve_magnet(
    index: &dyn IndexClient,
    passkey: &str,
    candidate: &Candidate,
) -> Result<String, DescriptorError> {
    let id = candidate.id.as_deref().ok_or(DescriptorError::MissingId)?;
    let bytes = index.download_descriptor(id, passkey).await?;
    let descriptor = parse_descriptor(&bytes)?;

    debug!(
        id = id,
        info_hash = %descriptor.info_hash,
        trackers = descriptor.trackers.len(),
        "Resolved descriptor"
    );

    Ok(descriptor.magnet_link())
}
