//! Torrent descriptor parsing - turns a .torrent file into a magnet link.
//!
//! Uses librqbit-core to parse bencoded .torrent data and extract the info
//! hash, display name and tracker list without downloading anything else.

use librqbit_core::torrent_metainfo::{torrent_from_bytes, TorrentMetaV1Owned};
use thiserror::Error;

use crate::filelist::UpstreamError;

/// Errors that can occur while turning a descriptor into a playable link.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Candidate has no FileList id")]
    MissingId,

    #[error("Failed to download torrent: {0}")]
    Download(#[from] UpstreamError),

    #[error("Failed to parse torrent: {0}")]
    Parse(String),
}

/// The parts of a .torrent needed to build a magnet link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentDescriptor {
    /// Lowercase hex info hash.
    pub info_hash: String,
    /// Root name from the info dictionary.
    pub name: Option<String>,
    /// Announce URLs, tiers flattened, duplicates removed.
    pub trackers: Vec<String>,
}

impl TorrentDescriptor {
    /// Build a `magnet:?xt=urn:btih:...` link with name and trackers.
    pub fn magnet_link(&self) -> String {
        let mut link = format!("magnet:?xt=urn:btih:{}", self.info_hash);

        if let Some(name) = &self.name {
            link.push_str("&dn=");
            link.push_str(&urlencoding::encode(name));
        }

        for tracker in &self.trackers {
            link.push_str("&tr=");
            link.push_str(&urlencoding::encode(tracker));
        }

        link
    }
}

/// Parse a .torrent file.
pub fn parse_descriptor(bytes: &[u8]) -> Result<TorrentDescriptor, DescriptorError> {
    let torrent: TorrentMetaV1Owned =
        torrent_from_bytes(bytes).map_err(|e| DescriptorError::Parse(e.to_string()))?;

    let name = torrent
        .info
        .name
        .as_ref()
        .map(|b| bytes_to_string(b.as_ref()));

    let mut trackers: Vec<String> = Vec::new();
    let announce_urls = torrent
        .announce
        .iter()
        .chain(torrent.announce_list.iter().flatten());
    for url in announce_urls {
        let url = bytes_to_string(url.as_ref());
        if !url.is_empty() && !trackers.contains(&url) {
            trackers.push(url);
        }
    }

    Ok(TorrentDescriptor {
        info_hash: torrent.info_hash.as_string(),
        name,
        trackers,
    })
}

/// Convert bytes to a UTF-8 string, replacing invalid sequences.
fn bytes_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
