//! Types exchanged with the media-player host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filelist::UpstreamError;

/// Display name shown by the host for every stream from this add-on.
pub const STREAM_DISPLAY_NAME: &str = "FileList";

/// Grouping tag letting the host keep picking FileList streams for the next
/// episode.
pub const BINGE_GROUP: &str = "filelist";

/// Media types the add-on answers for.
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &["movie", "series"];

/// A playable entry returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    /// Always [`STREAM_DISPLAY_NAME`].
    pub name: String,
    /// `"<name> (<size>) [<seeders> seeders]"`.
    pub title: String,
    /// Magnet link or HTTP URL of the .torrent file.
    pub url: String,
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub binge_group: String,
}

impl StreamRecord {
    pub fn new(title: String, url: String) -> Self {
        Self {
            name: STREAM_DISPLAY_NAME.to_string(),
            title,
            url,
            behavior_hints: BehaviorHints {
                binge_group: BINGE_GROUP.to_string(),
            },
        }
    }
}

/// A stream request from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRequest {
    /// `movie` or `series`.
    #[serde(rename = "type")]
    pub media_type: String,
    /// External identifier, e.g. `tt0111161`.
    #[serde(default)]
    pub id: Option<String>,
}

impl StreamRequest {
    pub fn new(media_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            id: Some(id.into()),
        }
    }
}

/// Response body for a stream request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamResponse {
    pub streams: Vec<StreamRecord>,
}

/// Failures inside the resolution pipeline.
///
/// None of these escape [`super::StreamResolver::resolve`]; they decide
/// how the failure is logged and whether anything is cached.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("FILELIST_USER or FILELIST_PASSKEY is not configured")]
    ConfigurationMissing,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("FileList unavailable: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("FileList returned a malformed response: {0}")]
    Malformed(String),
}
