//! Types for the FileList search API.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// A single search result, valid for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// FileList torrent id, used for descriptor downloads and proxy links.
    pub id: Option<String>,
    /// Release name.
    pub name: String,
    /// Total size in bytes.
    pub size_bytes: u64,
    /// Seeders as reported by FileList. Zero or negative means unplayable.
    pub seeders: i64,
    /// Direct .torrent URL (FileList embeds the passkey in it).
    pub download_link: Option<String>,
    /// Info hash (lowercase hex) when the API includes one.
    pub info_hash: Option<String>,
}

/// Result of validating a search response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The body was a JSON array. Holds the elements that were well formed.
    Candidates(Vec<Candidate>),
    /// Anything else, with a description for the logs.
    Malformed(String),
}

/// Errors talking to FileList.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_connect() {
            UpstreamError::ConnectionFailed(e.to_string())
        } else if let Some(status) = e.status() {
            UpstreamError::Status(status.as_u16())
        } else {
            UpstreamError::Request(e.to_string())
        }
    }
}

/// Validate a search response body.
///
/// A JSON array is trusted as a result list. Elements that fail to decode are
/// skipped one by one with a warning. FileList's `{"error": "..."}` objects and
/// any other shape are reported as [`SearchOutcome::Malformed`].
pub fn parse_search_response(body: &[u8]) -> SearchOutcome {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => return SearchOutcome::Malformed(format!("invalid JSON: {}", e)),
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            return SearchOutcome::Malformed(match map.get("error") {
                Some(Value::String(message)) => format!("upstream error: {}", message),
                Some(other) => format!("upstream error: {}", other),
                None => "expected an array, got an object".to_string(),
            })
        }
        other => {
            return SearchOutcome::Malformed(format!(
                "expected an array, got {}",
                json_kind(&other)
            ))
        }
    };

    let mut candidates = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let parsed = serde_json::from_value::<FileListTorrent>(item)
            .map_err(|e| e.to_string())
            .and_then(Candidate::try_from);
        match parsed {
            Ok(candidate) => candidates.push(candidate),
            Err(reason) => warn!(index = idx, error = %reason, "Skipping invalid search result"),
        }
    }

    SearchOutcome::Candidates(candidates)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// FileList API response types

/// FileList sometimes quotes numbers; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(n) if n.fract() == 0.0 => Some(*n as i64),
            Scalar::Float(_) => None,
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileListTorrent {
    #[serde(default)]
    id: Option<Scalar>,
    name: String,
    size: Scalar,
    seeders: Scalar,
    #[serde(default)]
    download_link: Option<String>,
    #[serde(default)]
    info_hash: Option<String>,
}

impl TryFrom<FileListTorrent> for Candidate {
    type Error = String;

    fn try_from(t: FileListTorrent) -> Result<Self, Self::Error> {
        let size_bytes = t
            .size
            .as_i64()
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| "size is not a non-negative integer".to_string())?;
        let seeders = t
            .seeders
            .as_i64()
            .ok_or_else(|| "seeders is not an integer".to_string())?;
        let id = t.id.map(Scalar::into_string).filter(|s| !s.is_empty());
        let download_link = t.download_link.filter(|s| !s.is_empty());

        if id.is_none() && download_link.is_none() {
            return Err("neither id nor download_link present".to_string());
        }

        Ok(Candidate {
            id,
            name: t.name,
            size_bytes,
            seeders,
            download_link,
            info_hash: t
                .info_hash
                .filter(|h| !h.is_empty())
                .map(|h| h.to_lowercase()),
        })
    }
}
