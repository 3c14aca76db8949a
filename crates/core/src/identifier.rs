//! External identifier normalization.
//!
//! The host addresses titles by IMDb id (`tt0111161`, or
//! `tt0944947:1:2` for a series episode); FileList's IMDb search expects
//! the bare digits.

use serde::{Deserialize, Serialize};

/// Prefix carried by every IMDb identifier.
pub const IMDB_PREFIX: &str = "tt";

/// Normalized identifier used to query FileList and to key the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The part sent as the search `query` (everything before the first `:`).
    pub fn imdb_query(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }

    /// Season and episode for keys shaped like `<imdb>:<season>:<episode>`.
    pub fn episode(&self) -> Option<(u32, u32)> {
        let mut parts = self.0.split(':').skip(1);
        let season = parts.next()?.parse().ok()?;
        let episode = parts.next()?.parse().ok()?;
        Some((season, episode))
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip the IMDb prefix from an external identifier.
///
/// Identifiers without the prefix pass through unchanged; a missing
/// identifier yields an empty key.
pub fn normalize(external_id: Option<&str>) -> LookupKey {
    let id = external_id.unwrap_or_default();
    let key = id.strip_prefix(IMDB_PREFIX).unwrap_or(id);
    LookupKey(key.to_string())
}
