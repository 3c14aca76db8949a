//! Add-on manifest served to the media-player host.

use serde::{Deserialize, Serialize};

use crate::identifier::IMDB_PREFIX;
use crate::stream::SUPPORTED_MEDIA_TYPES;

pub const ADDON_ID: &str = "org.filelist.stremio";
pub const ADDON_NAME: &str = "FileList Addon";
pub const ADDON_DESCRIPTION: &str =
    "Watch movies and series from FileList.io (requires valid passkey)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub types: Vec<String>,
    pub resources: Vec<String>,
    pub catalogs: Vec<serde_json::Value>,
    pub id_prefixes: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            id: ADDON_ID.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: ADDON_NAME.to_string(),
            description: ADDON_DESCRIPTION.to_string(),
            types: SUPPORTED_MEDIA_TYPES.iter().map(|t| t.to_string()).collect(),
            resources: vec!["stream".to_string()],
            catalogs: Vec::new(),
            id_prefixes: vec![IMDB_PREFIX.to_string()],
        }
    }
}
