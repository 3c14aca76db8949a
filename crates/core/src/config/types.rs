use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub filelist: FileListConfig,
    #[serde(default)]
    pub streams: StreamsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// FileList upstream configuration.
///
/// Missing `username` or `passkey` makes every stream request resolve to an
/// empty list; startup still succeeds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileListConfig {
    /// FileList account name (`FILELIST_USER`)
    #[serde(default)]
    pub username: Option<String>,
    /// FileList passkey (`FILELIST_PASSKEY`)
    #[serde(default)]
    pub passkey: Option<String>,
    /// Search API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Descriptor download endpoint
    #[serde(default = "default_download_url")]
    pub download_url: String,
    /// Search request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Descriptor download timeout in seconds (default: 10)
    #[serde(default = "default_descriptor_timeout")]
    pub descriptor_timeout_secs: u32,
}

impl Default for FileListConfig {
    fn default() -> Self {
        Self {
            username: None,
            passkey: None,
            api_url: default_api_url(),
            download_url: default_download_url(),
            timeout_secs: default_timeout(),
            descriptor_timeout_secs: default_descriptor_timeout(),
        }
    }
}

impl FileListConfig {
    /// The passkey alone, if present and non-empty. Descriptor downloads
    /// need nothing else.
    pub fn passkey(&self) -> Option<&str> {
        self.passkey.as_deref().filter(|s| !s.is_empty())
    }

    /// Both secrets, if both are present and non-empty.
    pub fn credentials(&self) -> Option<Credentials> {
        let username = self.username.as_deref().filter(|s| !s.is_empty())?;
        let passkey = self.passkey.as_deref().filter(|s| !s.is_empty())?;
        Some(Credentials {
            username: username.to_string(),
            passkey: passkey.to_string(),
        })
    }
}

fn default_api_url() -> String {
    "https://filelist.io/api.php".to_string()
}

fn default_download_url() -> String {
    "https://filelist.io/download.php".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_descriptor_timeout() -> u32 {
    10
}

/// The two opaque FileList secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub passkey: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("passkey", &"<redacted>")
            .finish()
    }
}

/// How the playable link of a stream is produced.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinkStrategy {
    /// Download the .torrent and build a magnet link from it.
    Magnet,
    /// Point at this service's `/torrent/{id}` pass-through route.
    #[default]
    Proxy,
    /// Use the `download_link` returned by the search API.
    Direct,
}

/// Stream output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamsConfig {
    /// Maximum number of streams returned per request (default: 2)
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub link_strategy: LinkStrategy,
    /// Public base URL of this service, used for proxy links (`BASE_URL`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// How long resolved stream lists are cached (default: 2 hours)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for StreamsConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            link_strategy: LinkStrategy::default(),
            base_url: default_base_url(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_max_results() -> usize {
    crate::ranking::DEFAULT_MAX_RESULTS
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_cache_ttl() -> u64 {
    2 * 60 * 60
}

/// Sanitized config for logging and API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub filelist: SanitizedFileListConfig,
    pub streams: StreamsConfig,
}

/// Sanitized FileList config (credentials hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedFileListConfig {
    pub api_url: String,
    pub download_url: String,
    pub username_configured: bool,
    pub passkey_configured: bool,
    pub timeout_secs: u32,
    pub descriptor_timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let fl = &config.filelist;
        Self {
            server: config.server.clone(),
            filelist: SanitizedFileListConfig {
                api_url: fl.api_url.clone(),
                download_url: fl.download_url.clone(),
                username_configured: fl.username.as_deref().is_some_and(|s| !s.is_empty()),
                passkey_configured: fl.passkey.as_deref().is_some_and(|s| !s.is_empty()),
                timeout_secs: fl.timeout_secs,
                descriptor_timeout_secs: fl.descriptor_timeout_secs,
            },
            streams: config.streams.clone(),
        }
    }
}
