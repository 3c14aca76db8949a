use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Well-known deployment variables and the config keys they override.
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("FILELIST_USER", "filelist.username"),
    ("FILELIST_PASSKEY", "filelist.passkey"),
    ("BASE_URL", "streams.base_url"),
];

/// Load configuration with environment variable overrides.
///
/// Layering, lowest to highest: built-in defaults, the optional TOML file,
/// `FILELIST_ADDON_*` variables (`__` separates nested keys), then
/// `FILELIST_USER`, `FILELIST_PASSKEY`, `BASE_URL` and `PORT`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("FILELIST_ADDON_").split("__"));

    // Secrets are merged as plain strings so an all-digit passkey is not
    // reinterpreted as a number.
    for (var, key) in WELL_KNOWN_ENV {
        if let Ok(value) = std::env::var(var) {
            figment = figment.merge(Serialized::default(key, value));
        }
    }

    if let Ok(port) = std::env::var("PORT") {
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::ParseError(format!("PORT is not a valid port: {}", port)))?;
        figment = figment.merge(Serialized::default("server.port", port));
    }

    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
