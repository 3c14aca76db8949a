use super::{types::Config, ConfigError};

/// Longest accepted cache TTL (30 days).
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Search timeout is within 10..=30 seconds
/// - At least one stream is returned per request
/// - Cache TTL is between 1 second and 30 days
///
/// Missing FileList credentials are not an error here; the resolver
/// reports them per request.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if !(10..=30).contains(&config.filelist.timeout_secs) {
        return Err(ConfigError::ValidationError(format!(
            "filelist.timeout_secs must be between 10 and 30, got {}",
            config.filelist.timeout_secs
        )));
    }

    if config.filelist.descriptor_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "filelist.descriptor_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.streams.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "streams.max_results cannot be 0".to_string(),
        ));
    }

    if config.streams.cache_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "streams.cache_ttl_secs cannot be 0".to_string(),
        ));
    }

    if config.streams.cache_ttl_secs > MAX_CACHE_TTL_SECS {
        return Err(ConfigError::ValidationError(format!(
            "streams.cache_ttl_secs must be at most {}, got {}",
            MAX_CACHE_TTL_SECS, config.streams.cache_ttl_secs
        )));
    }

    Ok(())
}
