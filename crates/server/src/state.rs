use std::sync::Arc;
use filelist_core::{Config, Manifest, SanitizedConfig, StreamResolver};

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: Arc<StreamResolver>,
    manifest: Manifest,
}

impl AppState {
    pub fn new(config: Config, resolver: Arc<StreamResolver>) -> Self {
        Self {
            config,
            resolver,
            manifest: Manifest::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn resolver(&self) -> &StreamResolver {
        self.resolver.as_ref()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}
