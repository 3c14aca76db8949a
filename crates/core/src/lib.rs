pub mod cache;
pub mod config;
pub mod descriptor;
pub mod filelist;
pub mod identifier;
pub mod manifest;
pub mod metrics;
pub mod ranking;
pub mod stream;
pub mod testing;

pub use cache::{Clock, StreamCache, SystemClock};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, Credentials,
    LinkStrategy, SanitizedConfig,
};
pub use descriptor::{parse_descriptor, DescriptorError, TorrentDescriptor};
pub use filelist::{Candidate, FileListClient, IndexClient, SearchOutcome, UpstreamError};
pub use identifier::{normalize, LookupKey};
pub use manifest::Manifest;
pub use ranking::rank_candidates;
pub use stream::{
    ResolveError, StreamRecord, StreamRequest, StreamResolver, StreamResponse,
};
