//! Stream resolution pipeline.
//!
//! identifier → cache → FileList search → ranking → link resolution →
//! formatting → cache. [`StreamResolver`] is the only entry point the
//! transport layer needs.

mod format;
mod links;
mod resolver;
mod types;

pub use format::{format_size, stream_title};
pub use links::{LinkResolution, LinkResolver, ResolvedCandidate};
pub use resolver::StreamResolver;
pub use types::*;
