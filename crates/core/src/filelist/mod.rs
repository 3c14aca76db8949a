//! FileList torrent index access.
//!
//! This module provides the `IndexClient` trait for searching FileList by
//! IMDb id and downloading .torrent files, plus the validation step that
//! turns raw search responses into candidates.

mod client;
mod types;

pub use client::{FileListClient, IndexClient};
pub use types::*;
