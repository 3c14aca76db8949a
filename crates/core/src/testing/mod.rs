//! Testing utilities and mock implementations.
//!
//! This module provides a mock `IndexClient` and a controllable clock,
//! allowing the whole resolution pipeline to be exercised without network
//! access.
//!
//! # Example
//!
//! ```rust,ignore
//! use filelist_core::testing::{fixtures, MockIndexClient};
//!
//! let index = MockIndexClient::new();
//! index.set_results(vec![fixtures::candidate("1", "Movie A", 10)]).await;
//! index.set_descriptor("1", fixtures::torrent_bytes("Movie.A.mkv")).await;
//! ```

mod manual_clock;
mod mock_index_client;

pub use manual_clock::ManualClock;
pub use mock_index_client::MockIndexClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::Config;
    use crate::filelist::Candidate;

    /// Create a test candidate (1 GiB) with the given id, name and seeders.
    pub fn candidate(id: &str, name: &str, seeders: i64) -> Candidate {
        Candidate {
            id: Some(id.to_string()),
            name: name.to_string(),
            size_bytes: 1024 * 1024 * 1024,
            seeders,
            download_link: None,
            info_hash: None,
        }
    }

    /// Create a test candidate with an explicit size.
    pub fn sized_candidate(id: &str, name: &str, size_bytes: u64, seeders: i64) -> Candidate {
        Candidate {
            size_bytes,
            ..candidate(id, name, seeders)
        }
    }

    /// A config with credentials set and every other value at its default.
    pub fn config() -> Config {
        let mut config = Config::default();
        config.filelist.username = Some("test-user".to_string());
        config.filelist.passkey = Some("test-passkey".to_string());
        config
    }

    /// A config without FileList credentials.
    pub fn config_without_credentials() -> Config {
        Config::default()
    }

    /// Minimal single-file .torrent announcing to one tracker.
    pub fn torrent_bytes(name: &str) -> Vec<u8> {
        torrent_bytes_with_trackers(name, Some("http://tracker.test/announce"), &[])
    }

    /// Minimal single-file .torrent with explicit `announce` / `announce-list`.
    pub fn torrent_bytes_with_trackers(
        name: &str,
        announce: Option<&str>,
        tiers: &[&[&str]],
    ) -> Vec<u8> {
        fn bstr(out: &mut Vec<u8>, s: &[u8]) {
            out.extend_from_slice(format!("{}:", s.len()).as_bytes());
            out.extend_from_slice(s);
        }

        let mut out = b"d".to_vec();
        if let Some(url) = announce {
            bstr(&mut out, b"announce");
            bstr(&mut out, url.as_bytes());
        }
        if !tiers.is_empty() {
            bstr(&mut out, b"announce-list");
            out.push(b'l');
            for tier in tiers {
                out.push(b'l');
                for url in *tier {
                    bstr(&mut out, url.as_bytes());
                }
                out.push(b'e');
            }
            out.push(b'e');
        }
        bstr(&mut out, b"info");
        out.push(b'd');
        bstr(&mut out, b"length");
        out.extend_from_slice(b"i1048576e");
        bstr(&mut out, b"name");
        bstr(&mut out, name.as_bytes());
        bstr(&mut out, b"piece length");
        out.extend_from_slice(b"i262144e");
        bstr(&mut out, b"pieces");
        bstr(&mut out, &[0xAB; 80]);
        out.extend_from_slice(b"ee");
        out
    }
}
