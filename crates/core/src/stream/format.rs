//! Human-readable stream titles.

use crate::filelist::Candidate;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * MIB;

/// Render a byte count: `"x.xx GB"` from 1 GiB up, `"x.x MB"` below.
pub fn format_size(bytes: u64) -> String {
    let gib = bytes as f64 / GIB;
    if gib >= 1.0 {
        format!("{:.2} GB", gib)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB)
    }
}

/// `"<name> (<size>) [<seeders> seeders]"`
pub fn stream_title(candidate: &Candidate) -> String {
    format!(
        "{} ({}) [{} seeders]",
        candidate.name,
        format_size(candidate.size_bytes),
        candidate.seeders
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::candidate;

    #[test]
    fn test_format_size_gigabytes() {
        assert_eq!(format_size(1073741824), "1.00 GB");
        assert_eq!(format_size(2147483648), "2.00 GB");
        assert_eq!(format_size(1610612736), "1.50 GB");
    }

    #[test]
    fn test_format_size_megabytes() {
        assert_eq!(format_size(524288000), "500.0 MB");
        assert_eq!(format_size(1048576), "1.0 MB");
        assert_eq!(format_size(0), "0.0 MB");
    }

    #[test]
    fn test_format_size_just_below_one_gib() {
        assert_eq!(format_size(1073741823), "1024.0 MB");
    }

    #[test]
    fn test_stream_title() {
        let mut c = candidate("1", "Movie A", 10);
        c.size_bytes = 2147483648;
        assert_eq!(stream_title(&c), "Movie A (2.00 GB) [10 seeders]");
    }
}
