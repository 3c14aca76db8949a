//! Seed-count ranking of search candidates.

use crate::filelist::Candidate;

/// Default number of streams offered per title.
pub const DEFAULT_MAX_RESULTS: usize = 2;

/// Keep the best-seeded candidates.
///
/// Candidates with no seeders are dropped, the rest are sorted by seeders
/// (descending, ties keep their input order) and truncated to `limit`.
pub fn rank_candidates(candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = candidates.into_iter().filter(|c| c.seeders > 0).collect();

    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.seeders.cmp(&a.seeders));
    ranked.truncate(limit);
    ranked
}
