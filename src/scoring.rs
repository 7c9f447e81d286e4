//! Candidate scoring.
//!
//! Candidates arrive in the catalog's own relevance order; the rating
//! combines that rank with how closely the candidate's duration matches
//! the scraped one. The constants are empirical tuning carried over
//! unchanged from earlier versions of this tool — output compatibility
//! matters more than the exact shape of the curve.

use crate::types::{CandidateTrack, TrackRecord};

/// Rating lost per position of catalog rank.
pub const RANK_PENALTY: f64 = 0.2;

/// Ratings below this classify the best candidate as a bad match.
pub const ACCEPT_THRESHOLD: f64 = -10.0;

/// Parse a `MM:SS` duration into whole seconds.
///
/// Minutes may exceed 59 (long tracks are common in classical exports);
/// seconds must stay below 60. The error is a human-readable message
/// destined for the failure report, not a fatal condition.
pub fn parse_duration_secs(duration: &str) -> Result<u64, String> {
    let invalid = || format!("Invalid duration \"{duration}\"");
    let (minutes, seconds) = duration.split_once(':').ok_or_else(invalid)?;
    let minutes: u64 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: u64 = seconds.trim().parse().map_err(|_| invalid())?;
    if seconds > 59 {
        return Err(invalid());
    }
    Ok(minutes * 60 + seconds)
}

/// Rate every candidate against the scraped track.
///
/// `rating[i] = -RANK_PENALTY * i - |round(duration_ms / 1000) - D|`
/// where `D` is the scraped duration in seconds. One rating per
/// candidate, same order as the input.
pub fn rate_candidates(
    track: &TrackRecord,
    candidates: &[CandidateTrack],
) -> Result<Vec<f64>, String> {
    let duration_secs = parse_duration_secs(&track.duration)? as f64;
    Ok(candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let candidate_secs = (candidate.duration_ms as f64 / 1000.0).round();
            let duration_mismatch = (candidate_secs - duration_secs).abs();
            -RANK_PENALTY * idx as f64 - duration_mismatch
        })
        .collect())
}

/// Index and value of the highest rating, first occurrence on ties.
pub fn pick_best(ratings: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &rating) in ratings.iter().enumerate() {
        match best {
            Some((_, best_rating)) if rating <= best_rating => {}
            _ => best = Some((idx, rating)),
        }
    }
    best
}
