//! Core data types for the import pipeline.
//!
//! The extractor side of the migration produces [`TrackRecord`]s as plain
//! scraped text; everything downstream (query building, candidate scoring,
//! batching) consumes them read-only. Match outcomes are modeled as the
//! [`MatchResult`] tagged union rather than exceptions so that a bad match
//! and an unresolvable track are ordinary values the importer can record
//! and move past.

use serde::{Deserialize, Serialize};

/// A track as scraped from the source music service.
///
/// All fields are freeform strings exactly as they appeared in the source
/// UI. `title` is expected to be non-empty; the other fields may be empty
/// or carry placeholder values ("Unknown", "Unbekannt", ...) which the
/// query builder filters out via its ignore list.
///
/// # Examples
///
/// ```rust
/// use spotify_import::TrackRecord;
///
/// let track = TrackRecord {
///     title: "Paranoid Android".to_string(),
///     duration: "6:23".to_string(),
///     artist: "Radiohead".to_string(),
///     album: "OK Computer".to_string(),
/// };
/// assert_eq!(track.duration, "6:23");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRecord {
    /// The track title
    pub title: String,
    /// Track length formatted as `MM:SS`; minutes may exceed 59
    #[serde(default)]
    pub duration: String,
    /// The artist name, possibly empty
    #[serde(default)]
    pub artist: String,
    /// The album name, possibly empty
    #[serde(default)]
    pub album: String,
}

/// A track returned by the destination catalog's search.
///
/// Only the fields the scorer needs are kept; candidates are ephemeral
/// and re-fetched for every query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateTrack {
    /// Spotify track id
    pub id: String,
    /// Track length in milliseconds
    pub duration_ms: u64,
}

/// A playlist on the destination service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Playlist {
    /// Spotify playlist id
    pub id: String,
    /// Display name
    pub name: String,
}

/// The authenticated Spotify user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpotifyUser {
    /// Spotify user id, used as playlist owner
    pub id: String,
}

/// Outcome of matching one [`TrackRecord`] against the destination catalog.
///
/// Produced by [`Matcher::resolve`](crate::Matcher::resolve). `Rejected`
/// keeps the best candidate's id so a human can still accept it during
/// the review loop.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// The best candidate scored above the acceptance threshold.
    Accepted {
        /// Id of the accepted catalog track
        track_id: String,
    },
    /// Candidates existed but the best one scored below the threshold.
    Rejected {
        /// Id of the best (still rejected) candidate
        track_id: String,
        /// The candidate's computed rating
        rating: f64,
    },
    /// No candidates at any relaxation level, or the record itself was
    /// unusable (e.g. an unparseable duration).
    Unresolved {
        /// Human-readable explanation, recorded in the failure report
        reason: String,
    },
}

/// One entry of the failure report.
///
/// `playlist_id` and `song_resolution_id` are present only for bad
/// matches; they carry the context needed to accept the candidate later
/// during review. Wire field names match the report format produced by
/// earlier versions of this tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// The original scraped track
    pub song: TrackRecord,
    /// Why the track was not imported
    pub reason: String,
    /// Destination playlist id (bad matches only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub playlist_id: Option<String>,
    /// Best candidate's track id (bad matches only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub song_resolution_id: Option<String>,
}

impl FailureRecord {
    /// Whether this entry is a reviewable bad match.
    pub fn is_bad_match(&self) -> bool {
        self.reason.starts_with("Bad match")
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of playlists created
    pub playlists: usize,
    /// Tracks accepted and submitted
    pub imported: usize,
    /// Tracks recorded in the failure report
    pub failed: usize,
}
