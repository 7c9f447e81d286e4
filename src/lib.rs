pub mod catalog;
pub mod client;
pub mod error;
pub mod importer;
pub mod matcher;
pub mod query;
pub mod report;
pub mod retry;
pub mod review;
pub mod scoring;
pub mod types;

pub use catalog::SpotifyCatalog;
pub use client::SpotifyCatalogClient;
pub use error::ImportError;
pub use importer::{ImportOptions, Importer, BATCH_SIZE};
pub use matcher::{Matcher, NO_CANDIDATES};
pub use query::{Field, QueryBuilder, DEFAULT_IGNORE_TAGS};
pub use report::{FailureReport, Library};
pub use retry::{with_retry, RetryConfig};
pub use review::{review_bad_matches, ConfirmPrompt, ReviewSummary, StdinPrompt};
pub use scoring::{ACCEPT_THRESHOLD, RANK_PENALTY};
pub use types::{
    CandidateTrack, FailureRecord, ImportSummary, MatchResult, Playlist, SpotifyUser, TrackRecord,
};

#[cfg(feature = "mock")]
pub use catalog::MockSpotifyCatalog;

pub type Result<T> = std::result::Result<T, ImportError>;
