//! The relaxation state machine.
//!
//! One scraped track, one decision. The matcher issues progressively
//! looser catalog searches until a level yields candidates, then scores
//! those candidates and commits — a poor match is never an excuse to
//! relax further, since looser queries only get noisier.
//!
//! Relaxation levels:
//!
//! | level | fields        | mode  |
//! |-------|---------------|-------|
//! | 0     | all           | exact |
//! | 1     | album omitted | exact |
//! | 2     | all           | loose |
//! | 3     | album omitted | loose |

use crate::catalog::SpotifyCatalog;
use crate::query::{Field, QueryBuilder};
use crate::retry::{with_retry, RetryConfig};
use crate::scoring::{pick_best, rate_candidates, ACCEPT_THRESHOLD};
use crate::types::{MatchResult, TrackRecord};
use crate::Result;

/// Reason recorded when every relaxation level comes back empty.
pub const NO_CANDIDATES: &str = "No candidates found";

/// Resolves scraped tracks against an injected catalog.
///
/// Pure decision logic: the only side effect is the search call itself,
/// routed through the retry gateway.
pub struct Matcher<'a, C: SpotifyCatalog + ?Sized> {
    catalog: &'a C,
    query_builder: &'a QueryBuilder,
    retry: &'a RetryConfig,
}

impl<'a, C: SpotifyCatalog + ?Sized> Matcher<'a, C> {
    pub fn new(catalog: &'a C, query_builder: &'a QueryBuilder, retry: &'a RetryConfig) -> Self {
        Self {
            catalog,
            query_builder,
            retry,
        }
    }

    /// Find the best catalog match for `track`.
    ///
    /// Per-track problems (no candidates anywhere, unusable duration)
    /// come back as [`MatchResult`] values; only remote failures the
    /// gateway could not absorb surface as errors.
    pub async fn resolve(&self, track: &TrackRecord) -> Result<MatchResult> {
        for level in 0u8..=3 {
            let excluded: &[Field] = if level == 1 || level == 3 {
                &[Field::Album]
            } else {
                &[]
            };
            let query = self.query_builder.build(track, excluded, level < 2);

            // An empty query must never reach the API; it counts as a
            // level with zero candidates.
            let candidates = if query.is_empty() {
                Vec::new()
            } else {
                with_retry(self.retry, "search", || self.catalog.search(&query)).await?
            };

            if candidates.is_empty() {
                if level < 3 {
                    log::debug!("\"{}\": relaxing to level {}", track.title, level + 1);
                }
                continue;
            }

            let ratings = match rate_candidates(track, &candidates) {
                Ok(ratings) => ratings,
                Err(reason) => return Ok(MatchResult::Unresolved { reason }),
            };
            if let Some((best_idx, rating)) = pick_best(&ratings) {
                let track_id = candidates[best_idx].id.clone();
                if rating < ACCEPT_THRESHOLD {
                    return Ok(MatchResult::Rejected { track_id, rating });
                }
                return Ok(MatchResult::Accepted { track_id });
            }
        }
        Ok(MatchResult::Unresolved {
            reason: NO_CANDIDATES.to_string(),
        })
    }
}
