//! Interactive review of bad matches.
//!
//! After the import, every rejected candidate can be auditioned: the
//! loop plays the candidate on the user's active Spotify device, asks
//! whether to accept it, and on acceptance adds it to the original
//! target playlist and drops its record from the failure report. The
//! user may abort at any point; remaining entries stay in the report.

use crate::catalog::SpotifyCatalog;
use crate::query::QueryBuilder;
use crate::report::FailureReport;
use crate::retry::{with_retry, RetryConfig};
use crate::{ImportError, Result};
use std::io::{self, BufRead, Write};

/// Yes/no prompting seam, so tests can script a review session.
pub trait ConfirmPrompt {
    /// Ask the user a yes/no question; `default` applies to empty input.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

/// Prompts on stdout, reads answers from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let mut stdout = io::stdout();
        write!(stdout, "{message} {hint} ")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(match line.trim().to_lowercase().as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        })
    }
}

/// What happened during review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    /// Bad matches presented to the user
    pub reviewed: usize,
    /// Candidates accepted and added to their playlists
    pub accepted: usize,
    /// Whether the user aborted before the end
    pub aborted: bool,
}

/// Run the interactive review loop over all bad matches in `failures`.
///
/// Accepted entries are removed from the report; declined and
/// unreviewed ones are left in place.
pub async fn review_bad_matches<C, P>(
    catalog: &C,
    retry: &RetryConfig,
    query_builder: &QueryBuilder,
    failures: &mut FailureReport,
    prompt: &mut P,
) -> Result<ReviewSummary>
where
    C: SpotifyCatalog + ?Sized,
    P: ConfirmPrompt,
{
    let mut summary = ReviewSummary::default();
    let bad_matches = failures.bad_matches();
    if bad_matches.is_empty() {
        return Ok(summary);
    }

    let question = format!(
        "\n{} bad matches. Do you want to review them now?",
        bad_matches.len()
    );
    if !prompt.confirm(&question, true)? {
        return Ok(summary);
    }

    'review: for (playlist_name, record) in bad_matches {
        let (playlist_id, candidate_id) = match (&record.playlist_id, &record.song_resolution_id) {
            (Some(playlist_id), Some(candidate_id)) => {
                (playlist_id.clone(), candidate_id.clone())
            }
            _ => {
                log::warn!(
                    "Skipping bad match without resolution context: {}",
                    record.song.title
                );
                continue;
            }
        };

        // Audition the candidate; a missing playback device is worth a
        // retry prompt, anything else is a real failure.
        loop {
            match preview(catalog, retry, &candidate_id).await {
                Ok(()) => break,
                Err(ImportError::NoActiveDevice) => {
                    if prompt.confirm(" No active device found. Do you want to retry?", true)? {
                        continue;
                    }
                    summary.aborted = true;
                    break 'review;
                }
                Err(err) => return Err(err),
            }
        }

        summary.reviewed += 1;
        let label = query_builder.build(&record.song, &[], true);
        if prompt.confirm(&format!(" Accept this for {playlist_name}? {label}"), true)? {
            with_retry(retry, "add_tracks", || {
                catalog.add_tracks(&playlist_id, std::slice::from_ref(&candidate_id))
            })
            .await?;
            failures.remove(&playlist_name, &record);
            summary.accepted += 1;
        }
    }

    Ok(summary)
}

async fn preview<C: SpotifyCatalog + ?Sized>(
    catalog: &C,
    retry: &RetryConfig,
    candidate_id: &str,
) -> Result<()> {
    let track_ids = [candidate_id.to_string()];
    with_retry(retry, "start_playback", || {
        catalog.start_playback(&track_ids)
    })
    .await?;
    with_retry(retry, "resume_playback", || catalog.resume_playback()).await?;
    Ok(())
}
