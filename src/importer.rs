//! Playlist import orchestration.
//!
//! Drives the whole run: collision pre-flight over the user's existing
//! playlists, playlist creation, streaming every scraped track through
//! the matcher, batching accepted ids into bulk add calls, and recording
//! everything that did not make it into the failure report. All remote
//! calls go through the retry gateway; per-track failures never abort
//! the run, per-playlist setup failures do.

use crate::catalog::SpotifyCatalog;
use crate::matcher::Matcher;
use crate::query::QueryBuilder;
use crate::report::{FailureReport, Library};
use crate::retry::{with_retry, RetryConfig};
use crate::types::{FailureRecord, ImportSummary, MatchResult};
use crate::{ImportError, Result};
use std::collections::HashSet;

/// Bulk-add calls carry at most this many tracks.
pub const BATCH_SIZE: usize = 10;

/// Run-level options, mirroring the CLI surface.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Delete and recreate colliding playlists instead of aborting.
    pub replace_existing_playlists: bool,
    /// Description attached to every created playlist.
    pub description: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            replace_existing_playlists: false,
            description: "Imported from JSON".to_string(),
        }
    }
}

/// Imports an exported library into the destination service.
///
/// Owns the run's mutable state — the failure report and the per-playlist
/// batch buffer — explicitly; the catalog is injected and borrowed.
pub struct Importer<'a, C: SpotifyCatalog + ?Sized> {
    catalog: &'a C,
    query_builder: QueryBuilder,
    retry: RetryConfig,
    options: ImportOptions,
    failures: FailureReport,
}

impl<'a, C: SpotifyCatalog + ?Sized> Importer<'a, C> {
    pub fn new(
        catalog: &'a C,
        query_builder: QueryBuilder,
        retry: RetryConfig,
        options: ImportOptions,
    ) -> Self {
        Self {
            catalog,
            query_builder,
            retry,
            options,
            failures: FailureReport::default(),
        }
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &FailureReport {
        &self.failures
    }

    /// Consume the importer, yielding the failure report for review and
    /// persistence.
    pub fn into_failures(self) -> FailureReport {
        self.failures
    }

    /// Import every playlist of `library`, in document order.
    ///
    /// Collisions with existing playlist names are resolved up front,
    /// before anything is created: deleted when replacement was
    /// requested, otherwise the run aborts with
    /// [`ImportError::PlaylistExists`].
    pub async fn import(&mut self, library: &Library) -> Result<ImportSummary> {
        let catalog = self.catalog;
        let retry = &self.retry;

        let user = with_retry(retry, "current_user", || catalog.current_user()).await?;
        let existing =
            with_retry(retry, "list_playlists", || catalog.list_playlists(&user.id)).await?;

        for (name, _) in library.iter() {
            let name_lower = name.to_lowercase();
            let collision = existing
                .iter()
                .find(|playlist| playlist.name.to_lowercase() == name_lower);
            if let Some(playlist) = collision {
                if !self.options.replace_existing_playlists {
                    return Err(ImportError::PlaylistExists(name.to_string()));
                }
                log::info!("Deleting existing playlist: {name}");
                with_retry(retry, "delete_playlist", || {
                    catalog.delete_playlist(&playlist.id)
                })
                .await?;
            }
        }

        log::info!("Importing {} playlists", library.len());
        let mut summary = ImportSummary::default();
        let matcher = Matcher::new(catalog, &self.query_builder, retry);

        for (name, tracks) in library.iter() {
            log::info!(" Importing playlist: {name}");
            let playlist = with_retry(retry, "create_playlist", || {
                catalog.create_playlist(&user.id, name, &self.options.description)
            })
            .await?;
            summary.playlists += 1;

            let mut batch: Vec<String> = Vec::new();
            let mut submitted: HashSet<String> = HashSet::new();

            for track in tracks {
                match matcher.resolve(track).await? {
                    MatchResult::Accepted { track_id } => {
                        log::info!("  ...{} [OK]", track.title);
                        summary.imported += 1;
                        // One submission per track id per playlist, across
                        // batch boundaries.
                        if submitted.insert(track_id.clone()) {
                            batch.push(track_id);
                        }
                        if batch.len() >= BATCH_SIZE {
                            submit_batch(catalog, retry, &playlist.id, &mut batch).await?;
                        }
                    }
                    MatchResult::Rejected { track_id, rating } => {
                        let reason = format!("Bad match, {rating}");
                        log::info!("  ...{} [{reason}]", track.title);
                        summary.failed += 1;
                        self.failures.record(
                            name,
                            FailureRecord {
                                song: track.clone(),
                                reason,
                                playlist_id: Some(playlist.id.clone()),
                                song_resolution_id: Some(track_id),
                            },
                        );
                    }
                    MatchResult::Unresolved { reason } => {
                        log::info!("  ...{} [{reason}]", track.title);
                        summary.failed += 1;
                        self.failures.record(
                            name,
                            FailureRecord {
                                song: track.clone(),
                                reason,
                                playlist_id: None,
                                song_resolution_id: None,
                            },
                        );
                    }
                }
            }

            submit_batch(catalog, retry, &playlist.id, &mut batch).await?;
        }

        log::info!("Imported {} songs", summary.imported);
        Ok(summary)
    }
}

/// Flush the buffered track ids, if any, into one bulk add call.
async fn submit_batch<C: SpotifyCatalog + ?Sized>(
    catalog: &C,
    retry: &RetryConfig,
    playlist_id: &str,
    batch: &mut Vec<String>,
) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }
    log::info!(" --- submitting {} tracks", batch.len());
    with_retry(retry, "add_tracks", || catalog.add_tracks(playlist_id, batch)).await?;
    batch.clear();
    Ok(())
}
