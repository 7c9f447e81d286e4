//! The destination catalog seam.
//!
//! Everything the importer needs from Spotify is behind this trait so
//! the matcher and importer stay pure decision logic over an injected
//! capability, and so tests can substitute a scripted catalog.

use crate::types::{CandidateTrack, Playlist, SpotifyUser};
use crate::Result;
use async_trait::async_trait;

/// Remote operations against the destination music service.
///
/// Implementations return raw results and raw errors; retry policy lives
/// in the [`retry`](crate::retry) gateway, not here. Paginated endpoints
/// collect all pages before returning.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, `MockSpotifyCatalog` implements
/// this trait via the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait SpotifyCatalog {
    /// Search the track catalog, all result pages collected in the
    /// catalog's own relevance order.
    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>>;

    /// The authenticated user.
    async fn current_user(&self) -> Result<SpotifyUser>;

    /// All playlists owned by or followed by the user.
    async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>>;

    /// Create a private playlist and return it.
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Playlist>;

    /// Remove a playlist from the user's library.
    async fn delete_playlist(&self, playlist_id: &str) -> Result<()>;

    /// Append tracks to a playlist, preserving order.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;

    /// Start playing the given tracks on the user's active device.
    async fn start_playback(&self, track_ids: &[String]) -> Result<()>;

    /// Resume playback on the active device.
    async fn resume_playback(&self) -> Result<()>;
}
