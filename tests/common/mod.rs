#![allow(dead_code)]

use async_trait::async_trait;
use spotify_import::{
    CandidateTrack, ImportError, Playlist, Result, SpotifyCatalog, SpotifyUser, TrackRecord,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// Scripted in-memory catalog for integration tests.
///
/// Search results are keyed by exact query string; everything else is
/// recorded for assertions. Playback can be told to fail with
/// `NoActiveDevice` a fixed number of times.
#[derive(Default)]
pub struct FakeCatalog {
    pub user_id: String,
    pub existing_playlists: Vec<Playlist>,
    pub search_results: HashMap<String, Vec<CandidateTrack>>,
    pub search_log: RefCell<Vec<String>>,
    pub created: RefCell<Vec<Playlist>>,
    pub deleted: RefCell<Vec<String>>,
    pub added: RefCell<Vec<(String, Vec<String>)>>,
    pub playback_log: RefCell<Vec<String>>,
    pub playback_failures: RefCell<u32>,
    next_playlist_id: RefCell<u32>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            user_id: "user1".to_string(),
            ..Self::default()
        }
    }

    pub fn with_search_result(mut self, query: &str, candidates: Vec<CandidateTrack>) -> Self {
        self.search_results.insert(query.to_string(), candidates);
        self
    }

    pub fn with_existing_playlist(mut self, id: &str, name: &str) -> Self {
        self.existing_playlists.push(Playlist {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn failing_playback_attempts(self, count: u32) -> Self {
        *self.playback_failures.borrow_mut() = count;
        self
    }

    /// Sizes of every add_tracks call, in order.
    pub fn added_batch_sizes(&self) -> Vec<usize> {
        self.added.borrow().iter().map(|(_, ids)| ids.len()).collect()
    }

    /// All track ids submitted to the given playlist, in order.
    pub fn submitted_ids(&self, playlist_id: &str) -> Vec<String> {
        self.added
            .borrow()
            .iter()
            .filter(|(id, _)| id == playlist_id)
            .flat_map(|(_, ids)| ids.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl SpotifyCatalog for FakeCatalog {
    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>> {
        self.search_log.borrow_mut().push(query.to_string());
        Ok(self.search_results.get(query).cloned().unwrap_or_default())
    }

    async fn current_user(&self) -> Result<SpotifyUser> {
        Ok(SpotifyUser {
            id: self.user_id.clone(),
        })
    }

    async fn list_playlists(&self, _user_id: &str) -> Result<Vec<Playlist>> {
        Ok(self.existing_playlists.clone())
    }

    async fn create_playlist(
        &self,
        _user_id: &str,
        name: &str,
        _description: &str,
    ) -> Result<Playlist> {
        let mut next = self.next_playlist_id.borrow_mut();
        *next += 1;
        let playlist = Playlist {
            id: format!("pl{}", *next),
            name: name.to_string(),
        };
        self.created.borrow_mut().push(playlist.clone());
        Ok(playlist)
    }

    async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        self.deleted.borrow_mut().push(playlist_id.to_string());
        Ok(())
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.added
            .borrow_mut()
            .push((playlist_id.to_string(), track_ids.to_vec()));
        Ok(())
    }

    async fn start_playback(&self, track_ids: &[String]) -> Result<()> {
        let mut failures = self.playback_failures.borrow_mut();
        if *failures > 0 {
            *failures -= 1;
            return Err(ImportError::NoActiveDevice);
        }
        self.playback_log.borrow_mut().extend(track_ids.to_vec());
        Ok(())
    }

    async fn resume_playback(&self) -> Result<()> {
        Ok(())
    }
}

pub fn track(title: &str, artist: &str, album: &str, duration: &str) -> TrackRecord {
    TrackRecord {
        title: title.to_string(),
        duration: duration.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
    }
}

pub fn candidate(id: &str, duration_ms: u64) -> CandidateTrack {
    CandidateTrack {
        id: id.to_string(),
        duration_ms,
    }
}
