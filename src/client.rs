//! Concrete Spotify Web API implementation of [`SpotifyCatalog`].
//!
//! Thin request plumbing: bearer-token auth, JSON bodies, `next`-link
//! pagination collected into vectors, and HTTP status mapping into the
//! error taxonomy (429 → rate limited, 502 → bad gateway, playback
//! without a device → [`ImportError::NoActiveDevice`]). Retry policy is
//! deliberately absent here — the gateway owns it.

use crate::catalog::SpotifyCatalog;
use crate::types::{CandidateTrack, Playlist, SpotifyUser};
use crate::{ImportError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// Page size for search and playlist listings.
const PAGE_LIMIT: u32 = 50;

/// Spotify Web API client.
///
/// # Examples
///
/// ```rust,no_run
/// use spotify_import::SpotifyCatalogClient;
///
/// let http_client = http_client::native::NativeClient::new();
/// let catalog = SpotifyCatalogClient::new(Box::new(http_client), "token".to_string());
/// ```
pub struct SpotifyCatalogClient {
    client: Box<dyn HttpClient>,
    token: String,
    base_url: String,
}

impl SpotifyCatalogClient {
    /// Create a client against the production API.
    ///
    /// `token` is a user-scoped OAuth bearer token; obtaining it is the
    /// caller's concern.
    pub fn new(client: Box<dyn HttpClient>, token: String) -> Self {
        Self::with_base_url(client, token, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL, for tests.
    pub fn with_base_url(client: Box<dyn HttpClient>, token: String, base_url: String) -> Self {
        Self {
            client,
            token,
            base_url,
        }
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String> {
        let parsed = url
            .parse::<Url>()
            .map_err(|e| ImportError::Http(format!("invalid URL {url}: {e}")))?;
        let mut request = Request::new(method, parsed);
        let authorization = format!("Bearer {}", self.token);
        request.insert_header("Authorization", authorization.as_str());
        request.insert_header("Accept", "application/json");
        if let Some(body) = body {
            request.insert_header("Content-Type", "application/json");
            request.set_body(body.to_string());
        }

        log::debug!("{method} {url}");
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| ImportError::Http(e.to_string()))?;
        let status: u16 = response.status().into();
        let body_text = response
            .body_string()
            .await
            .map_err(|e| ImportError::Http(e.to_string()))?;

        match status {
            200..=299 => Ok(body_text),
            429 => Err(ImportError::RateLimited),
            502 => Err(ImportError::BadGateway),
            _ => Err(api_error(status, body_text)),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.request(Method::Get, url, None).await?;
        serde_json::from_str(&body).map_err(|e| ImportError::Parse(e.to_string()))
    }
}

/// Extract the API error message and classify the failure.
fn api_error(status: u16, body: String) -> ImportError {
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);
    if message.contains("No active device") {
        return ImportError::NoActiveDevice;
    }
    ImportError::Api { status, message }
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Page<CandidateTrack>,
}

#[derive(Deserialize)]
struct Page<T> {
    items: Vec<T>,
    next: Option<String>,
}

#[async_trait(?Send)]
impl SpotifyCatalog for SpotifyCatalogClient {
    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>> {
        let mut url = format!(
            "{}/search?q={}&type=track&limit={PAGE_LIMIT}",
            self.base_url,
            urlencoding::encode(query)
        );
        let mut candidates = Vec::new();
        loop {
            let response: SearchResponse = self.get_json(&url).await?;
            candidates.extend(response.tracks.items);
            match response.tracks.next {
                Some(next) => url = next,
                None => return Ok(candidates),
            }
        }
    }

    async fn current_user(&self) -> Result<SpotifyUser> {
        self.get_json(&format!("{}/me", self.base_url)).await
    }

    async fn list_playlists(&self, user_id: &str) -> Result<Vec<Playlist>> {
        let mut url = format!(
            "{}/users/{}/playlists?limit={PAGE_LIMIT}",
            self.base_url,
            urlencoding::encode(user_id)
        );
        let mut playlists = Vec::new();
        loop {
            let page: Page<Playlist> = self.get_json(&url).await?;
            playlists.extend(page.items);
            match page.next {
                Some(next) => url = next,
                None => return Ok(playlists),
            }
        }
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Playlist> {
        let url = format!(
            "{}/users/{}/playlists",
            self.base_url,
            urlencoding::encode(user_id)
        );
        let body = json!({
            "name": name,
            "public": false,
            "description": description,
        });
        let response = self.request(Method::Post, &url, Some(body)).await?;
        serde_json::from_str(&response).map_err(|e| ImportError::Parse(e.to_string()))
    }

    async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        // Spotify has no hard delete; removing the playlist from the
        // user's library means unfollowing it.
        let url = format!(
            "{}/playlists/{}/followers",
            self.base_url,
            urlencoding::encode(playlist_id)
        );
        self.request(Method::Delete, &url, None).await?;
        Ok(())
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let url = format!(
            "{}/playlists/{}/tracks",
            self.base_url,
            urlencoding::encode(playlist_id)
        );
        let uris: Vec<String> = track_ids
            .iter()
            .map(|id| format!("spotify:track:{id}"))
            .collect();
        self.request(Method::Post, &url, Some(json!({ "uris": uris })))
            .await?;
        Ok(())
    }

    async fn start_playback(&self, track_ids: &[String]) -> Result<()> {
        let url = format!("{}/me/player/play", self.base_url);
        let uris: Vec<String> = track_ids
            .iter()
            .map(|id| format!("spotify:track:{id}"))
            .collect();
        self.request(Method::Put, &url, Some(json!({ "uris": uris })))
            .await?;
        Ok(())
    }

    async fn resume_playback(&self) -> Result<()> {
        let url = format!("{}/me/player/play", self.base_url);
        self.request(Method::Put, &url, None).await?;
        Ok(())
    }
}
