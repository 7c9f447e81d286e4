use thiserror::Error;

/// Error types for Spotify import operations.
///
/// Only genuinely unexpected conditions are represented here. Expected
/// per-track outcomes (a poor match, no candidates at any relaxation
/// level) are values of [`MatchResult`](crate::MatchResult) and never
/// travel as errors.
///
/// # Retry Classes
///
/// [`ImportError::RateLimited`] and [`ImportError::BadGateway`] are the
/// transient class: the gateway in [`retry`](crate::retry) re-issues the
/// call after a linear backoff. Everything else propagates immediately.
#[derive(Error, Debug)]
pub enum ImportError {
    /// HTTP/network related errors.
    ///
    /// Connection failures, timeouts, DNS errors and other transport
    /// issues below the Spotify API itself.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered 429 Too Many Requests.
    #[error("API rate limit exceeded")]
    RateLimited,

    /// The API answered 502 Bad Gateway.
    ///
    /// Spotify's edge intermittently returns this under load; it is
    /// treated exactly like a rate limit and retried.
    #[error("Bad gateway")]
    BadGateway,

    /// Any other non-success response from the API.
    ///
    /// These are permanent for the purposes of a single run: retrying
    /// the identical request would fail the same way.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Response body or extracted error message
        message: String,
    },

    /// Failed to parse an API response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A destination playlist with this name already exists.
    ///
    /// Fatal unless replacing existing playlists was requested, in
    /// which case the pre-existing playlist is deleted instead.
    #[error("Playlist \"{0}\" already exists")]
    PlaylistExists(String),

    /// Playback was requested but no Spotify device is active.
    ///
    /// Raised during the interactive review loop when previewing a
    /// candidate; the loop offers retry-or-skip rather than aborting.
    #[error("No active device found")]
    NoActiveDevice,

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// Whether the gateway should retry the call that produced this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, ImportError::RateLimited | ImportError::BadGateway)
    }
}
