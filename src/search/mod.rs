//! Media search adapters.
//!
//! Defines the [`ImageSearch`] and [`AudioSearch`] traits and the shared
//! [`SearchError`] taxonomy used by both implementations:
//! - [`unsplash::UnsplashClient`] — Unsplash `/photos/random` API
//! - [`freesound::FreesoundClient`] — Freesound text search + OAuth download
//!
//! Adapters propagate errors unmodified; the conversation controller is the
//! sole boundary that catches them and renders a user-facing reply.

use async_trait::async_trait;

pub mod freesound;
pub mod unsplash;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A remote image located by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteImage {
    /// Full-resolution image URL.
    pub url: String,
    /// Service-side resource identifier, reused as the outgoing filename.
    pub id: String,
}

/// A downloaded sound clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundClip {
    /// Raw audio bytes.
    pub bytes: Vec<u8>,
    /// Display name of the sound, reused as the outgoing filename.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by the search adapters.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// HTTP transport failure.
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Upstream service responded with a non-success status.
    #[error("upstream returned non-success status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// Response did not match the expected JSON shape.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
    /// The search matched nothing. Distinct from transport failures so the
    /// controller can in principle react differently per kind.
    #[error("no results for the query")]
    NoResults,
    /// The OAuth bearer credential was rejected on download. Recovery needs
    /// an out-of-band re-authorization, not a retry.
    #[error("audio download rejected: OAuth token expired or invalid")]
    AuthExpired,
}

/// Map a non-success HTTP status to [`SearchError::Status`].
///
/// # Errors
///
/// Returns `SearchError::Status` on non-2xx; passes the response through
/// otherwise.
pub fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SearchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            status: status.as_u16(),
        });
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Image search interface.
///
/// Implementations must be `Send + Sync` so the controller can be shared
/// across teloxide handler invocations.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Fetch one random image matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on transport, status, or parse failure.
    async fn random_image(&self, query: &str) -> Result<RemoteImage, SearchError>;
}

/// Audio search interface.
#[async_trait]
pub trait AudioSearch: Send + Sync {
    /// Search for sounds matching `query` and download one chosen at random.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoResults`] when the search matches nothing,
    /// [`SearchError::AuthExpired`] when the download credential is
    /// rejected, and the generic variants otherwise.
    async fn random_sound(&self, query: &str) -> Result<SoundClip, SearchError>;
}
