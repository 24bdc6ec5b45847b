//! Freesound audio search: a text search with the static API token, then an
//! OAuth-authenticated binary download of one randomly chosen result.
//!
//! The two steps use different credentials on purpose — Freesound only
//! serves sound downloads to an OAuth grant, while search accepts the
//! plain API token.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::error;

use super::{check_status, AudioSearch, SearchError, SoundClip};

const FREESOUND_API_BASE: &str = "https://freesound.org/apiv2";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One candidate from the text search response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SoundHit {
    /// Sound identifier, used to build the download endpoint path.
    pub id: u64,
    /// Display name, reused as the outgoing filename.
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    results: Vec<SoundHit>,
}

/// Pick one candidate uniformly at random.
///
/// Non-deterministic by design: repeated identical queries may yield
/// different sounds. Factored out of the HTTP flow so the selection is
/// unit-testable; a single candidate is always returned as-is.
pub fn pick_candidate(hits: &[SoundHit]) -> Option<&SoundHit> {
    hits.choose(&mut rand::thread_rng())
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Freesound audio search client.
#[derive(Debug, Clone)]
pub struct FreesoundClient {
    base_url: String,
    api_token: String,
    oauth_token: String,
    client: reqwest::Client,
}

impl FreesoundClient {
    /// Create a client against the production Freesound API.
    pub fn new(api_token: String, oauth_token: String) -> Self {
        Self::with_base_url(FREESOUND_API_BASE.to_owned(), api_token, oauth_token)
    }

    /// Create a client against a custom base URL (used by tests).
    pub fn with_base_url(base_url: String, api_token: String, oauth_token: String) -> Self {
        Self {
            base_url,
            api_token,
            oauth_token,
            client: reqwest::Client::new(),
        }
    }

    /// Download the raw bytes of one sound over the OAuth credential.
    async fn download(&self, sound_id: u64) -> Result<Vec<u8>, SearchError> {
        let response = self
            .client
            .get(format!("{}/sounds/{sound_id}/download", self.base_url))
            .header("Authorization", format!("Bearer {}", self.oauth_token))
            .send()
            .await?;

        // 401 here means the OAuth grant expired, not a transient failure.
        // Re-authorization is an out-of-band administrator action.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            error!(sound_id, "freesound OAuth token rejected; re-authorize it and restart");
            return Err(SearchError::AuthExpired);
        }

        let bytes = check_status(response)?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AudioSearch for FreesoundClient {
    async fn random_sound(&self, query: &str) -> Result<SoundClip, SearchError> {
        let response = self
            .client
            .get(format!("{}/search/text/", self.base_url))
            .query(&[("query", query)])
            .header("Authorization", format!("Token {}", self.api_token))
            .send()
            .await?;

        let body = check_status(response)?.text().await?;
        let search: TextSearchResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let Some(hit) = pick_candidate(&search.results) else {
            return Err(SearchError::NoResults);
        };

        let bytes = self.download(hit.id).await?;
        Ok(SoundClip {
            bytes,
            name: hit.name.clone(),
        })
    }
}
