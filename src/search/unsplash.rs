//! Unsplash image search using the `/photos/random` API.

use async_trait::async_trait;
use serde::Deserialize;

use super::{check_status, ImageSearch, RemoteImage, SearchError};

const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";
const UNSPLASH_API_VERSION: &str = "v1";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// `/photos/random` response body (only the fields we read).
#[derive(Debug, Deserialize)]
struct RandomPhotoResponse {
    urls: PhotoUrls,
    id: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    full: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Unsplash image search client.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    base_url: String,
    access_key: String,
    client: reqwest::Client,
}

impl UnsplashClient {
    /// Create a client against the production Unsplash API.
    pub fn new(access_key: String) -> Self {
        Self::with_base_url(UNSPLASH_API_BASE.to_owned(), access_key)
    }

    /// Create a client against a custom base URL (used by tests).
    pub fn with_base_url(base_url: String, access_key: String) -> Self {
        Self {
            base_url,
            access_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn random_image(&self, query: &str) -> Result<RemoteImage, SearchError> {
        let response = self
            .client
            .get(format!("{}/photos/random", self.base_url))
            .query(&[("query", query)])
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", UNSPLASH_API_VERSION)
            .send()
            .await?;

        let body = check_status(response)?.text().await?;
        let photo: RandomPhotoResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        Ok(RemoteImage {
            url: photo.urls.full,
            id: photo.id,
        })
    }
}
