//! Media catalog API integration.
//!
//! This module provides the [`MediaApi`] seam the rest of the crate talks
//! through, plus the TMDB-backed implementation used in production.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the media API.
#[derive(Debug, Error)]
pub enum MediaApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing bearer token, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for media catalog backends.
///
/// Implemented by [`TmdbClient`] and by the mock in [`crate::testing`];
/// the catalog store only ever talks to this seam.
#[async_trait]
pub trait MediaApi: Send + Sync {
    /// Fetch the titles of one catalog slice.
    async fn slice_titles(&self, slice: Slice) -> Result<Vec<Title>, MediaApiError>;

    /// Fetch the videos attached to a movie.
    async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>, MediaApiError>;

    /// Search movies by free-text query.
    async fn search_movies(&self, query: &str, page: u32)
        -> Result<Page<Title>, MediaApiError>;
}
