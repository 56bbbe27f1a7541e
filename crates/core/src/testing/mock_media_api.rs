//! Mock media API for testing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::api::{MediaApi, MediaApiError, Page, Slice, Title, Video};

/// A recorded API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    SliceTitles { slice: Slice },
    MovieVideos { movie_id: u64 },
    SearchMovies { query: String, page: u32 },
}

/// Mock implementation of the [`MediaApi`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable titles per slice, videos per movie, search pages
/// - Track requests for assertions
/// - Simulate failures (one-shot, or persistent per slice)
/// - Delay individual responses to exercise cancellation and ordering
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::testing::{fixtures, MockMediaApi};
/// use marquee_core::Slice;
///
/// let api = MockMediaApi::new();
/// api.set_slice(Slice::Trending, fixtures::titles("Movie", 5)).await;
///
/// let titles = api.slice_titles(Slice::Trending).await?;
/// assert_eq!(titles.len(), 5);
/// ```
#[derive(Debug, Default)]
pub struct MockMediaApi {
    /// Titles by slice.
    slices: RwLock<HashMap<Slice, Vec<Title>>>,
    /// Videos by movie id.
    videos: RwLock<HashMap<u64, Vec<Video>>>,
    /// Search pages by (query, page).
    search_pages: RwLock<HashMap<(String, u32), Page<Title>>>,
    /// Recorded requests.
    requests: RwLock<Vec<RecordedRequest>>,
    /// If set, the next operation fails with this error.
    next_error: RwLock<Option<MediaApiError>>,
    /// Slices that fail on every fetch, as (status, message).
    slice_errors: RwLock<HashMap<Slice, (u16, String)>>,
    /// Response delay per slice.
    slice_delays: RwLock<HashMap<Slice, Duration>>,
    /// Response delay per movie id for video fetches.
    video_delays: RwLock<HashMap<u64, Duration>>,
}

impl MockMediaApi {
    /// Create a new empty mock API.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Response Configuration
    // =========================================================================

    /// Set the titles returned for a slice.
    pub async fn set_slice(&self, slice: Slice, titles: Vec<Title>) {
        self.slices.write().await.insert(slice, titles);
    }

    /// Set the same titles for every slice.
    pub async fn set_all_slices(&self, titles: Vec<Title>) {
        let mut map = self.slices.write().await;
        for slice in Slice::ALL {
            map.insert(slice, titles.clone());
        }
    }

    /// Set the videos returned for a movie id.
    pub async fn set_videos(&self, movie_id: u64, videos: Vec<Video>) {
        self.videos.write().await.insert(movie_id, videos);
    }

    /// Set the page returned for a (query, page) search.
    pub async fn set_search_page(&self, query: &str, page: u32, result: Page<Title>) {
        self.search_pages
            .write()
            .await
            .insert((query.to_string(), page), result);
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: MediaApiError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every fetch of a slice fail with the given HTTP status.
    pub async fn fail_slice(&self, slice: Slice, status: u16, message: &str) {
        self.slice_errors
            .write()
            .await
            .insert(slice, (status, message.to_string()));
    }

    /// Let a previously failing slice succeed again.
    pub async fn restore_slice(&self, slice: Slice) {
        self.slice_errors.write().await.remove(&slice);
    }

    // =========================================================================
    // Delays
    // =========================================================================

    /// Delay responses for a slice.
    pub async fn set_slice_delay(&self, slice: Slice, delay: Duration) {
        self.slice_delays.write().await.insert(slice, delay);
    }

    /// Delay video responses for a movie id.
    pub async fn set_video_delay(&self, movie_id: u64, delay: Duration) {
        self.video_delays.write().await.insert(movie_id, delay);
    }

    // =========================================================================
    // Request Recording
    // =========================================================================

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }

    async fn record(&self, request: RecordedRequest) {
        self.requests.write().await.push(request);
    }

    /// Take the one-shot error if set.
    async fn take_error(&self) -> Option<MediaApiError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl MediaApi for MockMediaApi {
    async fn slice_titles(&self, slice: Slice) -> Result<Vec<Title>, MediaApiError> {
        self.record(RecordedRequest::SliceTitles { slice }).await;

        let delay = self.slice_delays.read().await.get(&slice).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        if let Some((status, message)) = self.slice_errors.read().await.get(&slice).cloned() {
            return Err(MediaApiError::ApiError { status, message });
        }

        Ok(self
            .slices
            .read()
            .await
            .get(&slice)
            .cloned()
            .unwrap_or_default())
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>, MediaApiError> {
        self.record(RecordedRequest::MovieVideos { movie_id }).await;

        let delay = self.video_delays.read().await.get(&movie_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .videos
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Page<Title>, MediaApiError> {
        self.record(RecordedRequest::SearchMovies {
            query: query.to_string(),
            page,
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .search_pages
            .read()
            .await
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or(Page {
                page,
                results: vec![],
                total_pages: 0,
                total_results: 0,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_slice_titles() {
        let api = MockMediaApi::new();
        api.set_slice(Slice::TopRated, fixtures::titles("Movie", 3))
            .await;

        let titles = api.slice_titles(Slice::TopRated).await.unwrap();
        assert_eq!(titles.len(), 3);

        // Unconfigured slices return an empty list.
        let titles = api.slice_titles(Slice::Upcoming).await.unwrap();
        assert!(titles.is_empty());
    }

    #[tokio::test]
    async fn test_movie_videos() {
        let api = MockMediaApi::new();
        api.set_videos(550, vec![fixtures::trailer("abc123")]).await;

        let videos = api.movie_videos(550).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].key, "abc123");
    }

    #[tokio::test]
    async fn test_search_movies() {
        let api = MockMediaApi::new();
        api.set_search_page(
            "matrix",
            1,
            fixtures::search_page(1, 2, fixtures::titles("The Matrix", 2)),
        )
        .await;

        let page = api.search_movies("matrix", 1).await.unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_pages, 2);

        let empty = api.search_movies("matrix", 9).await.unwrap();
        assert!(empty.results.is_empty());
    }

    #[tokio::test]
    async fn test_recorded_requests() {
        let api = MockMediaApi::new();

        api.slice_titles(Slice::Trending).await.ok();
        api.movie_videos(42).await.ok();
        api.search_movies("dune", 3).await.ok();

        let requests = api.recorded_requests().await;
        assert_eq!(
            requests,
            vec![
                RecordedRequest::SliceTitles {
                    slice: Slice::Trending
                },
                RecordedRequest::MovieVideos { movie_id: 42 },
                RecordedRequest::SearchMovies {
                    query: "dune".to_string(),
                    page: 3
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_next_error_is_single_shot() {
        let api = MockMediaApi::new();
        api.set_next_error(MediaApiError::RateLimitExceeded).await;

        assert!(api.slice_titles(Slice::Latest).await.is_err());
        assert!(api.slice_titles(Slice::Latest).await.is_ok());
    }

    #[tokio::test]
    async fn test_fail_slice_is_persistent() {
        let api = MockMediaApi::new();
        api.fail_slice(Slice::TvOnAir, 500, "server error").await;

        for _ in 0..2 {
            let err = api.slice_titles(Slice::TvOnAir).await.unwrap_err();
            assert!(matches!(err, MediaApiError::ApiError { status: 500, .. }));
        }

        // Other slices are unaffected.
        assert!(api.slice_titles(Slice::Trending).await.is_ok());

        api.restore_slice(Slice::TvOnAir).await;
        assert!(api.slice_titles(Slice::TvOnAir).await.is_ok());
    }
}
