//! TMDB (The Movie Database) API client.
//!
//! Requests authenticate with a static API read access token sent as a
//! bearer credential. Rate limits are generous (around 40 requests per
//! second).

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Genre, Page, Slice, Title, Video};
use super::MediaApiError;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default image CDN base URL for posters/backdrops.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// API read access token (required), sent as a bearer credential.
    pub bearer_token: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters/backdrops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Language tag sent with catalog requests (default: en-US).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    image_base_url: String,
    bearer_token: String,
    language: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, MediaApiError> {
        if config.bearer_token.is_empty() {
            return Err(MediaApiError::NotConfigured(
                "TMDB bearer token is required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(30));
        let client = Client::builder().timeout(timeout).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let image_base_url = config
            .image_base_url
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

        let language = config.language.unwrap_or_else(|| "en-US".to_string());

        Ok(Self {
            client,
            base_url,
            image_base_url,
            bearer_token: config.bearer_token,
            language,
        })
    }

    /// Image CDN base URL, for [`Title::poster_url`] / [`Title::backdrop_url`].
    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Fetch the titles of one catalog slice.
    pub async fn slice_titles(&self, slice: Slice) -> Result<Vec<Title>, MediaApiError> {
        let (path, query) = self.slice_route(slice);
        let url = format!("{}/{}", self.base_url, path);

        debug!("TMDB slice fetch: slice={}, url={}", slice.name(), url);

        let response = self.get(&url).query(&query).send().await?;
        let response = check_status(response).await?;

        let titles = if slice == Slice::TvOnAir {
            let list: TmdbListResponse<TmdbTvRow> = response.json().await.map_err(|e| {
                MediaApiError::ParseError(format!("Failed to parse TV list response: {}", e))
            })?;
            list.results.into_iter().map(Into::into).collect()
        } else {
            let list: TmdbListResponse<TmdbMovieRow> = response.json().await.map_err(|e| {
                MediaApiError::ParseError(format!("Failed to parse movie list response: {}", e))
            })?;
            list.results.into_iter().map(Into::into).collect()
        };

        Ok(titles)
    }

    /// Fetch the videos attached to a movie.
    pub async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>, MediaApiError> {
        let url = format!("{}/movie/{}/videos", self.base_url, movie_id);

        debug!("TMDB movie videos: id={}", movie_id);

        let response = self
            .get(&url)
            .query(&[("language", &self.language)])
            .send()
            .await?;
        let response = check_status(response).await?;

        let list: TmdbListResponse<TmdbVideoRow> = response.json().await.map_err(|e| {
            MediaApiError::ParseError(format!("Failed to parse videos response: {}", e))
        })?;

        Ok(list.results.into_iter().map(Into::into).collect())
    }

    /// Search movies by free-text query.
    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Page<Title>, MediaApiError> {
        let url = format!("{}/search/movie", self.base_url);

        debug!("TMDB movie search: query='{}', page={}", query, page);

        let response = self
            .get(&url)
            .query(&[("query", &query.to_string()), ("page", &page.to_string())])
            .send()
            .await?;
        let response = check_status(response).await?;

        let result: TmdbPageResponse<TmdbMovieRow> = response.json().await.map_err(|e| {
            MediaApiError::ParseError(format!("Failed to parse movie search response: {}", e))
        })?;

        Ok(Page {
            page: result.page,
            results: result.results.into_iter().map(Into::into).collect(),
            total_pages: result.total_pages,
            total_results: result.total_results,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .header(ACCEPT, "application/json")
    }

    /// Endpoint path and fixed query for a slice.
    ///
    /// Trending is served page 2 and without a language parameter; every
    /// other slice is the first localized page.
    fn slice_route(&self, slice: Slice) -> (&'static str, Vec<(&'static str, String)>) {
        let localized = vec![
            ("language", self.language.clone()),
            ("page", "1".to_string()),
        ];
        match slice {
            Slice::NowPlaying | Slice::Latest => ("movie/now_playing", localized),
            Slice::Trending => ("trending/movie/day", vec![("page", "2".to_string())]),
            Slice::TopRated => ("movie/top_rated", localized),
            Slice::Upcoming => ("movie/upcoming", localized),
            Slice::TvOnAir => ("tv/on_the_air", localized),
        }
    }
}

async fn check_status(response: Response) -> Result<Response, MediaApiError> {
    let status = response.status();
    if status == 401 {
        return Err(MediaApiError::NotConfigured(
            "Invalid TMDB bearer token".to_string(),
        ));
    }
    if status == 429 {
        return Err(MediaApiError::RateLimitExceeded);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MediaApiError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response)
}

#[async_trait::async_trait]
impl super::MediaApi for TmdbClient {
    async fn slice_titles(&self, slice: Slice) -> Result<Vec<Title>, MediaApiError> {
        TmdbClient::slice_titles(self, slice).await
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>, MediaApiError> {
        TmdbClient::movie_videos(self, movie_id).await
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Page<Title>, MediaApiError> {
        TmdbClient::search_movies(self, query, page).await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbListResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbPageResponse<T> {
    page: u32,
    results: Vec<T>,
    total_pages: u32,
    total_results: u32,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieRow {
    id: u64,
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvRow {
    id: u64,
    name: String,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TmdbVideoRow {
    id: String,
    key: String,
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
    site: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<TmdbMovieRow> for Title {
    fn from(r: TmdbMovieRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            release_date: r.release_date,
            overview: r.overview,
            poster_path: r.poster_path,
            backdrop_path: r.backdrop_path,
            vote_average: r.vote_average,
            runtime_minutes: r.runtime,
            genres: r.genres,
        }
    }
}

impl From<TmdbTvRow> for Title {
    fn from(r: TmdbTvRow) -> Self {
        Self {
            id: r.id,
            title: r.name,
            release_date: r.first_air_date,
            overview: r.overview,
            poster_path: r.poster_path,
            backdrop_path: r.backdrop_path,
            vote_average: r.vote_average,
            runtime_minutes: None,
            genres: vec![],
        }
    }
}

impl From<TmdbVideoRow> for Video {
    fn from(r: TmdbVideoRow) -> Self {
        Self {
            id: r.id,
            key: r.key,
            kind: r.kind,
            name: r.name,
            site: r.site,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> TmdbClient {
        TmdbClient::new(TmdbConfig {
            bearer_token: "test-token".to_string(),
            base_url: None,
            image_base_url: None,
            language: None,
            timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_bearer_token() {
        let result = TmdbClient::new(TmdbConfig {
            bearer_token: String::new(),
            base_url: None,
            image_base_url: None,
            language: None,
            timeout_secs: None,
        });
        assert!(matches!(result, Err(MediaApiError::NotConfigured(_))));
    }

    #[test]
    fn test_slice_routes() {
        let client = test_client();

        let (path, query) = client.slice_route(Slice::NowPlaying);
        assert_eq!(path, "movie/now_playing");
        assert_eq!(
            query,
            vec![
                ("language", "en-US".to_string()),
                ("page", "1".to_string())
            ]
        );

        // Latest reuses the now-playing endpoint.
        let (path, _) = client.slice_route(Slice::Latest);
        assert_eq!(path, "movie/now_playing");

        let (path, query) = client.slice_route(Slice::Trending);
        assert_eq!(path, "trending/movie/day");
        assert_eq!(query, vec![("page", "2".to_string())]);

        let (path, _) = client.slice_route(Slice::TopRated);
        assert_eq!(path, "movie/top_rated");

        let (path, _) = client.slice_route(Slice::Upcoming);
        assert_eq!(path, "movie/upcoming");

        let (path, query) = client.slice_route(Slice::TvOnAir);
        assert_eq!(path, "tv/on_the_air");
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_movie_row_conversion() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "overview": "A ticking-time-bomb insomniac...",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": null,
            "vote_average": 8.4
        }"#;
        let row: TmdbMovieRow = serde_json::from_str(json).unwrap();
        let title: Title = row.into();

        assert_eq!(title.id, 550);
        assert_eq!(title.title, "Fight Club");
        assert_eq!(title.year(), Some(1999));
        assert!(title.runtime_minutes.is_none());
        assert!(title.genres.is_empty());
    }

    #[test]
    fn test_movie_row_with_details() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "runtime": 139,
            "genres": [{"id": 18, "name": "Drama"}]
        }"#;
        let row: TmdbMovieRow = serde_json::from_str(json).unwrap();
        let title: Title = row.into();

        assert_eq!(title.runtime_minutes, Some(139));
        assert_eq!(title.genres.len(), 1);
        assert_eq!(title.genres[0].name, "Drama");
    }

    #[test]
    fn test_tv_row_conversion() {
        let json = r#"{
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "poster_path": "/poster.jpg",
            "vote_average": 9.5
        }"#;
        let row: TmdbTvRow = serde_json::from_str(json).unwrap();
        let title: Title = row.into();

        assert_eq!(title.id, 1396);
        assert_eq!(title.title, "Breaking Bad");
        assert_eq!(title.release_date.as_deref(), Some("2008-01-20"));
        assert_eq!(title.year(), Some(2008));
    }

    #[test]
    fn test_search_page_parse() {
        let json = r#"{
            "page": 2,
            "results": [{"id": 603, "title": "The Matrix"}],
            "total_pages": 7,
            "total_results": 123
        }"#;
        let page: TmdbPageResponse<TmdbMovieRow> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 7);
        assert_eq!(page.results[0].id, 603);
    }
}
