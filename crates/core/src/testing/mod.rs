//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`crate::api::MediaApi`] implementation and
//! data fixtures, allowing store and front-end tests to run without real
//! network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marquee_core::{testing::MockMediaApi, CatalogStore};
//!
//! let api = Arc::new(MockMediaApi::new());
//! let store = CatalogStore::new(api.clone());
//! store.initialize().await;
//! ```

mod mock_media_api;

pub use mock_media_api::{MockMediaApi, RecordedRequest};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::api::{Genre, Page, Title, Video};

    /// Create a test movie title with reasonable defaults.
    pub fn title(name: &str, year: u32) -> Title {
        Title {
            id: u64::from((year * 100 + name.len() as u32) % 100_000),
            title: name.to_string(),
            release_date: Some(format!("{}-06-15", year)),
            overview: Some(format!("A movie about {}.", name.to_lowercase())),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            vote_average: Some(7.5),
            runtime_minutes: None,
            genres: vec![],
        }
    }

    /// Create a test TV title (first-air date instead of release date).
    pub fn tv_title(name: &str, year: u32) -> Title {
        Title {
            release_date: Some(format!("{}-01-01", year)),
            runtime_minutes: None,
            ..title(name, year)
        }
    }

    /// Create `count` distinct titles named "`prefix` 1".."`prefix` count",
    /// with ids 1..=count.
    pub fn titles(prefix: &str, count: u64) -> Vec<Title> {
        (1..=count)
            .map(|i| {
                let mut t = title(&format!("{} {}", prefix, i), 2020);
                t.id = i;
                t
            })
            .collect()
    }

    /// Create a test title with genres attached.
    pub fn title_with_genres(name: &str, year: u32, genre_names: &[&str]) -> Title {
        let mut t = title(name, year);
        t.genres = genre_names
            .iter()
            .enumerate()
            .map(|(i, g)| Genre {
                id: i as u64 + 1,
                name: g.to_string(),
            })
            .collect();
        t
    }

    /// Create a test video of the given kind.
    pub fn video(kind: &str, key: &str) -> Video {
        Video {
            id: format!("video-{}", key),
            key: key.to_string(),
            kind: kind.to_string(),
            name: Some(format!("{} ({})", kind, key)),
            site: Some("YouTube".to_string()),
        }
    }

    /// Create a test trailer video.
    pub fn trailer(key: &str) -> Video {
        video("Trailer", key)
    }

    /// Create a search result page.
    pub fn search_page(page: u32, total_pages: u32, results: Vec<Title>) -> Page<Title> {
        let total_results = results.len() as u32 * total_pages;
        Page {
            page,
            results,
            total_pages,
            total_results,
        }
    }
}
