//! Public types for the media catalog API.

use serde::{Deserialize, Serialize};

/// A named, independently fetched list of titles.
///
/// `NowPlaying` and `Latest` deliberately map to the same endpoint; the
/// front end shows them in different places and refreshes them separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slice {
    NowPlaying,
    Latest,
    Trending,
    TopRated,
    Upcoming,
    TvOnAir,
}

impl Slice {
    /// All slices, in the order the store fetches them.
    pub const ALL: [Slice; 6] = [
        Slice::NowPlaying,
        Slice::Latest,
        Slice::Trending,
        Slice::TopRated,
        Slice::Upcoming,
        Slice::TvOnAir,
    ];

    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Slice::NowPlaying => "now_playing",
            Slice::Latest => "latest",
            Slice::Trending => "trending",
            Slice::TopRated => "top_rated",
            Slice::Upcoming => "upcoming",
            Slice::TvOnAir => "tv_on_air",
        }
    }
}

/// Image size variants served by the TMDB image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W200,
    W500,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W200 => "w200",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// A movie or TV show record from the external catalog.
///
/// TV rows carry `name`/`first_air_date` on the wire; the client maps them
/// onto `title`/`release_date` so consumers render both kinds uniformly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    /// TMDB id.
    pub id: u64,
    /// Movie title or TV show name.
    pub title: String,
    /// Release date for movies, first air date for TV (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Overview/synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Poster path (relative to the image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Backdrop path (relative to the image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    /// Average vote (0-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f32>,
    /// Runtime in minutes (detail responses only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    /// Genres (empty in list responses).
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Title {
    /// Release year, parsed from the release date.
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_ref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }

    /// Full poster URL, if the title has a poster.
    pub fn poster_url(&self, image_base: &str, size: ImageSize) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|p| format!("{}/{}{}", image_base, size.as_str(), p))
    }

    /// Full backdrop URL, if the title has a backdrop.
    pub fn backdrop_url(&self, image_base: &str, size: ImageSize) -> Option<String> {
        self.backdrop_path
            .as_ref()
            .map(|p| format!("{}/{}{}", image_base, size.as_str(), p))
    }
}

/// A genre tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// A video attached to a title (trailer, teaser, clip...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    /// TMDB video id.
    pub id: String,
    /// Platform-specific identifier (a YouTube video id for site "YouTube").
    pub key: String,
    /// Video kind as reported by the API, e.g. "Trailer" or "Teaser".
    #[serde(rename = "type")]
    pub kind: String,
    /// Video name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hosting site, e.g. "YouTube".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl Video {
    pub fn is_trailer(&self) -> bool {
        self.kind == "Trailer"
    }
}

/// One page of results from a paginated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}
