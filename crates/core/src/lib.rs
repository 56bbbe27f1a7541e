//! Catalog browsing core for movie and TV front ends.
//!
//! This crate owns everything a presentation layer needs short of pixels:
//! a typed client for the TMDB HTTP API ([`api`]) and the [`CatalogStore`]
//! state container that loads catalog slices, tracks the current selection
//! and its videos, and keeps the watch-later list.
//!
//! Front ends construct a [`CatalogStore`] with an injected [`api::MediaApi`]
//! implementation and read state through the store's accessors; all mutation
//! goes through the store's operations.

pub mod api;
pub mod config;
pub mod store;
pub mod testing;

pub use api::{
    Genre, ImageSize, MediaApi, MediaApiError, Page, Slice, Title, TmdbClient, TmdbConfig, Video,
    DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use store::CatalogStore;
