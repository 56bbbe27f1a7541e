//! Catalog state container.
//!
//! [`CatalogStore`] owns all mutable browsing state: one list of titles per
//! catalog slice, the current selection and its videos, the watch-later list,
//! and the shared last-error slot. The media API collaborator is injected at
//! construction, so front ends and tests decide what the store talks to.
//!
//! Consumers read state through the accessors (which hand out clones) and
//! mutate only through the operations below; fetch results are applied by the
//! store itself. A shutdown broadcast cancels in-flight fetches, and video
//! responses are keyed by a request token so a slow response for an earlier
//! selection never overwrites the videos of a newer one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::api::{MediaApi, Slice, Title, Video};

/// Process-wide catalog/selection state holder.
pub struct CatalogStore {
    api: Arc<dyn MediaApi>,
    slices: RwLock<HashMap<Slice, Vec<Title>>>,
    selection: RwLock<Option<u64>>,
    videos: RwLock<Vec<Video>>,
    video_token: AtomicU64,
    watch_later: RwLock<Vec<Title>>,
    last_error: RwLock<Option<String>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl CatalogStore {
    /// Create a store with an injected media API collaborator.
    ///
    /// All slices start empty; call [`initialize`](Self::initialize) (or
    /// [`spawn_initialize`](Self::spawn_initialize)) to populate them.
    pub fn new(api: Arc<dyn MediaApi>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            api,
            slices: RwLock::new(HashMap::new()),
            selection: RwLock::new(None),
            videos: RwLock::new(Vec::new()),
            video_token: AtomicU64::new(0),
            watch_later: RwLock::new(Vec::new()),
            last_error: RwLock::new(None),
            shutdown_tx,
        }
    }

    /// Load every catalog slice, one concurrent fetch per slice.
    ///
    /// The fetches are independent: one failing neither cancels nor blocks
    /// the others. Failures land in the shared error slot and leave the
    /// affected slice at its previous value.
    pub async fn initialize(&self) {
        info!("Initializing catalog store ({} slices)", Slice::ALL.len());
        join_all(Slice::ALL.iter().map(|s| self.refresh_slice(*s))).await;
    }

    /// Spawn [`initialize`](Self::initialize) in the background.
    pub fn spawn_initialize(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.initialize().await })
    }

    /// Refetch a single slice, replacing its titles wholesale on success.
    pub async fn refresh_slice(&self, slice: Slice) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::select! {
            _ = shutdown_rx.recv() => {
                debug!("Slice fetch cancelled by shutdown: {}", slice.name());
            }
            result = self.api.slice_titles(slice) => match result {
                Ok(titles) => {
                    debug!("Slice {} loaded: {} titles", slice.name(), titles.len());
                    self.slices.write().await.insert(slice, titles);
                }
                Err(e) => {
                    warn!("Slice {} fetch failed: {}", slice.name(), e);
                    *self.last_error.write().await = Some(e.to_string());
                }
            }
        }
    }

    /// Set (or clear) the selected title and fetch its videos.
    ///
    /// Selecting a title replaces the video set wholesale once its fetch
    /// resolves; a response for a selection that is no longer current is
    /// discarded. Clearing the selection also clears the video set.
    pub async fn select_title(&self, id: Option<u64>) {
        // Selection and its request token move together.
        let token = {
            let mut selection = self.selection.write().await;
            *selection = id;
            self.video_token.fetch_add(1, Ordering::SeqCst) + 1
        };

        let Some(movie_id) = id else {
            self.videos.write().await.clear();
            return;
        };

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::select! {
            _ = shutdown_rx.recv() => {
                debug!("Video fetch cancelled by shutdown: movie={}", movie_id);
            }
            result = self.api.movie_videos(movie_id) => match result {
                Ok(videos) => {
                    let mut current = self.videos.write().await;
                    if self.video_token.load(Ordering::SeqCst) == token {
                        debug!("Videos loaded for movie {}: {} entries", movie_id, videos.len());
                        *current = videos;
                    } else {
                        debug!("Discarding stale video response for movie {}", movie_id);
                    }
                }
                Err(e) => {
                    warn!("Video fetch failed for movie {}: {}", movie_id, e);
                    *self.last_error.write().await = Some(e.to_string());
                }
            }
        }
    }

    /// Add a title to the watch-later list.
    ///
    /// No-op when an entry with the same id already exists; the first
    /// inserted record is kept.
    pub async fn add_to_watch_later(&self, title: Title) {
        let mut list = self.watch_later.write().await;
        if list.iter().any(|t| t.id == title.id) {
            debug!("Title {} already in watch-later list", title.id);
            return;
        }
        list.push(title);
    }

    /// Cancel any in-flight fetch.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Titles of one slice (empty until its first successful fetch).
    pub async fn slice(&self, slice: Slice) -> Vec<Title> {
        self.slices
            .read()
            .await
            .get(&slice)
            .cloned()
            .unwrap_or_default()
    }

    /// Currently selected title id, if any.
    pub async fn selection(&self) -> Option<u64> {
        *self.selection.read().await
    }

    /// Videos of the current selection.
    pub async fn videos(&self) -> Vec<Video> {
        self.videos.read().await.clone()
    }

    /// First video of kind "Trailer" among the current selection's videos.
    pub async fn first_trailer(&self) -> Option<Video> {
        self.videos
            .read()
            .await
            .iter()
            .find(|v| v.is_trailer())
            .cloned()
    }

    /// Watch-later list, in insertion order.
    pub async fn watch_later(&self) -> Vec<Title> {
        self.watch_later.read().await.clone()
    }

    /// Message of the most recent failed fetch. Never cleared by a later
    /// success; overwritten by the next failure.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }
}
