//! Application model: the composition root handing out the engine and store.
//!
//! The UI layer receives `App` (or the `Arc` handles inside it) instead of
//! reaching for global singletons.

use std::sync::Arc;

use tracing::info;

use crate::catalog::{Album, Artist, Catalog, Track};
use crate::config::Settings;
use crate::error::Result;
use crate::library::LibraryStore;
use crate::player::PlaybackEngine;

const HOME_TRENDING_LIMIT: u32 = 50;
const HOME_RELEASES_LIMIT: u32 = 30;
const HOME_ARTISTS_LIMIT: u32 = 30;

/// Landing-page content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
    pub trending: Vec<Track>,
    pub new_releases: Vec<Album>,
    pub top_artists: Vec<Artist>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty() && self.artists.is_empty()
    }
}

pub struct App<C> {
    engine: Arc<PlaybackEngine>,
    library: Arc<LibraryStore<C>>,
}

impl<C: Catalog> App<C> {
    /// Build the engine and store from `settings` over `catalog`.
    pub fn new(settings: &Settings, catalog: C) -> Self {
        let engine = PlaybackEngine::new(settings.playback.initial_state());
        let library =
            LibraryStore::with_history_limit(catalog, settings.library.recently_played_limit);
        info!(
            repeat_mode = ?settings.playback.repeat_mode,
            history_limit = settings.library.recently_played_limit,
            "app services ready"
        );
        Self {
            engine: Arc::new(engine),
            library: Arc::new(library),
        }
    }

    pub fn engine(&self) -> &Arc<PlaybackEngine> {
        &self.engine
    }

    pub fn library(&self) -> &Arc<LibraryStore<C>> {
        &self.library
    }

    /// Play a single track and record it in the history.
    pub fn play_track(&self, track: Track) {
        self.library.add_to_recently_played(&track);
        self.engine.play_track(track);
    }

    /// Replace the queue and start at `index`, recording the started track.
    pub fn play_from(&self, tracks: Vec<Track>, index: usize) -> Result<()> {
        let started = tracks.get(index).cloned();
        self.engine.play_queue(tracks, index)?;
        if let Some(t) = started {
            self.library.add_to_recently_played(&t);
        }
        Ok(())
    }

    /// Skip to the next queue entry.
    pub fn advance(&self) {
        self.record_if_changed(|e| e.play_next());
    }

    pub fn previous(&self) {
        self.record_if_changed(|e| e.play_previous());
    }

    /// Natural end of the current track, as reported by the audio backend.
    pub fn finish_track(&self) {
        self.record_if_changed(|e| e.track_finished());
    }

    fn record_if_changed(&self, op: impl FnOnce(&PlaybackEngine)) {
        let before = self.engine.snapshot().current_track.map(|t| t.id);
        op(&self.engine);
        let after = self.engine.snapshot().current_track;
        if let Some(track) = after {
            if before.as_deref() != Some(track.id.as_str()) {
                self.library.add_to_recently_played(&track);
            }
        }
    }

    /// Trending tracks, new releases and top artists, fetched concurrently.
    pub async fn home_feed(&self) -> HomeFeed {
        let (trending, new_releases, top_artists) = tokio::join!(
            self.library.get_trending_tracks(HOME_TRENDING_LIMIT),
            self.library.get_new_releases(HOME_RELEASES_LIMIT),
            self.library.get_top_artists(HOME_ARTISTS_LIMIT),
        );
        HomeFeed {
            trending: self.library.annotate_likes(trending),
            new_releases,
            top_artists,
        }
    }

    /// Tracks, albums and artists matching `query`. A blank query returns
    /// nothing without asking the catalog.
    pub async fn search(&self, query: &str) -> SearchResults {
        let query = query.trim();
        if query.is_empty() {
            return SearchResults::default();
        }
        let (tracks, albums, artists) = tokio::join!(
            self.library.search_tracks(query),
            self.library.search_albums(query),
            self.library.search_artists(query),
        );
        SearchResults {
            tracks: self.library.annotate_likes(tracks),
            albums,
            artists,
        }
    }
}
