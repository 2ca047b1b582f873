//! The library store: liked tracks, playlists, listening history and
//! pass-through catalog queries.

use std::collections::HashSet;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::catalog::{
    Album, AlbumQuery, Artist, ArtistQuery, Catalog, DEFAULT_LIMIT, Order, Track, TrackQuery,
};
use crate::error::Result;

use super::model::Playlist;

/// Default size of the recently-played history.
pub const RECENTLY_PLAYED_LIMIT: usize = 50;

const RECOMMENDATION_LIMIT: u32 = 30;
const RECOMMENDATION_SEED_TAGS: usize = 3;
const CHILL_TAGS: [&str; 3] = ["chillout", "ambient", "lounge"];
const FOCUS_TAGS: [&str; 3] = ["classical", "instrumental", "piano"];

/// User collections plus read access to the catalog.
///
/// Each list lives in its own `watch` channel and is replaced as a whole on
/// every write, so subscribers always observe a complete list.
pub struct LibraryStore<C> {
    catalog: C,
    liked: watch::Sender<Vec<Track>>,
    playlists: watch::Sender<Vec<Playlist>>,
    recently_played: watch::Sender<Vec<Track>>,
    history_limit: usize,
}

impl<C: Catalog> LibraryStore<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_history_limit(catalog, RECENTLY_PLAYED_LIMIT)
    }

    /// `history_limit` is clamped to `1..=RECENTLY_PLAYED_LIMIT`.
    pub fn with_history_limit(catalog: C, history_limit: usize) -> Self {
        Self {
            catalog,
            liked: watch::channel(Vec::new()).0,
            playlists: watch::channel(Vec::new()).0,
            recently_played: watch::channel(Vec::new()).0,
            history_limit: history_limit.clamp(1, RECENTLY_PLAYED_LIMIT),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    // ---- liked tracks ----

    /// Unlike when present, otherwise like (newest first).
    pub fn toggle_like(&self, track: &Track) {
        self.liked.send_modify(|liked| {
            if let Some(pos) = liked.iter().position(|t| t.id == track.id) {
                liked.remove(pos);
                debug!(track_id = %track.id, "unliked");
            } else {
                let mut copy = track.clone();
                copy.is_liked = true;
                liked.insert(0, copy);
                debug!(track_id = %track.id, "liked");
            }
        });
    }

    pub fn is_liked(&self, track_id: &str) -> bool {
        self.liked.borrow().iter().any(|t| t.id == track_id)
    }

    pub fn liked_tracks(&self) -> Vec<Track> {
        self.liked.borrow().clone()
    }

    pub fn subscribe_liked(&self) -> watch::Receiver<Vec<Track>> {
        self.liked.subscribe()
    }

    /// Re-stamp `is_liked` on `tracks` from the liked list, which is the
    /// only authoritative source; flags on copies held elsewhere go stale.
    pub fn annotate_likes(&self, mut tracks: Vec<Track>) -> Vec<Track> {
        let liked: HashSet<String> = self.liked.borrow().iter().map(|t| t.id.clone()).collect();
        for t in &mut tracks {
            t.is_liked = liked.contains(&t.id);
        }
        tracks
    }

    // ---- history ----

    /// Move `track` to the front of the history, evicting the oldest entries
    /// past the limit.
    pub fn add_to_recently_played(&self, track: &Track) {
        let limit = self.history_limit;
        self.recently_played.send_modify(|history| {
            history.retain(|t| t.id != track.id);
            history.insert(0, track.clone());
            history.truncate(limit);
        });
    }

    pub fn recently_played(&self) -> Vec<Track> {
        self.recently_played.borrow().clone()
    }

    pub fn subscribe_recently_played(&self) -> watch::Receiver<Vec<Track>> {
        self.recently_played.subscribe()
    }

    // ---- playlists ----

    pub fn create_playlist(&self, name: &str, description: &str) -> Playlist {
        let playlist = Playlist::new(name, description);
        info!(playlist_id = %playlist.id, name, "playlist created");
        let created = playlist.clone();
        self.playlists.send_modify(|all| all.insert(0, playlist));
        created
    }

    /// Append `track` unless the playlist is unknown or already holds it.
    pub fn add_track_to_playlist(&self, playlist_id: &str, track: &Track) {
        self.playlists.send_if_modified(|all| {
            let Some(p) = all.iter_mut().find(|p| p.id == playlist_id) else {
                debug!(playlist_id, "add to unknown playlist ignored");
                return false;
            };
            if p.contains(&track.id) {
                return false;
            }
            p.tracks.push(track.clone());
            p.touch();
            true
        });
    }

    pub fn remove_track_from_playlist(&self, playlist_id: &str, track_id: &str) {
        self.playlists.send_if_modified(|all| {
            let Some(p) = all.iter_mut().find(|p| p.id == playlist_id) else {
                return false;
            };
            p.tracks.retain(|t| t.id != track_id);
            p.touch();
            true
        });
    }

    pub fn delete_playlist(&self, playlist_id: &str) {
        self.playlists.send_if_modified(|all| {
            let before = all.len();
            all.retain(|p| p.id != playlist_id);
            let removed = all.len() != before;
            if removed {
                info!(playlist_id, "playlist deleted");
            }
            removed
        });
    }

    pub fn rename_playlist(&self, playlist_id: &str, new_name: &str) {
        self.playlists.send_if_modified(|all| {
            let Some(p) = all.iter_mut().find(|p| p.id == playlist_id) else {
                return false;
            };
            p.name = new_name.to_string();
            p.touch();
            true
        });
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.playlists.borrow().clone()
    }

    pub fn playlist(&self, playlist_id: &str) -> Option<Playlist> {
        self.playlists
            .borrow()
            .iter()
            .find(|p| p.id == playlist_id)
            .cloned()
    }

    pub fn subscribe_playlists(&self) -> watch::Receiver<Vec<Playlist>> {
        self.playlists.subscribe()
    }

    // ---- catalog ----

    pub async fn get_trending_tracks(&self, limit: u32) -> Vec<Track> {
        let query = TrackQuery::default()
            .limit(limit)
            .order(Order::PopularityWeek);
        or_empty("trending_tracks", self.catalog.tracks(&query).await)
    }

    pub async fn get_new_releases(&self, limit: u32) -> Vec<Album> {
        let query = AlbumQuery::default().limit(limit);
        or_empty("new_releases", self.catalog.albums(&query).await)
    }

    pub async fn get_top_artists(&self, limit: u32) -> Vec<Artist> {
        let query = ArtistQuery::default().limit(limit);
        or_empty("top_artists", self.catalog.artists(&query).await)
    }

    pub async fn search_tracks(&self, query: &str) -> Vec<Track> {
        or_empty("search_tracks", self.catalog.search_tracks(query).await)
    }

    pub async fn search_albums(&self, query: &str) -> Vec<Album> {
        let query = AlbumQuery::default().search(query);
        or_empty("search_albums", self.catalog.albums(&query).await)
    }

    pub async fn search_artists(&self, query: &str) -> Vec<Artist> {
        let query = ArtistQuery::default().search(query);
        or_empty("search_artists", self.catalog.artists(&query).await)
    }

    /// Tracks of an album in album order.
    pub async fn get_album_details(&self, album_id: &str) -> Vec<Track> {
        or_empty("album_details", self.catalog.album_tracks(album_id).await)
    }

    pub async fn get_artist_tracks(&self, artist_id: &str) -> Vec<Track> {
        or_empty(
            "artist_tracks",
            self.catalog.artist_tracks(artist_id, DEFAULT_LIMIT).await,
        )
    }

    pub async fn get_artist_albums(&self, artist_id: &str) -> Vec<Album> {
        or_empty("artist_albums", self.catalog.artist_albums(artist_id).await)
    }

    pub async fn get_chill_mixes(&self) -> Vec<Track> {
        let tags = CHILL_TAGS.map(String::from);
        or_empty("chill_mixes", self.catalog.radio(DEFAULT_LIMIT, &tags).await)
    }

    pub async fn get_focus_mixes(&self) -> Vec<Track> {
        let tags = FOCUS_TAGS.map(String::from);
        or_empty("focus_mixes", self.catalog.radio(DEFAULT_LIMIT, &tags).await)
    }

    /// Tracks similar to `seed`, matched on its first three tags. A seed
    /// without tags gets the weekly popular list instead.
    pub async fn get_recommendations(&self, seed: &Track) -> Vec<Track> {
        let tags = recommendation_tags(seed);
        let result = if tags.is_empty() {
            let query = TrackQuery::default()
                .limit(RECOMMENDATION_LIMIT)
                .order(Order::PopularityWeek);
            self.catalog.tracks(&query).await
        } else {
            self.catalog.radio(RECOMMENDATION_LIMIT, &tags).await
        };
        or_empty("recommendations", result)
    }
}

pub(crate) fn recommendation_tags(seed: &Track) -> Vec<String> {
    seed.tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(RECOMMENDATION_SEED_TAGS)
        .map(str::to_string)
        .collect()
}

/// Catalog failures become an empty list; the cause only reaches the log.
fn or_empty<T>(what: &'static str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => {
            debug!(what, count = items.len(), "catalog fetch");
            items
        }
        Err(e) => {
            warn!(what, error = %e, "catalog fetch failed; returning no results");
            Vec::new()
        }
    }
}
