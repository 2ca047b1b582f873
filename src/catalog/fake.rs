//! In-memory catalog used by the store and app tests.

use std::sync::{Arc, Mutex};

use super::{Album, AlbumQuery, Artist, ArtistQuery, Catalog, Track, TrackQuery};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Tracks(TrackQuery),
    Albums(AlbumQuery),
    Artists(ArtistQuery),
    AlbumTracks(String),
    ArtistTracks(String, u32),
    ArtistAlbums(String),
}

/// Answers every query with the canned lists and records what was asked.
#[derive(Default, Clone)]
pub(crate) struct FakeCatalog {
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    pub fail: bool,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeCatalog {
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer<T: Clone>(&self, call: Call, items: &[T]) -> Result<Vec<T>> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(Error::Api {
                code: 5,
                message: "unavailable".to_string(),
            });
        }
        Ok(items.to_vec())
    }
}

impl Catalog for FakeCatalog {
    async fn tracks(&self, query: &TrackQuery) -> Result<Vec<Track>> {
        self.answer(Call::Tracks(query.clone()), &self.tracks)
    }

    async fn albums(&self, query: &AlbumQuery) -> Result<Vec<Album>> {
        self.answer(Call::Albums(query.clone()), &self.albums)
    }

    async fn artists(&self, query: &ArtistQuery) -> Result<Vec<Artist>> {
        self.answer(Call::Artists(query.clone()), &self.artists)
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>> {
        self.answer(Call::AlbumTracks(album_id.to_string()), &self.tracks)
    }

    async fn artist_tracks(&self, artist_id: &str, limit: u32) -> Result<Vec<Track>> {
        self.answer(Call::ArtistTracks(artist_id.to_string(), limit), &self.tracks)
    }

    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<Album>> {
        self.answer(Call::ArtistAlbums(artist_id.to_string()), &self.albums)
    }
}

/// A bare track with the given id and name.
pub(crate) fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artist_name: "Artist".to_string(),
        duration_seconds: 180,
        ..Track::default()
    }
}
