//! Catalog collaborator: the read-only source of tracks, albums and artists.
//!
//! [`Catalog`] is the seam the library store talks to. [`JamendoClient`] is
//! the production implementation; tests drive the store with an in-memory fake.

mod jamendo;
mod model;

use std::future::Future;

pub use jamendo::JamendoClient;
pub use model::*;

use crate::error::Result;

/// Default page size used by listing endpoints.
pub const DEFAULT_LIMIT: u32 = 50;

/// Sort orders understood by the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    PopularityWeek,
    PopularityTotal,
    ReleaseDateDesc,
    TrackPosition,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PopularityWeek => "popularity_week",
            Self::PopularityTotal => "popularity_total",
            Self::ReleaseDateDesc => "releasedate_desc",
            Self::TrackPosition => "track_position",
        }
    }
}

/// Parameters for a track listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub limit: u32,
    pub offset: u32,
    pub order: Order,
    /// Joined with `+` on the wire.
    pub tags: Vec<String>,
    pub search: Option<String>,
}

impl Default for TrackQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            order: Order::PopularityWeek,
            tags: Vec::new(),
            search: None,
        }
    }
}

impl TrackQuery {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }
}

/// Parameters for an album listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumQuery {
    pub limit: u32,
    pub offset: u32,
    pub order: Order,
    pub search: Option<String>,
}

impl Default for AlbumQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            order: Order::ReleaseDateDesc,
            search: None,
        }
    }
}

impl AlbumQuery {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }
}

/// Parameters for an artist listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistQuery {
    pub limit: u32,
    pub offset: u32,
    pub order: Order,
    pub search: Option<String>,
}

impl Default for ArtistQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            order: Order::PopularityWeek,
            search: None,
        }
    }
}

impl ArtistQuery {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }
}

/// Read-only catalog of tracks, albums and artists.
///
/// Every call either returns the full result list or fails; callers decide
/// how to degrade.
pub trait Catalog: Send + Sync {
    fn tracks(&self, query: &TrackQuery) -> impl Future<Output = Result<Vec<Track>>> + Send;

    fn albums(&self, query: &AlbumQuery) -> impl Future<Output = Result<Vec<Album>>> + Send;

    fn artists(&self, query: &ArtistQuery) -> impl Future<Output = Result<Vec<Artist>>> + Send;

    /// Tracks of one album, in album order.
    fn album_tracks(&self, album_id: &str) -> impl Future<Output = Result<Vec<Track>>> + Send;

    /// Most popular tracks of one artist.
    fn artist_tracks(
        &self,
        artist_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Track>>> + Send;

    /// Albums of one artist, newest first.
    fn artist_albums(&self, artist_id: &str) -> impl Future<Output = Result<Vec<Album>>> + Send;

    /// Free-text track search.
    fn search_tracks(&self, query: &str) -> impl Future<Output = Result<Vec<Track>>> + Send {
        let query = TrackQuery::default().search(query);
        async move { self.tracks(&query).await }
    }

    /// Weekly popular tracks matching `tags`.
    fn radio(&self, limit: u32, tags: &[String]) -> impl Future<Output = Result<Vec<Track>>> + Send {
        let query = TrackQuery::default()
            .limit(limit)
            .order(Order::PopularityWeek)
            .tags(tags.iter().cloned());
        async move { self.tracks(&query).await }
    }
}

#[cfg(test)]
pub(crate) mod fake;
