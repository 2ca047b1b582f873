//! Catalog entity types and their Jamendo wire records.
//!
//! The wire records mirror the JSON the API sends (string ids, empty strings
//! for missing URLs, a nested `musicinfo` block). They are converted into the
//! domain types below as soon as a response is decoded.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A playable catalog track.
///
/// Equality and hashing only look at `id`: two copies of the same catalog
/// track compare equal even if one of them carries a stale `is_liked` flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artist_id: Option<String>,
    pub album_name: String,
    pub album_id: Option<String>,
    pub duration_seconds: u32,
    /// Stream URL, falling back to the download URL.
    pub audio_url: Option<String>,
    /// Album artwork, falling back to the track image.
    pub cover_art_url: Option<String>,
    pub release_date: Option<String>,
    /// Position of the track within its album.
    pub position: Option<u32>,
    /// Genres, then moods, then instruments. Used for recommendations.
    pub tags: Vec<String>,
    pub is_liked: bool,
    pub is_downloaded: bool,
}

impl Track {
    /// Duration as `m:ss`.
    pub fn duration_formatted(&self) -> String {
        format!(
            "{}:{:02}",
            self.duration_seconds / 60,
            self.duration_seconds % 60
        )
    }

    /// Human readable "Artist - Title" line.
    pub fn display(&self) -> String {
        let artist = self.artist_name.trim();
        if artist.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", artist, self.name)
        }
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artist_id: Option<String>,
    pub image_url: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub website: Option<String>,
}

/// Response envelope shared by every Jamendo listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub headers: Headers,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Headers {
    pub status: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub warnings: Option<String>,
    #[serde(default)]
    pub results_count: u64,
}

impl Headers {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TrackRecord {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artist_id: Option<String>,
    pub album_name: String,
    pub album_id: Option<String>,
    pub album_image: Option<String>,
    pub duration: u32,
    pub audio: Option<String>,
    pub audiodownload: Option<String>,
    pub image: Option<String>,
    pub releasedate: Option<String>,
    pub position: Option<u32>,
    pub musicinfo: Option<MusicInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MusicInfo {
    pub tags: MusicTags,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MusicTags {
    pub genres: Vec<String>,
    pub vartags: Vec<String>,
    pub instruments: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AlbumRecord {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artist_id: Option<String>,
    pub image: Option<String>,
    pub releasedate: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ArtistRecord {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub website: Option<String>,
}

/// The API sends `""` rather than omitting absent URLs and dates.
fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<TrackRecord> for Track {
    fn from(r: TrackRecord) -> Self {
        let mut tags: Vec<String> = Vec::new();
        if let Some(info) = r.musicinfo {
            let MusicTags {
                genres,
                vartags,
                instruments,
            } = info.tags;
            for tag in genres.into_iter().chain(vartags).chain(instruments) {
                let tag = tag.trim().to_string();
                if !tag.is_empty() && !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }

        Self {
            id: r.id,
            name: r.name,
            artist_name: r.artist_name,
            artist_id: non_empty(r.artist_id),
            album_name: r.album_name,
            album_id: non_empty(r.album_id),
            duration_seconds: r.duration,
            audio_url: non_empty(r.audio).or_else(|| non_empty(r.audiodownload)),
            cover_art_url: non_empty(r.album_image).or_else(|| non_empty(r.image)),
            release_date: non_empty(r.releasedate),
            position: r.position,
            tags,
            is_liked: false,
            is_downloaded: false,
        }
    }
}

impl From<AlbumRecord> for Album {
    fn from(r: AlbumRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            artist_name: r.artist_name,
            artist_id: non_empty(r.artist_id),
            image_url: non_empty(r.image),
            release_date: non_empty(r.releasedate),
        }
    }
}

impl From<ArtistRecord> for Artist {
    fn from(r: ArtistRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            image_url: non_empty(r.image),
            website: non_empty(r.website),
        }
    }
}
