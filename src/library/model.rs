use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Track;

/// A user playlist. Track ids are unique within one playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tracks: Vec<Track>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            tracks: Vec::new(),
            cover_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn total_duration_seconds(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.duration_seconds)).sum()
    }

    /// `"1 hr 5 min"` past the hour, `"42 min"` below it.
    pub fn total_duration_formatted(&self) -> String {
        let total = self.total_duration_seconds();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        if hours > 0 {
            format!("{hours} hr {minutes} min")
        } else {
            format!("{minutes} min")
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
