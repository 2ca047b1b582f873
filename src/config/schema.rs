use serde::{Deserialize, Serialize};

use crate::player::{AudioQuality, MAX_CROSSFADE_SECONDS, PlaybackState, RepeatMode};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadence/config.toml` or `~/.config/cadence/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENCE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Root of the Jamendo v3 API, without a trailing slash.
    pub base_url: String,
    /// Public Jamendo client id.
    pub client_id: String,
    /// Request and connect timeout (seconds).
    pub timeout_secs: u64,
    /// Artwork size requested from the API (pixels).
    pub image_size: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.jamendo.com/v3.0".to_string(),
            client_id: "56d30c95".to_string(),
            timeout_secs: 30,
            image_size: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Initial repeat mode: `off`, `all` or `one`.
    pub repeat_mode: RepeatMode,
    pub audio_quality: AudioQuality,
    /// Crossfade between tracks, 0 to 10 seconds.
    pub crossfade_seconds: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        let state = PlaybackState::default();
        Self {
            shuffle: state.is_shuffle_enabled,
            repeat_mode: state.repeat_mode,
            audio_quality: state.audio_quality,
            crossfade_seconds: state.crossfade_seconds,
        }
    }
}

impl PlaybackSettings {
    /// Initial engine state carrying these defaults.
    pub fn initial_state(&self) -> PlaybackState {
        PlaybackState {
            is_shuffle_enabled: self.shuffle,
            repeat_mode: self.repeat_mode,
            audio_quality: self.audio_quality,
            crossfade_seconds: self.crossfade_seconds.min(MAX_CROSSFADE_SECONDS),
            ..PlaybackState::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Number of entries kept in the recently-played history.
    pub recently_played_limit: usize,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            recently_played_limit: crate::library::RECENTLY_PLAYED_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "cadence=info".to_string(),
        }
    }
}
