//! Playback snapshot and the small enums it carries.

use serde::{Deserialize, Serialize};

use crate::catalog::Track;

/// Longest accepted crossfade, in seconds.
pub const MAX_CROSSFADE_SECONDS: u8 = 10;

/// Past this position `play_previous` restarts the current track instead of
/// stepping back.
pub const RESTART_THRESHOLD_MS: u64 = 3_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatMode {
    /// Stop at the end of the queue.
    #[default]
    #[serde(alias = "no-loop", alias = "none")]
    Off,
    /// Repeat the current track when it ends.
    #[serde(alias = "loop-one", alias = "repeat-one")]
    One,
    /// Wrap around to the start of the queue.
    #[serde(alias = "loop-all", alias = "loop-around")]
    All,
}

impl RepeatMode {
    /// `Off -> All -> One -> Off`.
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioQuality {
    Low,
    Medium,
    #[default]
    High,
    Lossless,
}

impl std::str::FromStr for AudioQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "lossless" => Ok(Self::Lossless),
            other => Err(format!("unknown audio quality: {other}")),
        }
    }
}

/// Coarse transport status derived from a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Idle,
    Paused,
    Playing,
}

/// Complete playback state. Every engine mutation publishes a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub queue: Vec<Track>,
    pub is_playing: bool,
    pub current_position_ms: u64,
    pub duration_ms: u64,
    pub is_shuffle_enabled: bool,
    pub repeat_mode: RepeatMode,
    pub audio_quality: AudioQuality,
    pub crossfade_seconds: u8,
    pub is_ai_mode_enabled: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            queue: Vec::new(),
            is_playing: false,
            current_position_ms: 0,
            duration_ms: 0,
            is_shuffle_enabled: false,
            repeat_mode: RepeatMode::Off,
            audio_quality: AudioQuality::High,
            crossfade_seconds: 3,
            is_ai_mode_enabled: false,
        }
    }
}

impl PlaybackState {
    pub fn status(&self) -> PlayerStatus {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlayerStatus::Idle,
            (Some(_), false) => PlayerStatus::Paused,
            (Some(_), true) => PlayerStatus::Playing,
        }
    }

    /// Position of the current track in the queue, matched by id.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current_track.as_ref()?;
        self.queue.iter().position(|t| t.id == current.id)
    }
}
