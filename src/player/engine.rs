//! The playback engine: single source of truth for what is playing and how.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::catalog::Track;
use crate::error::{Error, Result};

use super::queue::{next_index, previous_index, shuffle_in_place, unshuffle_in_place};
use super::state::{
    AudioQuality, MAX_CROSSFADE_SECONDS, PlaybackState, RESTART_THRESHOLD_MS, RepeatMode,
};

/// Owns the [`PlaybackState`] and publishes it to subscribers.
///
/// Every operation runs under the channel's write lock, so concurrent
/// callers are serialized. Operations that leave the state untouched do not
/// wake subscribers.
pub struct PlaybackEngine {
    tx: watch::Sender<PlaybackState>,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(PlaybackState::default())
    }
}

impl PlaybackEngine {
    /// Create an engine starting from `initial` (usually defaults plus
    /// configured audio settings).
    pub fn new(initial: PlaybackState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> PlaybackState {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.tx.subscribe()
    }

    fn update(&self, op: &'static str, f: impl FnOnce(&mut PlaybackState) -> bool) -> bool {
        let changed = self.tx.send_if_modified(f);
        if changed {
            debug!(op, "playback state published");
        }
        changed
    }

    pub fn play_track(&self, track: Track) {
        info!(track_id = %track.id, name = %track.name, "play track");
        self.update("play_track", |s| {
            s.current_track = Some(track);
            s.is_playing = true;
            s.current_position_ms = 0;
            true
        });
    }

    /// Replace the queue with `tracks` and start playing `tracks[start_index]`.
    ///
    /// An empty `tracks` is ignored. A `start_index` past the end is a caller
    /// bug and is reported as [`Error::QueueIndex`] without touching state.
    pub fn play_queue(&self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        if tracks.is_empty() {
            return Ok(());
        }
        if start_index >= tracks.len() {
            return Err(Error::QueueIndex {
                index: start_index,
                len: tracks.len(),
            });
        }
        info!(len = tracks.len(), start_index, "play queue");
        self.update("play_queue", |s| {
            s.current_track = Some(tracks[start_index].clone());
            s.queue = tracks;
            s.is_playing = true;
            s.current_position_ms = 0;
            true
        });
        Ok(())
    }

    /// Flip play/pause. Does nothing while no track is loaded.
    pub fn toggle_play_pause(&self) {
        self.update("toggle_play_pause", |s| {
            if s.current_track.is_none() {
                return false;
            }
            s.is_playing = !s.is_playing;
            true
        });
    }

    /// Step to the next queue entry, wrapping under [`RepeatMode::All`].
    ///
    /// At the end of the queue without wrap the state is left as is: the
    /// last track stays current and `is_playing` is not cleared.
    pub fn play_next(&self) {
        self.update("play_next", |s| {
            match next_index(s.queue.len(), s.current_index(), s.repeat_mode) {
                Some(i) => {
                    s.current_track = Some(s.queue[i].clone());
                    s.current_position_ms = 0;
                    true
                }
                None => false,
            }
        });
    }

    /// Restart the current track when past three seconds, otherwise step back.
    pub fn play_previous(&self) {
        self.update("play_previous", |s| {
            if s.current_position_ms > RESTART_THRESHOLD_MS {
                s.current_position_ms = 0;
                return true;
            }
            match previous_index(s.queue.len(), s.current_index(), s.repeat_mode) {
                Some(i) => {
                    s.current_track = Some(s.queue[i].clone());
                    s.current_position_ms = 0;
                    true
                }
                None => false,
            }
        });
    }

    /// Called by the audio backend when the current track plays out.
    ///
    /// `One` restarts the track. Otherwise playback advances like
    /// [`play_next`](Self::play_next), except that running off the end of the
    /// queue stops playback and rewinds the last track.
    pub fn track_finished(&self) {
        self.update("track_finished", |s| {
            if s.current_track.is_none() {
                return false;
            }
            if s.repeat_mode == RepeatMode::One {
                s.current_position_ms = 0;
                s.is_playing = true;
                return true;
            }
            match next_index(s.queue.len(), s.current_index(), s.repeat_mode) {
                Some(i) => {
                    s.current_track = Some(s.queue[i].clone());
                    s.is_playing = true;
                }
                None => s.is_playing = false,
            }
            s.current_position_ms = 0;
            true
        });
    }

    /// Store `position_ms` as is; it is not clamped to the duration.
    pub fn seek_to(&self, position_ms: u64) {
        self.update("seek_to", |s| {
            s.current_position_ms = position_ms;
            true
        });
    }

    pub fn toggle_shuffle(&self) {
        self.update("toggle_shuffle", |s| {
            s.is_shuffle_enabled = !s.is_shuffle_enabled;
            if s.is_shuffle_enabled {
                shuffle_in_place(&mut s.queue);
            } else {
                unshuffle_in_place(&mut s.queue);
            }
            true
        });
    }

    pub fn cycle_repeat_mode(&self) {
        self.update("cycle_repeat_mode", |s| {
            s.repeat_mode = s.repeat_mode.next();
            true
        });
    }

    pub fn set_audio_quality(&self, quality: AudioQuality) {
        self.update("set_audio_quality", |s| {
            s.audio_quality = quality;
            true
        });
    }

    /// Set the crossfade length, clamped to `0..=10` seconds.
    pub fn set_crossfade_duration(&self, seconds: u8) {
        let seconds = seconds.min(MAX_CROSSFADE_SECONDS);
        self.update("set_crossfade_duration", |s| {
            s.crossfade_seconds = seconds;
            true
        });
    }

    pub fn toggle_ai_mode(&self) {
        self.update("toggle_ai_mode", |s| {
            s.is_ai_mode_enabled = !s.is_ai_mode_enabled;
            true
        });
    }

    /// Append `track`; the queue may hold duplicates.
    pub fn add_to_queue(&self, track: Track) {
        self.update("add_to_queue", |s| {
            s.queue.push(track);
            true
        });
    }

    /// Remove and return the entry at `index`.
    pub fn remove_from_queue(&self, index: usize) -> Result<Track> {
        let mut removed = Err(Error::QueueIndex { index, len: 0 });
        self.update("remove_from_queue", |s| {
            if index >= s.queue.len() {
                removed = Err(Error::QueueIndex {
                    index,
                    len: s.queue.len(),
                });
                return false;
            }
            removed = Ok(s.queue.remove(index));
            true
        });
        removed
    }

    /// Drop everything but the current track from the queue.
    pub fn clear_queue(&self) {
        self.update("clear_queue", |s| {
            s.queue = s.current_track.iter().cloned().collect();
            s.current_position_ms = 0;
            true
        });
    }

    /// Progress tick from the audio backend.
    pub fn update_progress(&self, position_ms: u64, duration_ms: u64) {
        self.update("update_progress", |s| {
            s.current_position_ms = position_ms;
            s.duration_ms = duration_ms;
            true
        });
    }
}
