//! Playback module: the queue/transport state machine.
//!
//! [`PlaybackEngine`] owns a [`PlaybackState`] snapshot and republishes it in
//! full after every change. Position only moves when the audio backend calls
//! `update_progress`; nothing in here runs timers.

mod engine;
mod queue;
mod state;

pub use engine::PlaybackEngine;
pub use state::*;
