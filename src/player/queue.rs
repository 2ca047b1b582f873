//! Helpers to navigate and reorder the playback queue.
//!
//! Indices are resolved against the queue as it is at call time; the queue
//! may hold the same track more than once, in which case the first match
//! wins.

use rand::seq::SliceRandom;

use crate::catalog::Track;

use super::state::RepeatMode;

/// Index to move to on "next", or `None` when playback should hold.
///
/// With no current position (nothing loaded, or the current track is not in
/// the queue) the first element is next.
pub(crate) fn next_index(len: usize, current: Option<usize>, repeat: RepeatMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(0),
        Some(i) if i + 1 < len => Some(i + 1),
        Some(_) if repeat == RepeatMode::All => Some(0),
        Some(_) => None,
    }
}

/// Index to move to on "previous", or `None` when playback should hold.
pub(crate) fn previous_index(
    len: usize,
    current: Option<usize>,
    repeat: RepeatMode,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(i) if i > 0 => Some(i - 1),
        _ if repeat == RepeatMode::All => Some(len - 1),
        _ => None,
    }
}

pub(crate) fn shuffle_in_place(queue: &mut [Track]) {
    queue.shuffle(&mut rand::rng());
}

/// Leaving shuffle does not restore the pre-shuffle order (it is never
/// kept); the queue is sorted by track name instead. The sort is stable so
/// equal names keep their relative order.
pub(crate) fn unshuffle_in_place(queue: &mut [Track]) {
    queue.sort_by(|a, b| a.name.cmp(&b.name));
}
