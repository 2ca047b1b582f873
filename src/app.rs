//! Application module: wires the playback engine and library store together.
//!
//! `App` lives in `app::model` and also carries the flows that touch both
//! services (playing a track records it in the history, for instance).

mod model;

pub use model::*;
