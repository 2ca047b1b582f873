//! cadence: playback state, an in-memory library and a Jamendo catalog
//! client for a streaming music app.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod player;

pub use error::{Error, Result};
