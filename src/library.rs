//! Library module: the user's in-memory collections.
//!
//! Nothing here is persisted; a restart starts from empty lists.

mod model;
mod store;

pub use model::Playlist;
pub use store::{LibraryStore, RECENTLY_PLAYED_LIMIT};

#[cfg(test)]
mod tests;
