//! Record store for tracks
//!
//! The list controller only talks to the [`TrackStore`] trait. The
//! concrete store is SQLite-backed (`sqlite.rs`); tests substitute their own.

mod address;
mod filter;
mod sqlite;

pub use address::StoreAddress;
pub use filter::IdFilter;
pub use sqlite::SqliteTrackStore;

use crate::core::{TrackId, TrackRecord};

/// Errors surfaced by the record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("id filter must contain at least one id")]
    EmptyFilter,
    #[error("recorder is no longer running")]
    RecorderGone,
}

/// Capability set the list controller needs from a record store
pub trait TrackStore {
    /// All tracks with id, name and visibility
    fn query_tracks(&self) -> Result<Vec<TrackRecord>, StoreError>;

    /// Update the visible flag of a single track
    fn update_visible(&self, id: &TrackId, visible: bool) -> Result<(), StoreError>;

    /// Delete every track matched by the filter as one operation.
    /// Returns the number of deleted tracks.
    ///
    /// SQLite caps bound parameters at 32766 per statement, so larger
    /// selections fail with a store error instead of being split.
    fn delete(&self, filter: &IdFilter) -> Result<usize, StoreError>;
}
