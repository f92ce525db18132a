//! Test fixtures for track database tests
//!
//! Creates throwaway SQLite databases pre-populated with finished tracks.

#![cfg(test)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::{TrackId, TrackRecord};
use crate::store::SqliteTrackStore;

/// A temporary track database, removed when dropped
pub struct TrackFixture {
    _dir: TempDir,
    db_path: PathBuf,
    pub ids: Vec<TrackId>,
}

impl TrackFixture {
    /// An empty database
    pub fn empty() -> Self {
        Self::with_tracks(&[])
    }

    /// A database holding one closed track per `(name, visible)` pair
    ///
    /// Tracks are started one minute apart in the given order, so queries
    /// return them in that order.
    pub fn with_tracks(tracks: &[(&str, bool)]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("tracks.sqlite");
        let store = SqliteTrackStore::open(&db_path).expect("Failed to open fixture store");

        let base = 1_700_000_000;
        let ids = tracks
            .iter()
            .enumerate()
            .map(|(i, (name, visible))| {
                let id = TrackId::from(format!("fixture-{}", i).as_str());
                let started = base + 60 * i as i64;
                store
                    .insert_track(
                        &TrackRecord::new(id.as_str(), *name, *visible),
                        started,
                        Some(started + 30),
                    )
                    .expect("Failed to insert fixture track");
                id
            })
            .collect();

        Self {
            _dir: dir,
            db_path,
            ids,
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// A fresh connection to the fixture database
    pub fn store(&self) -> SqliteTrackStore {
        SqliteTrackStore::open(&self.db_path).expect("Failed to reopen fixture store")
    }
}
