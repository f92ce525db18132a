//! SQLite-backed track store

use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::path::Path;

use super::{IdFilter, StoreError, TrackStore};
use crate::core::{Fix, TrackId, TrackRecord};

const DB_SCHEMA: &str = r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS tracks (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        visible INTEGER NOT NULL DEFAULT 1,
        started_at INTEGER NOT NULL,
        ended_at INTEGER
    );

    CREATE TABLE IF NOT EXISTS track_points (
        track_id TEXT NOT NULL,
        lat REAL NOT NULL,
        lon REAL NOT NULL,
        elevation REAL,
        timestamp INTEGER NOT NULL,
        FOREIGN KEY(track_id) REFERENCES tracks(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_track_points_track ON track_points(track_id);
"#;

pub struct SqliteTrackStore {
    conn: Connection,
}

impl SqliteTrackStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(DB_SCHEMA)?;
        Ok(Self { conn })
    }

    /// Create a new, unclosed track and return its id
    pub fn create_track(&self, name: &str) -> Result<TrackId, StoreError> {
        let id = TrackId::generate();
        self.conn.execute(
            "INSERT INTO tracks (id, name, visible, started_at, ended_at) VALUES (?1, ?2, 1, ?3, NULL)",
            params![id.as_str(), name, chrono::Utc::now().timestamp()],
        )?;
        Ok(id)
    }

    /// Insert a track with a known id (imports and fixtures)
    pub fn insert_track(
        &self,
        record: &TrackRecord,
        started_at: i64,
        ended_at: Option<i64>,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO tracks (id, name, visible, started_at, ended_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name=excluded.name,
                visible=excluded.visible,
                started_at=excluded.started_at,
                ended_at=excluded.ended_at",
            params![
                record.id.as_str(),
                record.name,
                record.visible,
                started_at,
                ended_at
            ],
        )?;
        Ok(())
    }

    pub fn append_fix(&self, id: &TrackId, fix: &Fix) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO track_points (track_id, lat, lon, elevation, timestamp) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id.as_str(), fix.lat, fix.lon, fix.elevation, fix.timestamp],
        )?;
        Ok(())
    }

    /// Mark a track as finished. Closing an already closed track is a no-op.
    pub fn close_track(&self, id: &TrackId) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE tracks SET ended_at = ?1 WHERE id = ?2 AND ended_at IS NULL",
            params![chrono::Utc::now().timestamp(), id.as_str()],
        )?;
        Ok(())
    }

    pub fn point_count(&self, id: &TrackId) -> Result<i64, StoreError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM track_points WHERE track_id = ?1",
            params![id.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn is_closed(&self, id: &TrackId) -> Result<Option<bool>, StoreError> {
        let ended: Option<Option<i64>> = self
            .conn
            .query_row(
                "SELECT ended_at FROM tracks WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ended.map(|e| e.is_some()))
    }

    /// Close tracks left open by a recorder that never stopped (crash, kill)
    pub fn close_stale_tracks(&self) -> Result<usize, StoreError> {
        let closed = self.conn.execute(
            "UPDATE tracks SET ended_at = ?1 WHERE ended_at IS NULL",
            params![chrono::Utc::now().timestamp()],
        )?;
        if closed > 0 {
            log::warn!("Closed {} track(s) left open by a previous session", closed);
        }
        Ok(closed)
    }
}

impl TrackStore for SqliteTrackStore {
    fn query_tracks(&self) -> Result<Vec<TrackRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, visible FROM tracks ORDER BY started_at ASC, name ASC")?;

        let tracks = stmt
            .query_map([], |row| {
                Ok(TrackRecord {
                    id: TrackId(row.get(0)?),
                    name: row.get(1)?,
                    visible: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;
        Ok(tracks)
    }

    fn update_visible(&self, id: &TrackId, visible: bool) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE tracks SET visible = ?1 WHERE id = ?2",
            params![visible, id.as_str()],
        )?;
        Ok(())
    }

    fn delete(&self, filter: &IdFilter) -> Result<usize, StoreError> {
        let sql = format!("DELETE FROM tracks WHERE {}", filter.selection());
        let deleted = self.conn.execute(&sql, params_from_iter(filter.args().iter()))?;
        Ok(deleted)
    }
}
