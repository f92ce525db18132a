//! Track record types shared by the store, controller and view

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque track identifier
///
/// Ids are assigned by the store (uuid v4 for tracks created locally) and
/// are never interpreted by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub String);

impl TrackId {
    /// Generate a fresh id for a newly created track
    pub fn generate() -> Self {
        TrackId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        TrackId(s.to_string())
    }
}

/// A track as returned by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: TrackId,
    pub name: String,
    pub visible: bool,
}

impl TrackRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, visible: bool) -> Self {
        Self {
            id: TrackId(id.into()),
            name: name.into(),
            visible,
        }
    }
}

/// Per-row state held by the list controller
///
/// The view reads everything it draws from here, nothing is stashed on
/// rendered elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub id: TrackId,
    pub name: String,
    pub visible: bool,
    pub selected: bool,
}

impl TrackRow {
    pub fn from_record(record: TrackRecord, selected: bool) -> Self {
        Self {
            id: record.id,
            name: record.name,
            visible: record.visible,
            selected,
        }
    }
}

/// A single position fix written by the recorder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

impl Fix {
    /// Fix stamped with the current time
    pub fn now(lat: f64, lon: f64, elevation: Option<f64>) -> Self {
        Self {
            lat,
            lon,
            elevation,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
