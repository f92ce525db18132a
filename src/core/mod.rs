//! Core application types
//!
//! This module contains:
//! - Track records, rows and position fixes
//! - Application-wide settings

mod settings;
mod track;

pub use settings::{AppSettings, CoordinateFormat};
pub use track::{Fix, TrackId, TrackRecord, TrackRow};
