//! Logical store addresses

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::{AppSettings, TrackId};

/// Table holding the track records
pub const TRACKS_TABLE: &str = "tracks";

/// Logical address of the track table: `content://<authority>/tracks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAddress {
    authority: String,
}

impl StoreAddress {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.authority.clone())
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Address of a single record: `content://<authority>/tracks/<id>`
    pub fn record(&self, id: &TrackId) -> String {
        format!("{}/{}", self, id)
    }

    /// Database file backing this address inside `data_dir`
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        let file_name: String = self
            .authority
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        data_dir.join(format!("{}.sqlite", file_name))
    }
}

impl fmt::Display for StoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content://{}/{}", self.authority, TRACKS_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_address() {
        let address = StoreAddress::new("com.example.maps");
        assert_eq!(address.to_string(), "content://com.example.maps/tracks");
    }

    #[test]
    fn test_record_address_appends_id() {
        let address = StoreAddress::new("com.example.maps");
        assert_eq!(
            address.record(&TrackId::from("42")),
            "content://com.example.maps/tracks/42"
        );
    }

    #[test]
    fn test_from_settings_uses_authority() {
        let settings = AppSettings {
            authority: "org.test".to_string(),
            ..Default::default()
        };
        assert_eq!(StoreAddress::from_settings(&settings).authority(), "org.test");
    }

    #[test]
    fn test_database_path_sanitizes_authority() {
        let address = StoreAddress::new("org.test/evil name");
        let path = address.database_path(Path::new("/data"));
        assert_eq!(path, PathBuf::from("/data/org.test_evil_name.sqlite"));
    }
}
