//! Application settings
//!
//! Persisted to `<data dir>/Track Manager/app_settings.json`. Preference
//! fields are stored under their historical preference keys so settings
//! files written by older builds keep loading.

use gpui::Global;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-user application directory
pub const APP_DIR_NAME: &str = "Track Manager";

/// Authority used when no settings file exists
pub const DEFAULT_AUTHORITY: &str = "org.trackmanager.provider";

/// How coordinates are formatted in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateFormat {
    #[default]
    Degrees,
    DegreesMinutes,
    DegreesMinutesSeconds,
}

impl CoordinateFormat {
    /// Format a single coordinate value
    pub fn format(&self, value: f64) -> String {
        let abs = value.abs();
        let sign = if value < 0.0 { "-" } else { "" };
        match self {
            CoordinateFormat::Degrees => format!("{:.6}°", value),
            CoordinateFormat::DegreesMinutes => {
                let deg = abs.trunc();
                let min = (abs - deg) * 60.0;
                format!("{}{}° {:.4}'", sign, deg, min)
            }
            CoordinateFormat::DegreesMinutesSeconds => {
                let deg = abs.trunc();
                let min_full = (abs - deg) * 60.0;
                let min = min_full.trunc();
                let sec = (min_full - min) * 60.0;
                format!("{}{}° {}' {:.2}\"", sign, deg, min, sec)
            }
        }
    }
}

/// Application-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Authority part of the record store address (`content://<authority>/tracks`)
    #[serde(default = "default_authority")]
    pub authority: String,
    #[serde(rename = "keep_screen_on", default)]
    pub keep_screen_on: bool,
    #[serde(rename = "coordinates_format", default)]
    pub coordinates_format: CoordinateFormat,
    #[serde(rename = "sync_periodically", default)]
    pub sync_periodically: bool,
    /// Human readable sync period (e.g. "1 hour")
    #[serde(rename = "sync_period", default)]
    pub sync_period: String,
    #[serde(rename = "sync_period_sec_long", default = "default_sync_period_secs")]
    pub sync_period_secs: u64,
    #[serde(rename = "show_status_panel", default = "default_true")]
    pub show_status_panel: bool,
    #[serde(rename = "show_current_location", default)]
    pub show_current_location: bool,
    /// NMEA position source used while recording (serial device or file)
    #[serde(default)]
    pub gps_device: Option<String>,
}

fn default_authority() -> String {
    DEFAULT_AUTHORITY.to_string()
}

fn default_sync_period_secs() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            authority: default_authority(),
            keep_screen_on: false,
            coordinates_format: CoordinateFormat::default(),
            sync_periodically: false,
            sync_period: String::new(),
            sync_period_secs: default_sync_period_secs(),
            show_status_panel: true,
            show_current_location: false,
            gps_device: None,
        }
    }
}

impl Global for AppSettings {}

impl AppSettings {
    const SETTINGS_FILE: &'static str = "app_settings.json";

    /// Get the app data directory, creating it if needed
    pub fn app_data_dir() -> Result<PathBuf, String> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| "Could not determine data directory".to_string())?;

        let app_dir = data_dir.join(APP_DIR_NAME);

        if !app_dir.exists() {
            std::fs::create_dir_all(&app_dir)
                .map_err(|e| format!("Failed to create app data directory: {}", e))?;
        }

        Ok(app_dir)
    }

    /// Load app settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let result = Self::app_data_dir().and_then(|dir| Self::load_from(&dir));
        match result {
            Ok(settings) => {
                log::debug!("Loaded app settings from disk");
                settings
            }
            Err(e) => {
                log::debug!("Using default app settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific directory
    pub fn load_from(dir: &Path) -> Result<Self, String> {
        let settings_path = dir.join(Self::SETTINGS_FILE);

        if !settings_path.exists() {
            return Err("Settings file not found".to_string());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| format!("Failed to read settings: {}", e))?;

        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    /// Save app settings to the app data directory
    pub fn save(&self) -> Result<(), String> {
        let app_dir = Self::app_data_dir()?;
        self.save_to(&app_dir)
    }

    /// Save settings into a specific directory
    pub fn save_to(&self, dir: &Path) -> Result<(), String> {
        let settings_path = dir.join(Self::SETTINGS_FILE);

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&settings_path, json)
            .map_err(|e| format!("Failed to write settings: {}", e))?;

        log::debug!("Saved app settings to {:?}", settings_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.authority, DEFAULT_AUTHORITY);
        assert!(settings.show_status_panel);
        assert_eq!(settings.sync_period_secs, 3600);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            authority: "com.example.tracks".to_string(),
            keep_screen_on: true,
            coordinates_format: CoordinateFormat::DegreesMinutes,
            show_status_panel: false,
            ..Default::default()
        };

        settings.save_to(dir.path()).unwrap();
        let loaded = AppSettings::load_from(dir.path()).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_uses_preference_keys() {
        let json = serde_json::to_value(AppSettings::default()).unwrap();
        for key in [
            "keep_screen_on",
            "coordinates_format",
            "sync_periodically",
            "sync_period",
            "sync_period_sec_long",
            "show_status_panel",
            "show_current_location",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"keep_screen_on": true}"#).unwrap();
        assert!(settings.keep_screen_on);
        assert_eq!(settings.authority, DEFAULT_AUTHORITY);
        assert!(settings.show_status_panel);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppSettings::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_coordinate_formats() {
        assert_eq!(CoordinateFormat::Degrees.format(55.5), "55.500000°");
        assert_eq!(CoordinateFormat::DegreesMinutes.format(55.5), "55° 30.0000'");
        assert_eq!(
            CoordinateFormat::DegreesMinutesSeconds.format(-37.5125),
            "-37° 30' 45.00\""
        );
    }
}
