// Preference Store
//
// Reads the JSON preference file the UI writes. The native side never
// writes preferences; it only reads them at trigger time.
//

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::PathBuf;

pub const DEFAULT_ALARM_HOUR: u32 = 9;
pub const DEFAULT_ALARM_MINUTE: u32 = 0;

/// Preference keys shared with the UI layer
#[derive(Debug, Serialize, Deserialize)]
pub struct Preferences {
    /// Day 0 of the 30-message rotation, ISO-like timestamp string
    #[serde(default)]
    pub notification_start_date: Option<String>,
    #[serde(default = "default_hour")]
    pub notification_hour: u32,
    #[serde(default)]
    pub notification_minute: u32,
    #[serde(flatten)]
    pub other: Value, // Preserve UI-owned settings we don't model
}

fn default_hour() -> u32 {
    DEFAULT_ALARM_HOUR
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notification_start_date: None,
            notification_hour: DEFAULT_ALARM_HOUR,
            notification_minute: DEFAULT_ALARM_MINUTE,
            other: json!({}),
        }
    }
}

/// Handle to the preference file
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at the default location under the user's home directory
    pub fn open_default() -> Self {
        Self {
            path: default_prefs_path(),
        }
    }

    /// Store at an explicit path (tests)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read preferences; a missing file yields defaults
    pub fn load(&self) -> io::Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }

        let contents = fs::read_to_string(&self.path)?;

        let prefs: Preferences = serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(prefs)
    }

    /// Configured daily fire time, falling back to 9:00 on any read error
    pub fn alarm_time(&self) -> (u32, u32) {
        match self.load() {
            Ok(prefs) => (prefs.notification_hour, prefs.notification_minute),
            Err(e) => {
                eprintln!("[Prefs] Failed to read preferences, using 9:00 default: {}", e);
                (DEFAULT_ALARM_HOUR, DEFAULT_ALARM_MINUTE)
            }
        }
    }

    /// Stored rotation start date, if any
    pub fn start_date(&self) -> Option<String> {
        match self.load() {
            Ok(prefs) => prefs.notification_start_date,
            Err(e) => {
                eprintln!("[Prefs] Failed to read preferences, no start date: {}", e);
                None
            }
        }
    }
}

/// Get the default preference file path
pub fn default_prefs_path() -> PathBuf {
    dirs::home_dir()
        .expect("Failed to get home directory")
        .join(".daily-messages")
        .join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferenceStore::with_path(temp_dir.path().join("preferences.json"));

        let prefs = store.load().unwrap();
        assert_eq!(prefs.notification_start_date, None);
        assert_eq!(prefs.notification_hour, 9);
        assert_eq!(prefs.notification_minute, 0);
        assert_eq!(store.alarm_time(), (9, 0));
    }

    #[test]
    fn test_reads_configured_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(
            &path,
            r#"{"notification_start_date":"2026-01-15T08:00:00","notification_hour":7,"notification_minute":30}"#,
        )
        .unwrap();

        let store = PreferenceStore::with_path(path);
        assert_eq!(store.alarm_time(), (7, 30));
        assert_eq!(store.start_date().as_deref(), Some("2026-01-15T08:00:00"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, r#"{"notification_minute":45}"#).unwrap();

        let store = PreferenceStore::with_path(path);
        assert_eq!(store.alarm_time(), (9, 45));
        assert_eq!(store.start_date(), None);
    }

    #[test]
    fn test_unknown_keys_are_preserved_in_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(
            &path,
            r#"{"notification_hour":6,"theme":"dark","font_scale":1.2}"#,
        )
        .unwrap();

        let store = PreferenceStore::with_path(path);
        let prefs = store.load().unwrap();
        assert_eq!(prefs.notification_hour, 6);
        assert_eq!(prefs.other.get("theme").and_then(Value::as_str), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, "not json at all").unwrap();

        let store = PreferenceStore::with_path(path);
        assert!(store.load().is_err());
        assert_eq!(store.alarm_time(), (9, 0));
        assert_eq!(store.start_date(), None);
    }
}
