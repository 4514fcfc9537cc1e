use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabfxError};
use crate::header::HeaderMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default = "default_target_currency")]
    pub target_currency: String,
    #[serde(default)]
    pub header_mode: HeaderModeSetting,
    #[serde(default)]
    pub count_empty_cells: bool,
    #[serde(default)]
    pub hide_other_columns: bool,
}

/// Persisted form of the header detection policy. A designated custom row
/// is a per-session choice, so only the heuristic modes are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderModeSetting {
    #[default]
    NumberOfEntries,
    LargestNumberOfEntries,
    FirstRow,
}

fn default_target_currency() -> String {
    "USD".to_string()
}

impl Settings {
    pub fn header_mode(&self) -> HeaderMode {
        match self.header_mode {
            HeaderModeSetting::NumberOfEntries => HeaderMode::NumberOfEntries {
                count_empty_cells: self.count_empty_cells,
            },
            HeaderModeSetting::LargestNumberOfEntries => HeaderMode::LargestNumberOfEntries,
            HeaderModeSetting::FirstRow => HeaderMode::FirstRow,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            target_currency: default_target_currency(),
            header_mode: HeaderModeSetting::default(),
            count_empty_cells: false,
            hide_other_columns: false,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tabfx")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("tabfx")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TabfxError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn rates_db_path() -> PathBuf {
    get_data_dir().join("rates.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            data_dir: "/tmp/test".to_string(),
            target_currency: "EUR".to_string(),
            header_mode: HeaderModeSetting::FirstRow,
            count_empty_cells: true,
            hide_other_columns: true,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let loaded: Settings =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.target_currency, "EUR");
        assert_eq!(loaded.header_mode, HeaderModeSetting::FirstRow);
        assert!(loaded.count_empty_cells);
    }

    #[test]
    fn test_missing_fields_merge_with_defaults() {
        let json = r#"{"data_dir": "/tmp/test"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.target_currency, "USD");
        assert_eq!(s.header_mode, HeaderModeSetting::NumberOfEntries);
        assert!(!s.hide_other_columns);
    }

    #[test]
    fn test_header_mode_resolution() {
        let mut s = Settings::default();
        assert_eq!(
            s.header_mode(),
            HeaderMode::NumberOfEntries {
                count_empty_cells: false
            }
        );
        s.count_empty_cells = true;
        assert_eq!(
            s.header_mode(),
            HeaderMode::NumberOfEntries {
                count_empty_cells: true
            }
        );
        s.header_mode = HeaderModeSetting::LargestNumberOfEntries;
        assert_eq!(s.header_mode(), HeaderMode::LargestNumberOfEntries);
    }
}
