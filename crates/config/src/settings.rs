// Application settings
// Loaded from ~/.config/activos/settings.json

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use activos_import::DuplicateHeaderPolicy;

/// Written on first run; every key at its default.
const DEFAULT_CONFIG: &str = r#"{
    // SQLite database file (null = platform data directory)
    "store.path": null,

    // Which column wins when a header appears twice: "last" or "first"
    "import.duplicateHeaders": "last",

    // Worksheet to import (null = first sheet)
    "import.sheet": null,

    // error, warn, info, debug, trace (RUST_LOG overrides)
    "log.level": "warn"
}
"#;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Store
    #[serde(rename = "store.path")]
    pub store_path: Option<PathBuf>, // None = platform data dir

    // Import
    #[serde(rename = "import.duplicateHeaders")]
    pub duplicate_headers: DuplicateHeaderPolicy,

    #[serde(rename = "import.sheet")]
    pub import_sheet: Option<String>, // None = first worksheet

    // Logging
    #[serde(rename = "log.level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            duplicate_headers: DuplicateHeaderPolicy::LastWins,
            import_sheet: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("activos");
        config_dir.join("settings.json")
    }

    /// Default database location when neither flag, env nor settings name one
    pub fn default_db_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("activos")
            .join("activos.db")
    }

    pub fn db_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(Self::default_db_path)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file();
            return settings;
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                // Logger is not up yet; settings pick its level
                eprintln!("Error loading {}: {}", path.display(), e);
                eprintln!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a specific file. Lines starting with `//` are comments.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self) {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(&path, DEFAULT_CONFIG) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commented_file() {
        let s = Settings::parse(
            r#"{
    // database
    "store.path": "/srv/activos.db",
    "import.duplicateHeaders": "first",
    "log.level": "debug"
}"#,
        )
        .unwrap();

        assert_eq!(s.store_path, Some(PathBuf::from("/srv/activos.db")));
        assert_eq!(s.duplicate_headers, DuplicateHeaderPolicy::FirstWins);
        assert_eq!(s.import_sheet, None);
        assert_eq!(s.log_level, "debug");
        assert_eq!(s.db_path(), PathBuf::from("/srv/activos.db"));
    }

    #[test]
    fn missing_keys_take_defaults() {
        let s = Settings::parse("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert!(s.db_path().ends_with("activos/activos.db"));
    }

    #[test]
    fn shipped_default_file_parses_to_defaults() {
        assert_eq!(Settings::parse(DEFAULT_CONFIG).unwrap(), Settings::default());
    }

    #[test]
    fn invalid_policy_is_an_error() {
        assert!(Settings::parse(r#"{"import.duplicateHeaders": "middle"}"#).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"import.sheet": "Inventario"}"#).unwrap();

        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.import_sheet.as_deref(), Some("Inventario"));
    }
}
