//! Settings
//!
//! Loaded from `settings.json` in the config directory, then overridden by
//! environment variables:
//!
//! - `FOLIO_LOG`: log filter directive (e.g. `folio=debug`)
//! - `FOLIO_DATA_DIR`: where the key/value store lives
//! - `FOLIO_RESUME`: path of the downloadable résumé document
//! - `FOLIO_AI_DELAY_MS`: pause before the tic-tac-toe AI replies

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub use_24h_time: bool,
    pub ai_delay_ms: u64,
    pub resume_document: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_24h_time: false,
            ai_delay_ms: 500,
            resume_document: None,
            data_dir: None,
            log_filter: None,
        }
    }
}

/// Result of [`Settings::load`]. Loading runs before logging is up, so
/// problems are handed back for the caller to report.
#[derive(Debug)]
pub struct Loaded {
    pub settings: Settings,
    pub path: PathBuf,
    pub parse_error: Option<serde_json::Error>,
    pub env_error: Option<ConfigError>,
}

impl Settings {
    /// Settings file plus environment overrides. A rejected override leaves
    /// the file settings untouched.
    pub fn load() -> Loaded {
        let path = crate::storage::config_dir().join(SETTINGS_FILE);
        Self::load_from(path, |var| std::env::var(var).ok())
    }

    pub fn load_from(path: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Loaded {
        let (file_settings, parse_error) = Self::from_file(&path);
        let mut settings = file_settings.clone();
        let env_error = settings.apply_env(lookup).err();
        if env_error.is_some() {
            settings = file_settings;
        }
        Loaded {
            settings,
            path,
            parse_error,
            env_error,
        }
    }

    /// Read `path`, falling back to defaults when it is missing or corrupt.
    /// A corrupt file also returns its parse error.
    pub fn from_file(path: &Path) -> (Self, Option<serde_json::Error>) {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return (Self::default(), None),
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Apply overrides from `lookup` (the process environment in production).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(filter) = lookup("FOLIO_LOG") {
            self.log_filter = Some(filter);
        }
        if let Some(dir) = lookup("FOLIO_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(doc) = lookup("FOLIO_RESUME") {
            self.resume_document = Some(PathBuf::from(doc));
        }
        if let Some(delay) = lookup("FOLIO_AI_DELAY_MS") {
            self.ai_delay_ms = delay.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "FOLIO_AI_DELAY_MS",
                value: delay.clone(),
            })?;
        }
        Ok(())
    }

    /// Directory holding the key/value store.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(crate::storage::data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, error) = Settings::from_file(&dir.path().join(SETTINGS_FILE));
        assert_eq!(settings, Settings::default());
        assert!(error.is_none());
        assert_eq!(settings.ai_delay_ms, 500);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "use_24h_time": true }"#).unwrap();
        let (settings, error) = Settings::from_file(&path);
        assert!(error.is_none());
        assert!(settings.use_24h_time);
        assert_eq!(settings.ai_delay_ms, 500);
    }

    #[test]
    fn test_corrupt_file_gives_defaults_and_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "use_24h_time = yes").unwrap();
        let (settings, error) = Settings::from_file(&path);
        assert_eq!(settings, Settings::default());
        assert!(error.is_some_and(|e| e.is_syntax()));
    }

    #[test]
    fn test_load_reports_both_problems() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let loaded = Settings::load_from(path.clone(), |var| match var {
            "FOLIO_LOG" => Some("debug".into()),
            "FOLIO_AI_DELAY_MS" => Some("later".into()),
            _ => None,
        });
        assert_eq!(loaded.path, path);
        assert!(loaded.parse_error.is_some());
        assert!(matches!(loaded.env_error, Some(ConfigError::InvalidEnv { var: "FOLIO_AI_DELAY_MS", .. })));
        assert_eq!(loaded.settings, Settings::default());
    }

    #[test]
    fn test_load_applies_env_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "use_24h_time": true, "ai_delay_ms": 800 }"#).unwrap();
        let loaded = Settings::load_from(path, |var| (var == "FOLIO_AI_DELAY_MS").then(|| "100".to_string()));
        assert!(loaded.parse_error.is_none() && loaded.env_error.is_none());
        assert!(loaded.settings.use_24h_time);
        assert_eq!(loaded.settings.ai_delay_ms, 100);
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_env(|var| match var {
                "FOLIO_AI_DELAY_MS" => Some("250".into()),
                "FOLIO_DATA_DIR" => Some("/tmp/folio".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(settings.ai_delay_ms, 250);
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/folio"));
        assert_eq!(settings.log_filter, None);
    }

    #[test]
    fn test_invalid_env_is_an_error() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(|var| (var == "FOLIO_AI_DELAY_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("FOLIO_AI_DELAY_MS"));
        assert_eq!(settings.ai_delay_ms, 500);
    }
}
