use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::InputError;
use crate::game::generator::DEFAULT_MAX_SEED_ATTEMPTS;
use crate::model::Dimension;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default)]
    pub diagonal: bool,

    #[serde(default = "default_puzzle_path")]
    pub puzzle_path: PathBuf,

    #[serde(default = "default_solution_path")]
    pub solution_path: PathBuf,

    #[serde(default = "default_max_seed_attempts")]
    pub max_seed_attempts: usize,

    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_k() -> usize {
    3
}
fn default_puzzle_path() -> PathBuf {
    PathBuf::from("TestCases/test_case.csv")
}
fn default_solution_path() -> PathBuf {
    PathBuf::from("TestCases/sol_test_case.csv")
}
fn default_max_seed_attempts() -> usize {
    DEFAULT_MAX_SEED_ATTEMPTS
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            k: default_k(),
            diagonal: false,
            puzzle_path: default_puzzle_path(),
            solution_path: default_solution_path(),
            max_seed_attempts: default_max_seed_attempts(),
            report_path: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, falling back to defaults when there is no file or
    /// it cannot be parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Settings::default();
        };
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    settings
                }
                Err(err) => {
                    warn!("Ignoring invalid settings file {}: {}", path.display(), err);
                    Settings::default()
                }
            },
            Err(err) => {
                warn!("Could not read settings file {}: {}", path.display(), err);
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn dimension(&self) -> Result<Dimension, InputError> {
        Dimension::new(self.k)
    }

    pub fn seed_from_env() -> Option<u64> {
        let value = std::env::var("SEED").ok()?;
        match value.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("Ignoring non-numeric SEED={:?}", value);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.k, 3);
        assert!(!settings.diagonal);
        assert_eq!(settings.puzzle_path, PathBuf::from("TestCases/test_case.csv"));
        assert_eq!(settings.max_seed_attempts, DEFAULT_MAX_SEED_ATTEMPTS);
        assert_eq!(settings.dimension().unwrap().k, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"k": 2, "diagonal": true}"#).unwrap();
        assert_eq!(settings.k, 2);
        assert!(settings.diagonal);
        assert_eq!(
            settings.solution_path,
            PathBuf::from("TestCases/sol_test_case.csv")
        );
        assert_eq!(settings.report_path, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            k: 4,
            max_seed_attempts: 50,
            report_path: Some(PathBuf::from("report.json")),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(Some(&path)), settings);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(Settings::load(Some(&missing)), Settings::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(Settings::load(Some(&broken)), Settings::default());

        assert_eq!(Settings::load(None), Settings::default());
    }

    #[test]
    fn test_migrates_version_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.json");
        fs::write(&path, r#"{"version": 0, "k": 2}"#).unwrap();
        let settings = Settings::load(Some(&path));
        assert_eq!(settings.version, 1);
        assert_eq!(settings.k, 2);
    }

    #[test]
    #[serial]
    fn test_seed_from_env() {
        std::env::set_var("SEED", "99");
        assert_eq!(Settings::seed_from_env(), Some(99));
        std::env::set_var("SEED", "abc");
        assert_eq!(Settings::seed_from_env(), None);
        std::env::remove_var("SEED");
        assert_eq!(Settings::seed_from_env(), None);
    }
}
