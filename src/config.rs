use std::path::{Path, PathBuf};
use std::fs;
use log::warn;
use serde::{Deserialize, Serialize};
use crate::error::{DiagError, Result};
use crate::platform::MAX_TIMEOUT_SECS;

/// Settings for probing a single host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Packets sent per host.
    pub count: u32,
    /// Per-packet wait handed to the ping utility.
    pub timeout_secs: u64,
    /// Wall-clock budget for the whole ping invocation.
    pub run_timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            count: 4,
            timeout_secs: 2,
            run_timeout_secs: 10,
        }
    }
}

impl ProbeConfig {
    pub fn get_config_path() -> std::result::Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir()
            .ok_or("Could not find config directory")?
            .join("netdiag");

        fs::create_dir_all(&config_dir)?;
        Ok(config_dir.join("config.json"))
    }

    pub fn load() -> Self {
        match Self::get_config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!("Failed to get config path: {}", e);
                Self::default()
            }
        }
    }

    /// Loads settings from `path`, falling back to defaults when the file is
    /// missing, unreadable or invalid.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let config = fs::read_to_string(path)
            .map_err(|e| warn!("Failed to read config file {}: {}", path.display(), e))
            .ok()
            .and_then(|content| {
                serde_json::from_str::<ProbeConfig>(&content)
                    .map_err(|e| warn!("Failed to parse config {}: {}", path.display(), e))
                    .ok()
            });

        match config {
            Some(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    warn!("Ignoring config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn save(&self) -> std::result::Result<PathBuf, Box<dyn std::error::Error>> {
        let path = Self::get_config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(DiagError::InvalidConfig("count must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(DiagError::InvalidConfig("timeout must be at least 1 second".to_string()));
        }
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(DiagError::InvalidConfig(format!(
                "timeout must be at most {} seconds",
                MAX_TIMEOUT_SECS
            )));
        }
        if self.run_timeout_secs == 0 {
            return Err(DiagError::InvalidConfig("run timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProbeConfig::load_from(&dir.path().join("config.json"));
        assert_eq!(config, ProbeConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = ProbeConfig {
            count: 1,
            timeout_secs: 5,
            run_timeout_secs: 30,
        };
        config.save_to(&path).unwrap();
        assert_eq!(ProbeConfig::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "count": 7 }"#).unwrap();
        let config = ProbeConfig::load_from(&path);
        assert_eq!(config.count, 7);
        assert_eq!(config.timeout_secs, 2);
        assert_eq!(config.run_timeout_secs, 10);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(ProbeConfig::load_from(&path), ProbeConfig::default());
    }

    #[test]
    fn test_zero_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "count": 0 }"#).unwrap();
        assert_eq!(ProbeConfig::load_from(&path), ProbeConfig::default());

        let config = ProbeConfig { run_timeout_secs: 0, ..ProbeConfig::default() };
        assert!(matches!(config.validate(), Err(DiagError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        let config = ProbeConfig { timeout_secs: MAX_TIMEOUT_SECS + 1, ..ProbeConfig::default() };
        assert!(matches!(config.validate(), Err(DiagError::InvalidConfig(_))));

        let config = ProbeConfig { timeout_secs: MAX_TIMEOUT_SECS, ..ProbeConfig::default() };
        assert!(config.validate().is_ok());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, format!(r#"{{ "timeout_secs": {} }}"#, u64::MAX)).unwrap();
        assert_eq!(ProbeConfig::load_from(&path), ProbeConfig::default());
    }
}
