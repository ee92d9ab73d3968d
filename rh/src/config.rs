//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured webhook URL
pub const WEBHOOK_ENV: &str = "REPOHERALD_WEBHOOK_URL";

/// RepoHerald configuration. Every field has a default; CLI flags override
/// config values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Webhook destination; delivery is skipped when unset
    pub webhook_url: Option<String>,

    /// Card display name
    pub username: String,

    /// Card icon URL
    pub icon_url: Option<String>,

    /// Detail level of single-shot notifications (0 brief - 3 all details)
    pub verbosity: u8,

    /// Card cache file enabling aggregation across runs
    pub msg_file: Option<PathBuf>,

    /// Drop any cached card when a summarize run starts
    pub clear_at_start: bool,

    /// Delete the cached card after a successful send
    pub clear_after_send: bool,

    /// Delete the cached card when a summarize run finishes, sent or not
    pub clear_at_finish: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            username: "RepoHerald".to_string(),
            icon_url: None,
            verbosity: 0,
            msg_file: None,
            clear_at_start: false,
            clear_after_send: true,
            clear_at_finish: false,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment
    /// overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;

        if let Ok(url) = std::env::var(WEBHOOK_ENV)
            && !url.is_empty()
        {
            config.webhook_url = Some(url);
        }

        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit config path must load
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .repoherald.yml
        let local_config = PathBuf::from(".repoherald.yml");
        if local_config.exists() {
            return Self::load_from_file(&local_config)
                .context(format!("Failed to load config from {}", local_config.display()));
        }

        // Try user config: ~/.config/repoherald/config.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("repoherald").join("config.yml");
            if user_config.exists() {
                return Self::load_from_file(&user_config)
                    .context(format!("Failed to load config from {}", user_config.display()));
            }
        }

        Ok(Config::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.webhook_url, None);
        assert_eq!(config.username, "RepoHerald");
        assert_eq!(config.verbosity, 0);
        assert!(!config.clear_at_start);
        assert!(config.clear_after_send);
        assert!(!config.clear_at_finish);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(
            &path,
            "webhook_url: https://example.test/hook\nverbosity: 2\n",
        )
        .unwrap();

        let config = Config::load_file(Some(&path)).unwrap();
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://example.test/hook")
        );
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.username, "RepoHerald");
        assert!(config.clear_after_send);
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let path = PathBuf::from("/definitely/not/here.yml");
        assert!(Config::load_file(Some(&path)).is_err());
    }
}
