// Configuration loading.
// Reads the TOML config file and merges command-line overrides on top of it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:10824";
pub const DEFAULT_GITHUB_URL: &str = "https://github.com/chat2db/Chat2DB/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the database-client server.
    pub server: String,
    /// Track the active tab through the remembered preference instead of the path.
    pub desktop: bool,
    pub request_timeout_secs: u64,
    pub github_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            desktop: false,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            github_url: DEFAULT_GITHUB_URL.to_string(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, server: Option<String>, desktop: bool) -> Self {
        if let Some(server) = server {
            self.server = server;
        }
        if desktop {
            self.desktop = true;
        }
        self
    }
}

/// Load the config from `explicit`, or from the default location.
/// Missing or malformed files fall back to defaults.
pub fn load(explicit: Option<&Path>) -> Config {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) => path,
            None => return Config::default(),
        },
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("DBDESK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("dbdesk").join("config.toml"));
    }

    directories::ProjectDirs::from("", "", "dbdesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load(Some(&temp_dir.path().join("nope.toml")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "server = \"http://db.internal:9000\"\ndesktop = true\n").unwrap();

        let config = load(Some(&path));
        assert_eq!(config.server, "http://db.internal:9000");
        assert!(config.desktop);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.github_url, DEFAULT_GITHUB_URL);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "server = [").unwrap();
        assert_eq!(load(Some(&path)), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("http://x:1".to_string()), true);
        assert_eq!(config.server, "http://x:1");
        assert!(config.desktop);

        let config = Config::default().with_overrides(None, false);
        assert_eq!(config.server, DEFAULT_SERVER);
        assert!(!config.desktop);
    }

    #[test]
    fn test_timeout_never_zero() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
