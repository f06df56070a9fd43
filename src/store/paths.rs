// Filesystem locations for persisted shell data.
// Everything lives under the platform cache directory (~/.cache/dbdesk on Linux).

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory.
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dbdesk").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the persisted UI state (remembered tab).
pub fn ui_state_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("ui_state.json"))
}

/// Path to the diagnostic log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("dbdesk.log"))
}
