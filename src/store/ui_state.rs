// Shared UI-state store.
// Holds the remembered main-page tab, persists it, and notifies subscribers of changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::store::{read_json, write_json};

pub const DEFAULT_ACTIVE_TAB: &str = "workspace";

/// Persisted UI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default = "default_active_tab")]
    pub main_page_active_tab: String,
}

fn default_active_tab() -> String {
    DEFAULT_ACTIVE_TAB.to_string()
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            main_page_active_tab: default_active_tab(),
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: UiState,
    path: Option<PathBuf>,
    subscribers: Vec<Sender<String>>,
}

/// Handle to the UI-state store. Clones share the same state.
#[derive(Debug, Clone)]
pub struct UiStateStore {
    inner: Arc<Mutex<Inner>>,
}

impl UiStateStore {
    /// A store that is never written to disk.
    pub fn in_memory(state: UiState) -> Self {
        Self::from_parts(state, None)
    }

    /// Open the store backed by `path`. A missing or unreadable file starts from defaults.
    pub fn open(path: &Path) -> Self {
        let state = match read_json::<UiState>(path) {
            Ok(Some(persisted)) => persisted.data,
            Ok(None) => UiState::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "discarding unreadable UI state");
                UiState::default()
            }
        };
        Self::from_parts(state, Some(path.to_path_buf()))
    }

    fn from_parts(state: UiState, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                path,
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The remembered last-active tab.
    pub fn main_page_active_tab(&self) -> String {
        self.lock().state.main_page_active_tab.clone()
    }

    /// Remember `key` as the last-active tab.
    ///
    /// Subscribers are notified only when the value actually changes. The
    /// in-memory value is updated even if persisting it fails.
    pub fn set_main_page_active_tab(&self, key: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.state.main_page_active_tab == key {
            return Ok(());
        }
        inner.state.main_page_active_tab = key.to_string();
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(key.to_string()).is_ok());

        match &inner.path {
            Some(path) => write_json(path, &inner.state),
            None => Ok(()),
        }
    }

    /// Receive every future change of the remembered tab.
    pub fn subscribe(&self) -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscribers.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_to_workspace() {
        let store = UiStateStore::in_memory(UiState::default());
        assert_eq!(store.main_page_active_tab(), "workspace");
    }

    #[test]
    fn test_persists_across_opens() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ui_state.json");

        let store = UiStateStore::open(&path);
        store.set_main_page_active_tab("dashboard").unwrap();

        let reopened = UiStateStore::open(&path);
        assert_eq!(reopened.main_page_active_tab(), "dashboard");
    }

    #[test]
    fn test_unreadable_file_starts_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ui_state.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = UiStateStore::open(&path);
        assert_eq!(store.main_page_active_tab(), DEFAULT_ACTIVE_TAB);
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let store = UiStateStore::in_memory(UiState::default());
        let rx = store.subscribe();

        store.set_main_page_active_tab("workspace").unwrap();
        assert!(rx.try_recv().is_err());

        store.set_main_page_active_tab("connections").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "connections");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clones_share_state_and_drop_closed_subscribers() {
        let store = UiStateStore::in_memory(UiState::default());
        let other = store.clone();
        drop(store.subscribe());
        let rx = store.subscribe();

        other.set_main_page_active_tab("team").unwrap();
        assert_eq!(store.main_page_active_tab(), "team");
        assert_eq!(rx.try_recv().unwrap(), "team");
        assert_eq!(store.lock().subscribers.len(), 1);
    }
}
