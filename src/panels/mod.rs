// Content panels.
// Each content tab owns a panel that is built on first activation and kept while hidden.

mod connections;
mod dashboard;
mod team;
mod workspace;

use std::collections::HashMap;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::api::{Connection, Environment, LoginUser};
use crate::state::{LoadingState, NavItem, PanelKind};

pub use connections::ConnectionsPanel;
pub use dashboard::DashboardPanel;
pub use team::TeamPanel;
pub use workspace::WorkspacePanel;

/// Shared data panels read at draw and input time.
#[derive(Clone, Copy)]
pub struct PanelContext<'a> {
    pub connections: &'a LoadingState<Vec<Connection>>,
    pub environments: &'a LoadingState<Vec<Environment>>,
    pub user: Option<&'a LoginUser>,
}

impl PanelContext<'_> {
    fn environment(&self, environment_id: Option<i64>) -> Option<&Environment> {
        let id = environment_id?;
        self.environments.data()?.iter().find(|env| env.id == id)
    }

    /// Display name of a connection's environment.
    pub fn environment_name(&self, environment_id: Option<i64>) -> Option<&str> {
        self.environment(environment_id)
            .map(|env| env.short_name.as_deref().unwrap_or(&env.name))
    }

    /// Terminal color for an environment's server-side color name, e.g. `RED`.
    pub fn environment_color(&self, environment_id: Option<i64>) -> Option<Color> {
        self.environment(environment_id)?
            .color
            .as_deref()?
            .to_ascii_lowercase()
            .parse()
            .ok()
    }
}

/// A tab's content.
pub trait Panel {
    fn kind(&self) -> PanelKind;

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext);

    /// Returns true if the key was consumed.
    fn handle_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> bool;
}

/// Build a fresh panel.
pub fn build(kind: PanelKind) -> Box<dyn Panel> {
    match kind {
        PanelKind::Workspace => Box::new(WorkspacePanel::new()),
        PanelKind::Dashboard => Box::new(DashboardPanel::new()),
        PanelKind::Connections => Box::new(ConnectionsPanel::new()),
        PanelKind::Team => Box::new(TeamPanel::new()),
    }
}

/// Move a list selection one step, staying within `len` items.
pub(crate) fn step_selection(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1).min(len - 1),
        (Some(i), false) => i.saturating_sub(1),
    })
}

/// Owns the mounted panels, keyed by tab.
#[derive(Default)]
pub struct PanelHost {
    mounted: HashMap<&'static str, Box<dyn Panel>>,
    builds: HashMap<&'static str, usize>,
}

impl PanelHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build panels for newly loaded tabs and drop panels of tabs that disappeared.
    pub fn sync(&mut self, items: &[NavItem]) {
        self.mounted
            .retain(|key, _| items.iter().any(|item| item.key == *key));

        for item in items.iter().filter(|item| item.is_load) {
            let Some(kind) = item.panel else { continue };
            if self.mounted.contains_key(item.key) {
                continue;
            }
            let panel = build(kind);
            tracing::debug!(tab = item.key, kind = ?panel.kind(), "mounting panel");
            self.mounted.insert(item.key, panel);
            *self.builds.entry(item.key).or_default() += 1;
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Box<dyn Panel>> {
        self.mounted.get_mut(key)
    }

    pub fn is_mounted(&self, key: &str) -> bool {
        self.mounted.contains_key(key)
    }

    /// How many times the panel for `key` has been built.
    pub fn build_count(&self, key: &str) -> usize {
        self.builds.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::nav::{DASHBOARD, GITHUB, TEAM, WORKSPACE, compute_visible_tabs};
    use crate::state::base_nav_items;

    #[test]
    fn test_sync_builds_loaded_panels_once() {
        let mut items = base_nav_items("https://example.com");
        let mut host = PanelHost::new();

        host.sync(&items);
        assert!(!host.is_mounted(WORKSPACE));

        items[0].is_load = true;
        host.sync(&items);
        host.sync(&items);
        assert!(host.is_mounted(WORKSPACE));
        assert_eq!(host.build_count(WORKSPACE), 1);
        assert_eq!(host.get_mut(WORKSPACE).unwrap().kind(), PanelKind::Workspace);
        assert!(!host.is_mounted(DASHBOARD));
    }

    #[test]
    fn test_external_entries_never_mount() {
        let mut items = base_nav_items("https://example.com");
        items[3].is_load = true;
        let mut host = PanelHost::new();
        host.sync(&items);
        assert!(!host.is_mounted(GITHUB));
    }

    #[test]
    fn test_removed_tabs_are_dropped() {
        let items = compute_visible_tabs(&base_nav_items("https://example.com"), true, TEAM);
        let mut host = PanelHost::new();
        host.sync(&items);
        assert!(host.is_mounted(TEAM));

        let items = compute_visible_tabs(&items, false, TEAM);
        host.sync(&items);
        assert!(!host.is_mounted(TEAM));
    }

    #[test]
    fn test_step_selection() {
        assert_eq!(step_selection(None, 0, true), None);
        assert_eq!(step_selection(None, 3, false), Some(0));
        assert_eq!(step_selection(Some(1), 3, true), Some(2));
        assert_eq!(step_selection(Some(2), 3, true), Some(2));
        assert_eq!(step_selection(Some(0), 3, false), Some(0));
    }

    #[test]
    fn test_environment_name_prefers_short_name() {
        let environments = LoadingState::Loaded(vec![
            Environment {
                id: 1,
                name: "Release".to_string(),
                short_name: Some("RELEASE".to_string()),
                color: None,
            },
            Environment {
                id: 2,
                name: "Test".to_string(),
                short_name: None,
                color: None,
            },
        ]);
        let connections = LoadingState::Idle;
        let ctx = PanelContext {
            connections: &connections,
            environments: &environments,
            user: None,
        };
        assert_eq!(ctx.environment_name(Some(1)), Some("RELEASE"));
        assert_eq!(ctx.environment_name(Some(2)), Some("Test"));
        assert_eq!(ctx.environment_name(Some(3)), None);
        assert_eq!(ctx.environment_name(None), None);
    }

    #[test]
    fn test_environment_color() {
        let environments = LoadingState::Loaded(vec![
            Environment {
                id: 1,
                name: "Release".to_string(),
                short_name: None,
                color: Some("RED".to_string()),
            },
            Environment {
                id: 2,
                name: "Test".to_string(),
                short_name: None,
                color: Some("not-a-color".to_string()),
            },
        ]);
        let connections = LoadingState::Idle;
        let ctx = PanelContext {
            connections: &connections,
            environments: &environments,
            user: None,
        };
        assert_eq!(ctx.environment_color(Some(1)), Some(Color::Red));
        assert_eq!(ctx.environment_color(Some(2)), None);
        assert_eq!(ctx.environment_color(Some(3)), None);
    }
}
