// Tab switcher.
// Reducer over the visible tab list and the active tab key.

use super::nav::{NavItem, compute_visible_tabs};

/// How the active tab is tracked across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    /// Remembered preference only; no visible path.
    Desktop,
    /// The first path segment names the tab and is rewritten on every switch.
    Addressable,
}

/// Inputs to the tab switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// The user picked a content tab.
    Activate(String),
    /// The user picked an external-link entry.
    OpenExternal(String),
    /// The remembered tab changed outside the shell.
    PreferenceChanged(String),
    /// The session resolved; `admin` decides whether the team tab is shown.
    RoleResolved { admin: bool },
}

/// Side effects the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    PersistActiveTab(String),
    ReplacePath(String),
    OpenBrowser(String),
}

/// Render-facing view of one content panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSlot {
    pub key: &'static str,
    pub visible: bool,
    pub mounted: bool,
}

/// Pick the initial active key.
///
/// Desktop mode uses the remembered tab. Addressable mode uses the first path
/// segment and falls back to the remembered tab when there is none.
pub fn resolve_initial_key(mode: NavMode, remembered: &str, path_segment: Option<&str>) -> String {
    match (mode, path_segment) {
        (NavMode::Addressable, Some(segment)) if !segment.is_empty() => segment.to_string(),
        _ => remembered.to_string(),
    }
}

/// Visible tabs and the active key.
#[derive(Debug, Clone)]
pub struct NavState {
    items: Vec<NavItem>,
    active: String,
    mode: NavMode,
}

impl NavState {
    pub fn new(items: Vec<NavItem>, mode: NavMode, active: String) -> Self {
        Self {
            items,
            active,
            mode,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn mode(&self) -> NavMode {
        self.mode
    }

    pub fn item(&self, key: &str) -> Option<&NavItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// The item whose panel is on screen, if the active key names one.
    pub fn active_item(&self) -> Option<&NavItem> {
        self.item(&self.active).filter(|item| !item.is_external())
    }

    /// Enter the initial tab. The remembered tab is not rewritten.
    pub fn mount(&mut self) -> Vec<NavEffect> {
        let key = self.active.clone();
        self.enter(&key)
    }

    /// Apply an action and return the effects to carry out.
    pub fn dispatch(&mut self, action: NavAction) -> Vec<NavEffect> {
        match action {
            NavAction::Activate(key) => {
                if !self.can_activate(&key) {
                    return Vec::new();
                }
                self.active = key.clone();
                let mut effects = vec![NavEffect::PersistActiveTab(key.clone())];
                effects.extend(self.enter(&key));
                effects
            }
            NavAction::PreferenceChanged(key) => {
                if !self.can_activate(&key) {
                    return Vec::new();
                }
                self.active = key.clone();
                self.enter(&key)
            }
            NavAction::OpenExternal(key) => self
                .item(&key)
                .and_then(|item| item.open_browser.clone())
                .map(|url| vec![NavEffect::OpenBrowser(url)])
                .unwrap_or_default(),
            NavAction::RoleResolved { admin } => {
                self.items = compute_visible_tabs(&self.items, admin, &self.active);
                Vec::new()
            }
        }
    }

    /// One slot per content tab: visible only when active, mounted once loaded.
    pub fn panel_slots(&self) -> Vec<PanelSlot> {
        self.items
            .iter()
            .filter(|item| item.panel.is_some())
            .map(|item| PanelSlot {
                key: item.key,
                visible: item.key == self.active,
                mounted: item.is_load,
            })
            .collect()
    }

    /// Known, non-external, and not already active.
    fn can_activate(&self, key: &str) -> bool {
        key != self.active && self.item(key).is_some_and(|item| !item.is_external())
    }

    /// Mark the tab loaded and, when addressable, rewrite the path.
    fn enter(&mut self, key: &str) -> Vec<NavEffect> {
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.key == key && !item.is_external())
        else {
            return Vec::new();
        };
        item.is_load = true;

        match self.mode {
            NavMode::Addressable => vec![NavEffect::ReplacePath(format!("/{}", key))],
            NavMode::Desktop => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::nav::{
        CONNECTIONS, DASHBOARD, GITHUB, TEAM, WORKSPACE, base_nav_items,
    };

    const URL: &str = "https://example.com/repo";

    fn state(mode: NavMode, active: &str) -> NavState {
        let mut nav = NavState::new(base_nav_items(URL), mode, active.to_string());
        nav.mount();
        nav
    }

    fn loaded(nav: &NavState, key: &str) -> bool {
        nav.item(key).is_some_and(|item| item.is_load)
    }

    #[test]
    fn test_resolve_initial_key() {
        assert_eq!(
            resolve_initial_key(NavMode::Desktop, DASHBOARD, Some(CONNECTIONS)),
            DASHBOARD
        );
        assert_eq!(
            resolve_initial_key(NavMode::Addressable, DASHBOARD, Some(CONNECTIONS)),
            CONNECTIONS
        );
        assert_eq!(
            resolve_initial_key(NavMode::Addressable, DASHBOARD, None),
            DASHBOARD
        );
        assert_eq!(
            resolve_initial_key(NavMode::Addressable, DASHBOARD, Some("")),
            DASHBOARD
        );
    }

    #[test]
    fn test_mount_loads_initial_tab() {
        let mut nav = NavState::new(base_nav_items(URL), NavMode::Addressable, WORKSPACE.into());
        let effects = nav.mount();
        assert_eq!(effects, vec![NavEffect::ReplacePath("/workspace".into())]);
        assert!(loaded(&nav, WORKSPACE));
        assert!(!loaded(&nav, DASHBOARD));
    }

    #[test]
    fn test_activate_effects() {
        let mut nav = state(NavMode::Addressable, WORKSPACE);
        let effects = nav.dispatch(NavAction::Activate(CONNECTIONS.into()));
        assert_eq!(
            effects,
            vec![
                NavEffect::PersistActiveTab(CONNECTIONS.into()),
                NavEffect::ReplacePath("/connections".into()),
            ]
        );
        assert_eq!(nav.active(), CONNECTIONS);

        let mut nav = state(NavMode::Desktop, WORKSPACE);
        let effects = nav.dispatch(NavAction::Activate(CONNECTIONS.into()));
        assert_eq!(effects, vec![NavEffect::PersistActiveTab(CONNECTIONS.into())]);
    }

    #[test]
    fn test_external_entry_never_becomes_active() {
        let mut nav = state(NavMode::Addressable, DASHBOARD);

        assert!(nav.dispatch(NavAction::Activate(GITHUB.into())).is_empty());
        assert!(nav.dispatch(NavAction::PreferenceChanged(GITHUB.into())).is_empty());
        assert_eq!(nav.active(), DASHBOARD);

        let effects = nav.dispatch(NavAction::OpenExternal(GITHUB.into()));
        assert_eq!(effects, vec![NavEffect::OpenBrowser(URL.into())]);
        assert_eq!(nav.active(), DASHBOARD);
        assert!(!loaded(&nav, GITHUB));
    }

    #[test]
    fn test_open_external_on_content_tab_is_noop() {
        let mut nav = state(NavMode::Desktop, WORKSPACE);
        assert!(nav.dispatch(NavAction::OpenExternal(DASHBOARD.into())).is_empty());
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut nav = state(NavMode::Addressable, WORKSPACE);
        assert!(nav.dispatch(NavAction::Activate("reports".into())).is_empty());
        assert_eq!(nav.active(), WORKSPACE);
    }

    #[test]
    fn test_unknown_initial_key_shows_nothing() {
        let mut nav = NavState::new(base_nav_items(URL), NavMode::Addressable, "reports".into());
        assert!(nav.mount().is_empty());
        assert!(nav.active_item().is_none());
        assert!(nav.panel_slots().iter().all(|slot| !slot.visible && !slot.mounted));
    }

    #[test]
    fn test_active_key_only_takes_activated_content_keys() {
        let mut nav = state(NavMode::Desktop, WORKSPACE);
        let clicks = [DASHBOARD, GITHUB, "nope", CONNECTIONS, GITHUB, WORKSPACE, GITHUB];
        let mut expected = WORKSPACE;
        for key in clicks {
            nav.dispatch(NavAction::Activate(key.into()));
            if key != GITHUB && key != "nope" {
                expected = key;
            }
            assert_eq!(nav.active(), expected);
        }
    }

    #[test]
    fn test_lazy_mount_happens_once() {
        let mut nav = state(NavMode::Desktop, WORKSPACE);
        let mut dashboard_loads = 0;
        let mut dashboard_visibility = Vec::new();

        for key in [DASHBOARD, WORKSPACE, DASHBOARD] {
            let was_loaded = loaded(&nav, DASHBOARD);
            nav.dispatch(NavAction::Activate(key.into()));
            if !was_loaded && loaded(&nav, DASHBOARD) {
                dashboard_loads += 1;
            }
            let slot = nav
                .panel_slots()
                .into_iter()
                .find(|slot| slot.key == DASHBOARD)
                .unwrap();
            assert!(slot.mounted);
            dashboard_visibility.push(slot.visible);
        }

        assert_eq!(dashboard_loads, 1);
        assert_eq!(dashboard_visibility, vec![true, false, true]);
    }

    #[test]
    fn test_is_load_is_monotonic() {
        let mut nav = state(NavMode::Addressable, WORKSPACE);
        for key in [DASHBOARD, CONNECTIONS, WORKSPACE, GITHUB, DASHBOARD] {
            nav.dispatch(NavAction::Activate(key.into()));
        }
        nav.dispatch(NavAction::RoleResolved { admin: true });
        nav.dispatch(NavAction::RoleResolved { admin: true });
        for key in [WORKSPACE, DASHBOARD, CONNECTIONS] {
            assert!(loaded(&nav, key), "{} should stay loaded", key);
        }
    }

    #[test]
    fn test_preference_change_switches_without_persisting() {
        let mut nav = state(NavMode::Addressable, WORKSPACE);
        let effects = nav.dispatch(NavAction::PreferenceChanged(DASHBOARD.into()));
        assert_eq!(effects, vec![NavEffect::ReplacePath("/dashboard".into())]);
        assert_eq!(nav.active(), DASHBOARD);

        // Echo of our own write.
        assert!(nav.dispatch(NavAction::PreferenceChanged(DASHBOARD.into())).is_empty());
    }

    #[test]
    fn test_role_resolution_lists() {
        let mut nav = state(NavMode::Desktop, WORKSPACE);
        nav.dispatch(NavAction::RoleResolved { admin: true });
        let keys: Vec<_> = nav.items().iter().map(|item| item.key).collect();
        assert_eq!(keys, vec![WORKSPACE, DASHBOARD, CONNECTIONS, TEAM, GITHUB]);

        nav.dispatch(NavAction::RoleResolved { admin: false });
        assert_eq!(nav.items().len(), 4);
        assert!(nav.item(TEAM).is_none());
    }

    #[test]
    fn test_team_from_path_mounts_when_admin_resolves() {
        let mut nav = state(NavMode::Addressable, TEAM);
        assert!(nav.active_item().is_none());

        nav.dispatch(NavAction::RoleResolved { admin: true });
        let team = nav.active_item().unwrap();
        assert_eq!(team.key, TEAM);
        assert!(team.is_load);
    }
}
