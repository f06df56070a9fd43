// Navigation config.
// The sidebar tab descriptors and the role-dependent visible tab list.

/// Stable tab keys.
pub const WORKSPACE: &str = "workspace";
pub const DASHBOARD: &str = "dashboard";
pub const CONNECTIONS: &str = "connections";
pub const TEAM: &str = "team";
pub const GITHUB: &str = "github";

/// Position of the admin-only team tab in the sidebar.
const TEAM_INDEX: usize = 3;

/// Content panel a tab mounts on first activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Workspace,
    Dashboard,
    Connections,
    Team,
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Unique, stable identifier. Also the path segment in addressable mode.
    pub key: &'static str,
    pub icon: &'static str,
    /// Relative glyph size. Large glyphs are drawn bold.
    pub icon_size: u16,
    /// Whether the panel has ever been mounted. Never reset once set.
    pub is_load: bool,
    /// `None` for external links.
    pub panel: Option<PanelKind>,
    pub name: &'static str,
    /// External URL. Entries with a URL have no panel and are never activated.
    pub open_browser: Option<String>,
}

impl NavItem {
    fn content(
        key: &'static str,
        icon: &'static str,
        icon_size: u16,
        panel: PanelKind,
        name: &'static str,
    ) -> Self {
        Self {
            key,
            icon,
            icon_size,
            is_load: false,
            panel: Some(panel),
            name,
            open_browser: None,
        }
    }

    pub fn is_external(&self) -> bool {
        self.open_browser.is_some()
    }
}

/// The four entries every session starts with.
pub fn base_nav_items(github_url: &str) -> Vec<NavItem> {
    vec![
        NavItem::content(WORKSPACE, "▤", 16, PanelKind::Workspace, "Workspace"),
        NavItem::content(DASHBOARD, "◔", 24, PanelKind::Dashboard, "Dashboard"),
        NavItem::content(CONNECTIONS, "⛁", 20, PanelKind::Connections, "Connections"),
        NavItem {
            key: GITHUB,
            icon: "↗",
            icon_size: 26,
            is_load: false,
            panel: None,
            name: "Github",
            open_browser: Some(github_url.to_string()),
        },
    ]
}

fn team_item(active: &str) -> NavItem {
    let mut item = NavItem::content(TEAM, "☺", 24, PanelKind::Team, "Team");
    // Mount straight away if the shell was opened on the team tab.
    item.is_load = active == TEAM;
    item
}

/// Derive the visible tab list for a user's admin flag.
///
/// Admins get the team tab at position 3; everyone else gets no team tab.
/// Entries already present keep their loaded flags, so applying the same flag
/// again returns an identical list.
pub fn compute_visible_tabs(tabs: &[NavItem], is_admin: bool, active: &str) -> Vec<NavItem> {
    let has_team = tabs.iter().any(|item| item.key == TEAM);
    match (is_admin, has_team) {
        (true, false) => {
            let mut visible = tabs.to_vec();
            visible.insert(TEAM_INDEX.min(visible.len()), team_item(active));
            visible
        }
        (false, true) => tabs.iter().filter(|item| item.key != TEAM).cloned().collect(),
        _ => tabs.to_vec(),
    }
}
