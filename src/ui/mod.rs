// UI module for rendering the TUI.
// Lays out the sidebar, header, content panel, status bar, and overlays.

mod header;
pub mod list;
mod modal;
mod sidebar;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Overlay, Screen};
use crate::panels::PanelContext;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    app.sidebar_hit = Rect::default();
    app.user_hit = Rect::default();
    app.settings_hit = Rect::default();
    app.logout_hit = Rect::default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Sidebar and content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(sidebar::SIDEBAR_WIDTH),
            Constraint::Min(1),
        ])
        .split(rows[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Panel
        ])
        .split(columns[1]);

    header::draw_header(frame, app, main[0]);

    match app.screen {
        Screen::Main => {
            sidebar::draw_sidebar(frame, app, columns[0]);
            draw_content(frame, app, main[1]);
        }
        Screen::Login => draw_login(frame, app, main[1]),
    }

    draw_status_bar(frame, app, rows[1]);

    // Overlays go last, on top of everything
    match app.overlay {
        Overlay::None => {}
        Overlay::UserMenu => modal::draw_user_menu(frame, app, columns[0]),
        Overlay::Settings => modal::draw_settings(frame, app),
        Overlay::Help => modal::draw_help(frame),
        Overlay::Console => modal::draw_console(frame, app),
    }
}

/// Draw the active tab's panel. Hidden panels are kept but not drawn.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let ctx = PanelContext {
        connections: &app.connections,
        environments: &app.environments,
        user: app.session.user(),
    };

    let key = app
        .nav
        .panel_slots()
        .into_iter()
        .find(|slot| slot.visible && slot.mounted)
        .map(|slot| slot.key);

    match key.and_then(|key| app.panels.get_mut(key)) {
        Some(panel) => panel.draw(frame, area, &ctx),
        None => {
            let message = format!("Nothing to show for \"{}\"", app.nav.active());
            list::render_empty(frame, area, Block::default(), &message);
        }
    }
}

fn draw_login(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Signed out ");

    if app.session.user.is_loading() {
        list::render_loading(frame, area, block, "Checking session");
        return;
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "You have been signed out.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Sign in at {} and press r to continue.", app.options.server),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(text, area);
}

/// Draw the status bar: a pending toast, or key hints and the console badge.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(toast) = &app.toast {
        let status = Paragraph::new(Span::styled(
            format!(" {} ", toast.message),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
        frame.render_widget(status, area);
        return;
    }

    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
        Span::raw("  ↵ "),
        Span::styled("Open", Style::default().fg(Color::DarkGray)),
        Span::raw("  Tab "),
        Span::styled("Focus", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    if app.console.unread > 0 {
        hints.push(Span::styled(
            format!("  c Console ({})", app.console.unread),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LoginUser, Role};
    use crate::app::AppOptions;
    use crate::runtime::RuntimeEvent;
    use crate::state::NavMode;
    use crate::runtime::RuntimeCommand;
    use crate::store::{UiState, UiStateStore};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::backend::TestBackend;

    fn app(remembered: &str) -> App {
        let store = UiStateStore::in_memory(UiState {
            main_page_active_tab: remembered.to_string(),
        });
        let mut app = App::new(
            store,
            AppOptions {
                mode: NavMode::Addressable,
                initial_path: None,
                github_url: "https://example.com/repo".to_string(),
                server: "http://127.0.0.1:10824".to_string(),
                config_path: None,
                log_path: None,
            },
        );
        app.mount();
        app
    }

    fn render(app: &mut App) -> String {
        render_sized(app, 100, 30)
    }

    fn render_sized(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sign_in(app: &mut App, admin: bool, role_code: Role) {
        app.handle_runtime_event(RuntimeEvent::UserLoaded(Some(LoginUser {
            id: Some(7),
            nick_name: Some("alice".to_string()),
            admin,
            role_code,
        })));
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_sidebar_lists_entries_and_records_hit_area() {
        let mut app = app("workspace");
        sign_in(&mut app, true, Role::Admin);
        let screen = render(&mut app);

        for name in ["dbdesk", "Workspace", "Dashboard", "Connections", "Team", "Github"] {
            assert!(screen.contains(name), "missing {}", name);
        }
        assert!(screen.contains("/workspace"));
        assert!(screen.contains("alice"));
        assert!(app.sidebar_hit.height > 0);
    }

    #[test]
    fn test_user_entry_hidden_for_desktop_role() {
        let mut app = app("workspace");
        sign_in(&mut app, false, Role::Desktop);
        let screen = render(&mut app);
        assert!(!screen.contains("alice"));
        assert!(!screen.contains("Team"));
        assert!(screen.contains("Settings"));
    }

    #[test]
    fn test_unknown_tab_shows_placeholder() {
        let mut app = app("reports");
        let screen = render(&mut app);
        assert!(screen.contains("Nothing to show for \"reports\""));
    }

    #[test]
    fn test_toast_replaces_hints() {
        let mut app = app("workspace");
        sign_in(&mut app, false, Role::User);
        app.handle_runtime_event(RuntimeEvent::LogoutFailed {
            message: "HTTP 500".to_string(),
        });
        let screen = render(&mut app);
        assert!(screen.contains("Logout failed: HTTP 500"));
        assert!(!screen.contains("Navigate"));
    }

    #[test]
    fn test_login_view_after_logout() {
        let mut app = app("dashboard");
        sign_in(&mut app, false, Role::User);
        app.handle_runtime_event(RuntimeEvent::LoggedOut);
        let screen = render(&mut app);
        assert!(screen.contains("You have been signed out."));
        assert!(screen.contains("/login"));
        assert_eq!(app.sidebar_hit, Rect::default());
    }

    #[test]
    fn test_click_on_scrolled_sidebar() {
        let mut app = app("workspace");
        sign_in(&mut app, true, Role::Admin);
        app.sidebar_cursor = 4;
        let screen = render_sized(&mut app, 80, 9);

        let hit = app.sidebar_hit;
        assert_eq!(hit, Rect::new(0, 2, 21, 3));
        assert!(app.sidebar_list.offset() > 0);
        let top_row: String = screen
            .lines()
            .nth(hit.y as usize)
            .unwrap()
            .chars()
            .take(hit.width as usize)
            .collect();
        assert!(top_row.contains("Connections"), "top row was {:?}", top_row);

        app.handle_mouse(click(hit.x + 3, hit.y));
        assert_eq!(app.nav.active(), "connections");
    }

    #[test]
    fn test_click_user_entry_then_logout() {
        let mut app = app("workspace");
        sign_in(&mut app, false, Role::User);
        app.take_commands();
        render(&mut app);

        let user = app.user_hit;
        assert!(user.height > 0);
        app.handle_mouse(click(user.x + 1, user.y));
        assert_eq!(app.overlay, Overlay::UserMenu);

        let screen = render(&mut app);
        assert!(screen.contains("Logout"));
        let logout = app.logout_hit;
        assert!(logout.height > 0);
        app.handle_mouse(click(logout.x + 1, logout.y));
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.take_commands(), vec![RuntimeCommand::Logout]);
    }

    #[test]
    fn test_footer_click_for_desktop_role() {
        let mut app = app("workspace");
        sign_in(&mut app, false, Role::Desktop);
        app.take_commands();
        render(&mut app);
        assert_eq!(app.user_hit, Rect::default());

        // The row above settings is the footer border, not a user entry.
        let settings = app.settings_hit;
        app.handle_mouse(click(settings.x + 1, settings.y - 1));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.take_commands().is_empty());

        app.handle_mouse(click(settings.x + 1, settings.y));
        assert_eq!(app.overlay, Overlay::Settings);
    }

    #[test]
    fn test_hidden_panel_keeps_its_state() {
        let mut app = app("dashboard");
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE));
        assert!(render(&mut app).contains("by type"));

        app.activate_index(0);
        assert!(!render(&mut app).contains("by type"));

        app.activate_index(1);
        assert!(render(&mut app).contains("by type"));
        assert_eq!(app.panels.build_count("dashboard"), 1);
    }
}
