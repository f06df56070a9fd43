// Popup UI components.
// User menu, settings, help, and console overlays drawn on top of the shell.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::{ConsoleLevel, NavMode};

use super::list;

/// Centered rectangle clamped to `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn key_hint(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", key), Style::default().fg(Color::Cyan)),
        Span::raw(label),
    ])
}

/// Dropdown above the sidebar's user entry.
pub fn draw_user_menu(frame: &mut Frame, app: &mut App, sidebar: Rect) {
    let width = sidebar.width.saturating_sub(1).max(16);
    let height = 4;
    let y = (sidebar.y + sidebar.height).saturating_sub(height + 3);
    let menu_area = Rect::new(sidebar.x, y, width, height).intersection(frame.area());

    frame.render_widget(Clear, menu_area);

    let label = if app.session.logout_in_flight {
        "Signing out…"
    } else {
        "Logout"
    };
    let lines = vec![
        Line::from(Span::styled(
            format!(" ⏻ {}", label),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " ↵ confirm  Esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Account ");
    let inner = block.inner(menu_area);
    app.logout_hit = Rect::new(inner.x, inner.y, inner.width, 1).intersection(inner);

    frame.render_widget(Paragraph::new(lines).block(block), menu_area);
}

/// Where the shell is talking to and where it keeps its files.
pub fn draw_settings(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 64, 10);
    frame.render_widget(Clear, area);

    let mode = match app.nav.mode() {
        NavMode::Desktop => "desktop",
        NavMode::Addressable => "addressable",
    };
    let display = |path: &Option<std::path::PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };

    let lines = vec![
        row("Server", app.options.server.clone()),
        row("Mode", mode.to_string()),
        row("Config", display(&app.options.config_path)),
        row("Log file", display(&app.options.log_path)),
        row("Github", app.options.github_url.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "  Press s or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Settings "),
    );
    frame.render_widget(popup, area);
}

/// Draw the help overlay.
pub fn draw_help(frame: &mut Frame) {
    let area = centered(frame.area(), 52, 18);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key_hint("↑/↓ or j/k", "Move in sidebar / list"),
        key_hint("Enter", "Open tab / item"),
        key_hint("1-9", "Jump to sidebar entry"),
        key_hint("Tab", "Switch sidebar / content"),
        key_hint("Esc", "Back to sidebar / close"),
        key_hint("u", "User menu"),
        key_hint("s", "Settings"),
        key_hint("c", "Console"),
        key_hint("r", "Retry sign-in (login view)"),
        key_hint("?", "Show/hide this help"),
        key_hint("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Sidebar entries and footer items are clickable",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help "),
    );
    frame.render_widget(help, area);
}

/// Console messages, newest first.
pub fn draw_console(frame: &mut Frame, app: &mut App) {
    let outer = frame.area();
    let area = centered(outer, outer.width.saturating_sub(8), outer.height.saturating_sub(4));
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Console ");

    if app.console.messages.is_empty() {
        list::render_empty(frame, area, block, "No messages");
        return;
    }

    let items: Vec<ListItem> = app
        .console
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let (icon, color) = match msg.level {
                ConsoleLevel::Error => ("✗", Color::Red),
                ConsoleLevel::Warn => ("!", Color::Yellow),
                ConsoleLevel::Info => ("i", Color::Cyan),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", icon), Style::default().fg(color)),
                Span::styled(
                    list::format_relative_time(&msg.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(msg.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(list::highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut app.console.list_state);
}
