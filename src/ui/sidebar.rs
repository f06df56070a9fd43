// Sidebar rendering.
// Brand logo, one row per tab, and the user and settings entries at the bottom.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus, Overlay};
use crate::state::NavItem;

pub const SIDEBAR_WIDTH: u16 = 22;

/// Glyphs at or above this size are drawn bold.
const LARGE_ICON: u16 = 24;

/// Draw the sidebar and record where its entries landed for mouse hits.
pub fn draw_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Logo
            Constraint::Min(1),    // Tabs
            Constraint::Length(3), // User and settings
        ])
        .split(inner);

    draw_logo(frame, chunks[0]);
    draw_entries(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn draw_logo(frame: &mut Frame, area: Rect) {
    let logo = Line::from(vec![
        Span::styled(" ◆ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "dbdesk",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(logo), area);
}

fn entry_line(index: usize, item: &NavItem, active: bool) -> Line<'static> {
    let mut icon_style = Style::default();
    if item.icon_size >= LARGE_ICON {
        icon_style = icon_style.add_modifier(Modifier::BOLD);
    }

    let name_style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if item.is_external() {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(format!("{} ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(item.icon, icon_style.patch(name_style)),
        Span::raw(" "),
        Span::styled(item.name, name_style),
    ])
}

fn draw_entries(frame: &mut Frame, app: &mut App, area: Rect) {
    let active = app.nav.active();
    let items: Vec<ListItem> = app
        .nav
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(entry_line(i, item, item.key == active)))
        .collect();

    let mut list = List::new(items);
    if app.focus == Focus::Sidebar {
        list = list
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
    } else {
        list = list.highlight_symbol("  ");
    }

    app.sidebar_list.select(Some(app.sidebar_cursor));
    frame.render_stateful_widget(list, area, &mut app.sidebar_list);

    app.sidebar_hit = area;
}

fn draw_footer(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();

    if app.session.user_menu_visible() {
        let name = app
            .session
            .user()
            .map(|user| user.display_name())
            .unwrap_or_default();
        let style = if app.overlay == Overlay::UserMenu {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(" ☻ ", style),
            Span::styled(name, style),
            Span::styled(" [u]", Style::default().fg(Color::DarkGray)),
        ]));
    } else if app.session.user.is_loading() {
        lines.push(Line::from(Span::styled(
            " … ",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(vec![
        Span::styled(" ⚙ Settings", Style::default().fg(Color::White)),
        Span::styled(" [s]", Style::default().fg(Color::DarkGray)),
    ]));

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    let line_area = |index: usize| {
        let row = Rect::new(inner.x, inner.y.saturating_add(index as u16), inner.width, 1);
        row.intersection(inner)
    };
    if app.session.user_menu_visible() {
        app.user_hit = line_area(0);
    }
    app.settings_hit = line_area(lines.len() - 1);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
