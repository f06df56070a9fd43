// Header rendering.
// Shows the active tab and, in addressable mode, the current path.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Screen};

/// Render the header above the content area.
pub fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.screen {
        Screen::Login => "Sign in".to_string(),
        Screen::Main => app
            .nav
            .active_item()
            .map(|item| item.name.to_string())
            .unwrap_or_else(|| app.nav.active().to_string()),
    };

    let crumbs = Line::from(vec![
        Span::styled("dbdesk", Style::default().fg(Color::White)),
        Span::styled(" > ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let location = match &app.location {
        Some(location) => location.pathname().to_string(),
        None => "desktop".to_string(),
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(location_width(&location))])
        .split(inner);

    frame.render_widget(Paragraph::new(crumbs), chunks[0]);
    let right = Paragraph::new(Span::styled(location, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Right);
    frame.render_widget(right, chunks[1]);
}

/// Columns needed for the path plus one space of padding.
fn location_width(location: &str) -> u16 {
    u16::try_from(Line::from(location).width())
        .unwrap_or(u16::MAX)
        .saturating_add(1)
}
