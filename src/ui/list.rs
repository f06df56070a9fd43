// Shared list rendering helpers.
// Placeholder states for panels whose data is not ready, plus relative timestamps.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

/// Short "time ago" label for list rows.
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(*dt);

    match (elapsed.num_days(), elapsed.num_hours(), elapsed.num_minutes()) {
        (d, _, _) if d >= 30 => format!("{}mo ago", d / 30),
        (d, _, _) if d > 0 => format!("{}d ago", d),
        (_, h, _) if h > 0 => format!("{}h ago", h),
        (_, _, m) if m > 0 => format!("{}m ago", m),
        _ => "just now".to_string(),
    }
}

/// Selected row of a list or table.
pub fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn render_status(frame: &mut Frame, area: Rect, block: Block, text: String, color: Color) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(block);
    frame.render_widget(widget, area);
}

pub fn render_loading(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    render_status(frame, area, block, format!("⏳ {}...", message), Color::Yellow);
}

pub fn render_error(frame: &mut Frame, area: Rect, block: Block, error: &str) {
    render_status(frame, area, block, format!("❌ {}", error), Color::Red);
}

pub fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    render_status(frame, area, block, message.to_string(), Color::DarkGray);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(format_relative_time(&(now - Duration::minutes(5))), "5m ago");
        assert_eq!(format_relative_time(&(now - Duration::hours(3))), "3h ago");
        assert_eq!(format_relative_time(&(now - Duration::days(2))), "2d ago");
        assert_eq!(format_relative_time(&(now - Duration::days(65))), "2mo ago");
    }
}
