// Team panel.
// Account summary for administrators; member management lives on the server.

use crossterm::event::KeyEvent;
use ratatui::{prelude::*, widgets::*};

use crate::state::PanelKind;

use super::{Panel, PanelContext};

pub struct TeamPanel;

impl TeamPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for TeamPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Team
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext) {
        let mut lines = vec![Line::from(Span::styled(
            "Team management",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        match ctx.user {
            Some(user) => {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Signed in as  ", Style::default().fg(Color::DarkGray)),
                    Span::styled(user.display_name(), Style::default().fg(Color::Cyan)),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Role          ", Style::default().fg(Color::DarkGray)),
                    Span::raw(format!("{:?}", user.role_code)),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Session not loaded",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Team "));
        frame.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, _key: KeyEvent, _ctx: &PanelContext) -> bool {
        false
    }
}
