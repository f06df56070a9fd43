// Workspace panel.
// Connection picker; choosing a connection opens it as the active workspace target.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

use crate::state::{LoadingState, PanelKind};
use crate::ui::list::{highlight_style, render_empty, render_error, render_loading};

use super::{Panel, PanelContext, step_selection};

pub struct WorkspacePanel {
    list_state: ListState,
    /// Id of the connection opened with Enter.
    opened: Option<i64>,
}

impl WorkspacePanel {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            opened: None,
        }
    }

    #[cfg(test)]
    pub fn opened(&self) -> Option<i64> {
        self.opened
    }
}

impl Panel for WorkspacePanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Workspace
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(1)])
            .split(area);

        let block = Block::default().borders(Borders::ALL).title(" Connections ");
        match ctx.connections {
            LoadingState::Idle | LoadingState::Loading => {
                render_loading(frame, chunks[0], block, "Loading connections")
            }
            LoadingState::Error(e) => render_error(frame, chunks[0], block, e),
            LoadingState::Loaded(connections) if connections.is_empty() => {
                render_empty(frame, chunks[0], block, "No connections yet")
            }
            LoadingState::Loaded(connections) => {
                if self.list_state.selected().is_none() {
                    self.list_state.select(Some(0));
                }
                let items: Vec<ListItem> = connections
                    .iter()
                    .map(|conn| {
                        let marker = if Some(conn.id) == self.opened { "● " } else { "  " };
                        ListItem::new(Line::from(vec![
                            Span::styled(marker, Style::default().fg(Color::Green)),
                            Span::styled(&conn.alias, Style::default().fg(Color::Cyan)),
                        ]))
                    })
                    .collect();
                let list_widget = List::new(items)
                    .block(block)
                    .highlight_style(highlight_style())
                    .highlight_symbol("> ");
                frame.render_stateful_widget(list_widget, chunks[0], &mut self.list_state);
            }
        }

        let opened = self.opened.and_then(|id| {
            ctx.connections
                .data()
                .and_then(|connections| connections.iter().find(|conn| conn.id == id))
        });
        let text = match opened {
            Some(conn) => vec![
                Line::from(Span::styled(
                    conn.alias.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "{} {}:{}",
                    conn.db_type.as_deref().unwrap_or("?"),
                    conn.host.as_deref().unwrap_or("-"),
                    conn.port.as_deref().unwrap_or("-"),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Query consoles for this connection open here.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            None => vec![Line::from(Span::styled(
                "Select a connection and press Enter",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        let detail = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" Workspace "));
        frame.render_widget(detail, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> bool {
        let Some(connections) = ctx.connections.data() else {
            return false;
        };
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let next = step_selection(self.list_state.selected(), connections.len(), true);
                self.list_state.select(next);
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let prev = step_selection(self.list_state.selected(), connections.len(), false);
                self.list_state.select(prev);
                true
            }
            KeyCode::Enter => {
                let selected = self
                    .list_state
                    .selected()
                    .and_then(|i| connections.get(i));
                match selected {
                    Some(conn) => {
                        self.opened = Some(conn.id);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}
