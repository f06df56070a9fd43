// Connections panel.
// Table of saved connections with their environment.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

use crate::state::{LoadingState, PanelKind};
use crate::ui::list::{
    format_relative_time, highlight_style, render_empty, render_error, render_loading,
};

use super::{Panel, PanelContext, step_selection};

pub struct ConnectionsPanel {
    table_state: TableState,
}

impl ConnectionsPanel {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
        }
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }
}

impl Panel for ConnectionsPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Connections
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext) {
        let block = Block::default().borders(Borders::ALL).title(" Connections ");

        match ctx.connections {
            LoadingState::Idle | LoadingState::Loading => {
                render_loading(frame, area, block, "Loading connections")
            }
            LoadingState::Error(e) => render_error(frame, area, block, e),
            LoadingState::Loaded(connections) if connections.is_empty() => {
                render_empty(frame, area, block, "No connections yet")
            }
            LoadingState::Loaded(connections) => {
                let rows: Vec<Row> = connections
                    .iter()
                    .map(|conn| {
                        let env = ctx.environment_name(conn.environment_id).unwrap_or("-");
                        let env_style = ctx
                            .environment_color(conn.environment_id)
                            .map(|color| Style::default().fg(color))
                            .unwrap_or_default();
                        let address = match (&conn.host, &conn.port) {
                            (Some(host), Some(port)) => format!("{}:{}", host, port),
                            (Some(host), None) => host.clone(),
                            _ => "-".to_string(),
                        };
                        let modified = conn
                            .gmt_modified
                            .as_ref()
                            .map(format_relative_time)
                            .unwrap_or_default();
                        Row::new(vec![
                            Cell::from(Span::styled(
                                conn.alias.clone(),
                                Style::default().fg(Color::Cyan),
                            )),
                            Cell::from(conn.db_type.clone().unwrap_or_default()),
                            Cell::from(address),
                            Cell::from(Span::styled(env.to_string(), env_style)),
                            Cell::from(Span::styled(
                                modified,
                                Style::default().fg(Color::DarkGray),
                            )),
                        ])
                    })
                    .collect();

                let table = Table::new(
                    rows,
                    [
                        Constraint::Min(16),
                        Constraint::Length(12),
                        Constraint::Length(24),
                        Constraint::Length(10),
                        Constraint::Length(10),
                    ],
                )
                .header(
                    Row::new(vec!["Alias", "Type", "Address", "Env", "Modified"])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .block(block)
                .row_highlight_style(highlight_style())
                .highlight_symbol("> ");
                frame.render_stateful_widget(table, area, &mut self.table_state);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> bool {
        let len = ctx.connections.data().map_or(0, Vec::len);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.table_state
                    .select(step_selection(self.table_state.selected(), len, true));
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.table_state
                    .select(step_selection(self.table_state.selected(), len, false));
                true
            }
            _ => false,
        }
    }
}
