// Dashboard panel.
// Connection counts grouped by environment or by database type.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

use crate::state::{LoadingState, PanelKind};
use crate::ui::list::{render_empty, render_error, render_loading};

use super::{Panel, PanelContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Environment,
    DatabaseType,
}

pub struct DashboardPanel {
    grouping: Grouping,
}

impl DashboardPanel {
    pub fn new() -> Self {
        Self {
            grouping: Grouping::Environment,
        }
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Count connections per group label, sorted by label.
    pub fn group_counts(&self, ctx: &PanelContext) -> Vec<(String, usize)> {
        let Some(connections) = ctx.connections.data() else {
            return Vec::new();
        };
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for conn in connections {
            let label = match self.grouping {
                Grouping::Environment => ctx
                    .environment_name(conn.environment_id)
                    .unwrap_or("(none)")
                    .to_string(),
                Grouping::DatabaseType => conn.db_type.clone().unwrap_or_else(|| "(unknown)".to_string()),
            };
            *counts.entry(label).or_default() += 1;
        }
        counts.into_iter().collect()
    }
}

impl Panel for DashboardPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Dashboard
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext) {
        let title = match self.grouping() {
            Grouping::Environment => " Dashboard · by environment ",
            Grouping::DatabaseType => " Dashboard · by type ",
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        match ctx.connections {
            LoadingState::Idle | LoadingState::Loading => {
                render_loading(frame, area, block, "Loading connections")
            }
            LoadingState::Error(e) => render_error(frame, area, block, e),
            LoadingState::Loaded(connections) if connections.is_empty() => {
                render_empty(frame, area, block, "Nothing to chart yet")
            }
            LoadingState::Loaded(connections) => {
                let total = connections.len();
                let rows: Vec<Row> = self
                    .group_counts(ctx)
                    .into_iter()
                    .map(|(label, count)| {
                        let bar_width = (count * 30).div_ceil(total);
                        Row::new(vec![
                            Cell::from(label),
                            Cell::from(count.to_string()),
                            Cell::from(Span::styled(
                                "█".repeat(bar_width),
                                Style::default().fg(Color::Cyan),
                            )),
                        ])
                    })
                    .collect();

                let table = Table::new(
                    rows,
                    [
                        Constraint::Length(20),
                        Constraint::Length(6),
                        Constraint::Min(1),
                    ],
                )
                .header(
                    Row::new(vec!["Group", "Count", ""])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .block(block.title_bottom(" g: change grouping "));
                frame.render_widget(table, area);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &PanelContext) -> bool {
        match key.code {
            KeyCode::Char('g') => {
                self.grouping = match self.grouping {
                    Grouping::Environment => Grouping::DatabaseType,
                    Grouping::DatabaseType => Grouping::Environment,
                };
                true
            }
            _ => false,
        }
    }
}
