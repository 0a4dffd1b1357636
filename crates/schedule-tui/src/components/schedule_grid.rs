//! ScheduleGrid: the week as a scrollable table.
//!
//! Column 0 is the time label, columns 1..=7 are Sunday..Saturday. Rows hidden
//! by the active search are left out entirely; the selection indexes into the
//! rows that remain.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use schedule_proto::projection::GridPosition;
use schedule_proto::search::{CellText, Segment};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{palette, Palette},
    widgets::pane_chrome::{pane_chrome, Badge},
};

const TIME_COL_WIDTH: u16 = 9;

pub struct ScheduleGrid {
    table_state: TableState,
    /// Position within the visible rows.
    selected: usize,
    /// Body height of the last frame; one page for PgUp/PgDn.
    page: usize,
}

impl ScheduleGrid {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
            selected: 0,
            page: 10,
        }
    }

    fn clamp(&mut self, visible: usize) {
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    /// Visible position of grid row `row`, or of the nearest visible row above it.
    fn visible_position(state: &AppState, row: usize) -> usize {
        state
            .search
            .visible_rows()
            .take_while(|&i| i <= row)
            .count()
            .saturating_sub(1)
    }
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_line<'a>(text: &'a CellText, base: Style, palette: &Palette) -> Line<'a> {
    let spans: Vec<Span> = text
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(t) => Span::styled(t.as_str(), base),
            Segment::Mark(t) => Span::styled(t.as_str(), palette.style_mark()),
        })
        .collect();
    Line::from(spans)
}

impl Component for ScheduleGrid {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectUp(1)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectDown(1)],
            KeyCode::PageUp => vec![Action::SelectUp(self.page.max(1))],
            KeyCode::PageDown => vec![Action::SelectDown(self.page.max(1))],
            KeyCode::Home => vec![Action::SelectFirst],
            KeyCode::End => vec![Action::SelectLast],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        let visible = state.search.visible_count();
        match action {
            Action::SelectUp(n) => self.selected = self.selected.saturating_sub(*n),
            Action::SelectDown(n) => self.selected = self.selected.saturating_add(*n),
            Action::SelectFirst => self.selected = 0,
            Action::SelectLast => self.selected = visible.saturating_sub(1),
            Action::ApplySearch(_) | Action::ClearSearch => self.selected = 0,
            Action::JumpToToday => {
                if let Some(row) = state.today_row() {
                    self.selected = Self::visible_position(state, row);
                }
            }
            _ => {}
        }
        self.clamp(visible);
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = palette(state.theme);
        let visible: Vec<usize> = state.search.visible_rows().collect();

        let count_badge = format!("{}/{}", visible.len(), state.grid.rows.len());
        let badge = if state.loading {
            Some(Badge {
                text: "LOADING",
                color: palette.accent,
            })
        } else if state.search.is_active() {
            Some(Badge {
                text: &count_badge,
                color: palette.mode_search,
            })
        } else {
            None
        };
        let block = pane_chrome("schedule", focused, badge, palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let empty_msg = if state.grid.is_empty() {
            Some(if state.loading {
                "  loading schedule…"
            } else {
                "  no schedule loaded"
            })
        } else if state.search.no_results() {
            Some("  No shows match your search.")
        } else {
            None
        };
        if let Some(msg) = empty_msg {
            frame.render_widget(
                Paragraph::new(Span::styled(msg, palette.style_muted())),
                inner,
            );
            return;
        }

        let today = state.today();
        let header_cells = std::iter::once(Cell::from("")).chain(state.grid.headers.iter().map(
            |h| {
                let style = if h.day == today {
                    palette.style_today()
                } else {
                    palette.style_secondary()
                };
                let mut lines = vec![Line::from(Span::styled(h.day.name(), style))];
                if let Some(date) = h.date {
                    lines.push(Line::from(Span::styled(
                        date.format("%b %-d").to_string(),
                        palette.style_muted(),
                    )));
                }
                Cell::from(Text::from(lines))
            },
        ));
        let header = Row::new(header_cells).height(2);

        let rows: Vec<Row> = visible
            .iter()
            .map(|&row_idx| {
                let grid_row = &state.grid.rows[row_idx];
                let row_view = &state.search.rows[row_idx];
                let time = Cell::from(Span::styled(
                    grid_row.time_label.as_str(),
                    palette.style_secondary(),
                ));
                let days = row_view.cells.iter().enumerate().map(|(col, text)| {
                    let is_now = state.now_cell == Some(GridPosition { row: row_idx, col });
                    let base = if is_now {
                        palette.style_now_playing()
                    } else {
                        palette.style_default()
                    };
                    let cell = Cell::from(cell_line(text, base, palette));
                    if is_now {
                        cell.style(palette.style_now_playing())
                    } else {
                        cell
                    }
                });
                Row::new(std::iter::once(time).chain(days))
            })
            .collect();

        let widths = std::iter::once(Constraint::Length(TIME_COL_WIDTH))
            .chain(std::iter::repeat(Constraint::Fill(1)).take(7));
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(palette.style_selected());

        self.page = inner.height.saturating_sub(2) as usize;
        self.clamp(visible.len());
        self.table_state.select(Some(self.selected));
        frame.render_stateful_widget(table, inner, &mut self.table_state);
    }
}
