//! Status bar: bottom line with the input mode, row counts and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
        }
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect, palette: &Palette) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(palette.separator),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    palette: &Palette,
    visible_rows: usize,
    total_rows: usize,
) {
    let label_color = match mode {
        InputMode::Normal => palette.mode_normal,
        InputMode::Search => palette.mode_search,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default().fg(label_color).add_modifier(Modifier::BOLD),
    )];
    if visible_rows != total_rows {
        spans.push(Span::styled(
            format!("{}/{} ", visible_rows, total_rows),
            palette.style_accent(),
        ));
    }

    let keys = match mode {
        InputMode::Normal => {
            " ↑↓/jk scroll  PgUp/PgDn page  g today  / search  x clear  t theme  R reload  q quit"
        }
        InputMode::Search => " type to search  Enter keep  Esc clear/close",
    };
    spans.push(Span::styled(keys, palette.style_muted()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
