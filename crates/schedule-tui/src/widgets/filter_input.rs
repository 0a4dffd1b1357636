//! FilterInput: wraps tui-input for use as the schedule search box.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::Palette;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Text edited; the new value.
    Changed(String),
    /// Esc on a non-empty box: text wiped, box keeps focus.
    Cleared,
    /// Enter: keep the term, leave the box.
    Confirmed,
    /// Esc on an empty box: leave it.
    Cancelled,
    None,
}

pub struct FilterInput {
    input: Input,
    pub active: bool,
    placeholder: String,
}

impl FilterInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Handle a key event. Returns what happened.
    ///
    /// Esc behaviour:
    ///   - If the input has text: clear it and stay focused (`Cleared`)
    ///   - If the input is already empty: deactivate (`Cancelled`)
    pub fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Esc => {
                if !self.is_empty() {
                    self.clear();
                    FilterAction::Cleared
                } else {
                    self.deactivate();
                    FilterAction::Cancelled
                }
            }
            KeyCode::Enter => {
                self.deactivate();
                FilterAction::Confirmed
            }
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    FilterAction::None
                } else {
                    FilterAction::Changed(self.input.value().to_string())
                }
            }
        }
    }

    /// Render the search bar into `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("/ {}", self.placeholder),
                Style::default().fg(palette.muted),
            )
        } else {
            Span::styled(
                format!("/ {}", value.chars().skip(scroll).collect::<String>()),
                Style::default().fg(palette.filter_fg),
            )
        };

        let paragraph = Paragraph::new(Line::from(vec![display]))
            .style(Style::default().bg(palette.filter_bg));
        frame.render_widget(paragraph, area);

        if self.active && area.width > 0 {
            let offset = self.input.visual_cursor().saturating_sub(scroll) as u16;
            let cursor_x = area.x + 2 + offset;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::new("search shows...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(text: &str) -> FilterInput {
        let mut f = FilterInput::default();
        f.activate();
        for c in text.chars() {
            f.handle_key(key(KeyCode::Char(c)));
        }
        f
    }

    #[test]
    fn test_typing_reports_each_change() {
        let mut f = FilterInput::default();
        f.activate();
        assert_eq!(
            f.handle_key(key(KeyCode::Char('j'))),
            FilterAction::Changed("j".into())
        );
        assert_eq!(
            f.handle_key(key(KeyCode::Char('a'))),
            FilterAction::Changed("ja".into())
        );
        assert_eq!(
            f.handle_key(key(KeyCode::Backspace)),
            FilterAction::Changed("j".into())
        );
        assert_eq!(f.text(), "j");
    }

    #[test]
    fn test_esc_clears_then_leaves() {
        let mut f = typed("jazz");
        assert_eq!(f.handle_key(key(KeyCode::Esc)), FilterAction::Cleared);
        assert!(f.is_empty());
        assert!(f.is_active());

        assert_eq!(f.handle_key(key(KeyCode::Esc)), FilterAction::Cancelled);
        assert!(!f.is_active());
    }

    #[test]
    fn test_enter_keeps_term() {
        let mut f = typed("shadow");
        assert_eq!(f.handle_key(key(KeyCode::Enter)), FilterAction::Confirmed);
        assert!(!f.is_active());
        assert_eq!(f.text(), "shadow");
    }

    #[test]
    fn test_cursor_movement_is_not_a_change() {
        let mut f = typed("ab");
        assert_eq!(f.handle_key(key(KeyCode::Left)), FilterAction::None);
        assert_eq!(f.text(), "ab");
    }
}
