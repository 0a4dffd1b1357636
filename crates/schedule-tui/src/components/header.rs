//! Header component: 2-row top bar.
//!
//! Row 1: title, week range, last-updated stamp.
//! Row 2: now playing in the station timezone, and the station clock.
//!
//! Not focusable; draws to a 2-row area.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{palette, Palette},
};

const TITLE: &str = "Radio Classics Schedule";

pub struct Header;

impl Component for Header {
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let palette = palette(state.theme);
        if area.height < 2 {
            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(build_row1(state, palette)), area);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        frame.render_widget(Clear, rows[0]);
        frame.render_widget(Paragraph::new(build_row1(state, palette)), rows[0]);
        frame.render_widget(Clear, rows[1]);
        frame.render_widget(Paragraph::new(build_row2(state, palette)), rows[1]);
    }
}

// ── Row 1: title / week / updated ─────────────────────────────────────────────

fn build_row1<'a>(state: &'a AppState, palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!(" {}", TITLE),
        palette.style_default().add_modifier(Modifier::BOLD),
    )];
    if let Some(week) = state.week_label() {
        spans.push(Span::styled("  ·  ", palette.style_muted()));
        spans.push(Span::styled(week, palette.style_secondary()));
    }
    if let Some(updated) = state.last_updated() {
        spans.push(Span::styled(
            format!("  updated {}", updated),
            palette.style_muted(),
        ));
    }
    Line::from(spans)
}

// ── Row 2: now playing / clock ────────────────────────────────────────────────

fn build_row2<'a>(state: &'a AppState, palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::styled(" ▶ ", palette.style_accent())];
    match &state.now_playing {
        Some(np) if !np.show.is_empty() => {
            spans.push(Span::styled(
                np.show.as_str(),
                palette.style_default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("  since {}", np.start_time),
                palette.style_muted(),
            ));
        }
        _ => spans.push(Span::styled("nothing on air", palette.style_muted())),
    }
    spans.push(Span::styled("  ·  ", palette.style_muted()));
    spans.push(Span::styled(
        state.clock_label.as_str(),
        palette.style_secondary(),
    ));
    if state.loading {
        spans.push(Span::styled("  loading…", palette.style_accent()));
    }
    Line::from(spans)
}
