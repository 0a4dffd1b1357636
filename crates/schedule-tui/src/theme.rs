//! Light and dark palettes for the terminal UI.
//!
//! Every draw call takes its colours from the palette of the active
//! `Theme`, so toggling the theme restyles the whole screen on the next frame.

use ratatui::style::{Color, Modifier, Style};
use schedule_proto::preference::Theme;

pub struct Palette {
    pub bg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub muted: Color,
    pub accent: Color,
    pub separator: Color,
    pub panel_border: Color,
    pub panel_border_focused: Color,
    pub selection_bg: Color,
    pub today: Color,
    pub now_playing_bg: Color,
    pub now_playing_fg: Color,
    pub mark_bg: Color,
    pub mark_fg: Color,
    pub filter_bg: Color,
    pub filter_fg: Color,
    pub banner_bg: Color,
    pub banner_fg: Color,
    pub mode_normal: Color,
    pub mode_search: Color,
}

// ── Dark ──────────────────────────────────────────────────────────────────────

pub const DARK: Palette = Palette {
    bg: Color::Rgb(10, 10, 16),
    primary: Color::Rgb(220, 220, 230),
    secondary: Color::Rgb(160, 160, 180),
    muted: Color::Rgb(100, 100, 120),
    accent: Color::Rgb(255, 140, 60),
    separator: Color::Rgb(40, 40, 55),
    panel_border: Color::Rgb(50, 50, 65),
    panel_border_focused: Color::Rgb(120, 120, 160),
    selection_bg: Color::Rgb(35, 35, 55),
    today: Color::Rgb(100, 180, 255),
    now_playing_bg: Color::Rgb(40, 90, 60),
    now_playing_fg: Color::Rgb(220, 255, 230),
    mark_bg: Color::Rgb(255, 200, 80),
    mark_fg: Color::Rgb(20, 20, 20),
    filter_bg: Color::Rgb(30, 30, 45),
    filter_fg: Color::Rgb(255, 200, 80),
    banner_bg: Color::Rgb(90, 20, 20),
    banner_fg: Color::Rgb(255, 200, 200),
    mode_normal: Color::Rgb(115, 115, 138),
    mode_search: Color::Rgb(255, 200, 80),
};

// ── Light ─────────────────────────────────────────────────────────────────────

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(250, 248, 242),
    primary: Color::Rgb(30, 30, 40),
    secondary: Color::Rgb(80, 80, 100),
    muted: Color::Rgb(140, 140, 150),
    accent: Color::Rgb(190, 80, 20),
    separator: Color::Rgb(215, 212, 205),
    panel_border: Color::Rgb(200, 196, 188),
    panel_border_focused: Color::Rgb(110, 110, 140),
    selection_bg: Color::Rgb(230, 226, 215),
    today: Color::Rgb(20, 90, 170),
    now_playing_bg: Color::Rgb(200, 235, 205),
    now_playing_fg: Color::Rgb(15, 60, 25),
    mark_bg: Color::Rgb(255, 225, 110),
    mark_fg: Color::Rgb(30, 30, 30),
    filter_bg: Color::Rgb(236, 232, 222),
    filter_fg: Color::Rgb(150, 90, 0),
    banner_bg: Color::Rgb(250, 215, 215),
    banner_fg: Color::Rgb(140, 20, 20),
    mode_normal: Color::Rgb(110, 110, 130),
    mode_search: Color::Rgb(150, 90, 0),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

impl Palette {
    pub fn style_default(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn style_secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn style_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn style_selected(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }

    pub fn style_today(&self) -> Style {
        Style::default().fg(self.today).add_modifier(Modifier::BOLD)
    }

    pub fn style_now_playing(&self) -> Style {
        Style::default()
            .bg(self.now_playing_bg)
            .fg(self.now_playing_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_mark(&self) -> Style {
        Style::default().bg(self.mark_bg).fg(self.mark_fg)
    }

    pub fn style_focused_border(&self) -> Style {
        Style::default().fg(self.panel_border_focused)
    }

    pub fn style_unfocused_border(&self) -> Style {
        Style::default().fg(self.panel_border)
    }

    pub fn style_banner(&self) -> Style {
        Style::default()
            .bg(self.banner_bg)
            .fg(self.banner_fg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme() {
        assert_eq!(palette(Theme::Dark).bg, DARK.bg);
        assert_eq!(palette(Theme::Light).bg, LIGHT.bg);
        assert_ne!(DARK.bg, LIGHT.bg);
    }
}
