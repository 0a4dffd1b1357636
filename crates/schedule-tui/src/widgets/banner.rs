//! One-line error banner above the grid.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use schedule_proto::loader::Banner;

use crate::theme::Palette;

pub fn draw_banner(frame: &mut Frame, area: Rect, banner: &Banner, palette: &Palette) {
    let prefix = match banner {
        Banner::LoadFailure => " ✖ ",
        Banner::SourceReported(_) => " ! ",
    };
    let line = Line::from(vec![
        Span::raw(prefix),
        Span::raw(banner.message()),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.style_banner()), area);
}
