//! Paints a grid model into a standalone HTML page.

use std::fmt::Write;

use crate::loader::Banner;
use crate::model::Weekday;
use crate::preference::Theme;
use crate::projection::{GridModel, GridPosition};
use crate::search::{CellText, SearchView, Segment};

/// Everything a page needs besides the grid itself.
pub struct PageView<'a> {
    pub grid: &'a GridModel,
    pub search: &'a SearchView,
    pub now_playing: Option<GridPosition>,
    pub today: Option<Weekday>,
    pub theme: Theme,
    pub banner: Option<&'a Banner>,
    pub week_label: Option<String>,
    pub last_updated: Option<String>,
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn paint_cell_text(out: &mut String, text: &CellText) {
    for segment in &text.segments {
        match segment {
            Segment::Plain(t) => out.push_str(&escape(t)),
            Segment::Mark(t) => {
                let _ = write!(out, "<mark>{}</mark>", escape(t));
            }
        }
    }
}

/// The `<table>` element alone.
pub fn render_table(view: &PageView) -> String {
    let mut out = String::new();
    out.push_str("<table id=\"schedule\">\n<thead>\n<tr><th class=\"time\"></th>");
    for header in &view.grid.headers {
        let class = if view.today == Some(header.day) {
            " class=\"today\""
        } else {
            ""
        };
        let _ = write!(out, "<th{}>{}", class, header.day.name());
        if let Some(date) = header.date {
            let _ = write!(out, "<br><span class=\"date\">{}</span>", date.format("%b %-d"));
        }
        out.push_str("</th>");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for (row_idx, row) in view.grid.rows.iter().enumerate() {
        let row_view = view.search.rows.get(row_idx);
        let hidden = row_view.map(|r| !r.visible).unwrap_or(false);
        let _ = write!(
            out,
            "<tr data-minutes=\"{}\"{}><td class=\"time\">{}</td>",
            row.minutes,
            if hidden { " hidden" } else { "" },
            escape(&row.time_label)
        );
        for (col, cell) in row.cells.iter().enumerate() {
            let now = view.now_playing == Some(GridPosition { row: row_idx, col });
            let mut classes = Vec::new();
            if now {
                classes.push("now-playing");
            }
            if view.today == Some(cell.day) {
                classes.push("today");
            }
            let _ = write!(
                out,
                "<td data-day=\"{}\" data-time=\"{}\"",
                cell.day.name(),
                escape(&cell.time)
            );
            if !classes.is_empty() {
                let _ = write!(out, " class=\"{}\"", classes.join(" "));
            }
            if !cell.episode.is_empty() {
                let _ = write!(out, " title=\"{}\"", escape(&cell.episode));
            }
            out.push('>');
            match row_view.and_then(|r| r.cells.get(col)) {
                Some(text) => paint_cell_text(&mut out, text),
                None => out.push_str(&escape(&cell.show)),
            }
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\" data-theme=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Radio Classics Schedule</title>\n<link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n",
        view.theme.as_str()
    );
    if let Some(banner) = view.banner {
        let _ = write!(
            out,
            "<div class=\"error-banner\" role=\"alert\">{}</div>\n",
            escape(&banner.message())
        );
    }
    out.push_str("<header>\n<h1>Radio Classics Schedule</h1>\n");
    if let Some(week) = &view.week_label {
        let _ = write!(out, "<p class=\"week\">{}</p>\n", escape(week));
    }
    if let Some(updated) = &view.last_updated {
        let _ = write!(out, "<p class=\"updated\">Last updated {}</p>\n", escape(updated));
    }
    if view.search.is_active() {
        let _ = write!(
            out,
            "<p class=\"search\">Showing matches for “{}”</p>\n",
            escape(&view.search.term)
        );
    }
    out.push_str("</header>\n<main>\n");
    out.push_str(&render_table(view));
    if view.search.no_results() {
        out.push_str("<p class=\"no-results\">No shows match your search.</p>\n");
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DaySchedule, ScheduleDocument, Slot};
    use crate::search::filter;

    fn grid() -> GridModel {
        GridModel::build(&ScheduleDocument {
            week_start: "2025-01-05".into(),
            schedule: vec![DaySchedule::new(
                Weekday::Monday,
                vec![
                    Slot::new("9:00 AM", "Fibber McGee & Molly"),
                    Slot::new("10 AM", "<Suspense>"),
                ],
            )],
            ..Default::default()
        })
    }

    fn page<'a>(
        grid: &'a GridModel,
        search: &'a SearchView,
        banner: Option<&'a Banner>,
    ) -> PageView<'a> {
        PageView {
            grid,
            search,
            now_playing: Some(GridPosition { row: 0, col: 1 }),
            today: Some(Weekday::Monday),
            theme: Theme::Dark,
            banner,
            week_label: Some("Jan 5 – Jan 11, 2025".into()),
            last_updated: None,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_table_structure() {
        let g = grid();
        let search = SearchView::unfiltered(&g);
        let html = render_table(&page(&g, &search, None));
        assert_eq!(html.matches("<tr").count(), 3);
        assert_eq!(html.matches("</th>").count(), 8);
        assert_eq!(html.matches("data-day=").count(), 14);
        assert!(html.contains("<th class=\"today\">Monday<br><span class=\"date\">Jan 6</span></th>"));
        assert!(html.contains(
            "<td data-day=\"Monday\" data-time=\"9:00 AM\" class=\"now-playing today\">Fibber McGee &amp; Molly</td>"
        ));
        assert!(html.contains("&lt;Suspense&gt;"));
        assert!(!html.contains(" hidden"));
    }

    #[test]
    fn test_search_hides_rows_and_marks_matches() {
        let g = grid();
        let search = filter(&g, "molly");
        let html = render_table(&page(&g, &search, None));
        assert!(html.contains("Fibber McGee &amp; <mark>Molly</mark>"));
        assert_eq!(html.matches(" hidden>").count(), 1);
    }

    #[test]
    fn test_page_banner_theme_and_no_results() {
        let g = grid();
        let search = filter(&g, "zzz");
        let banner = Banner::SourceReported("Could not parse schedule".into());
        let html = render_page(&page(&g, &search, Some(&banner)));
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("<div class=\"error-banner\" role=\"alert\">Could not parse schedule</div>"));
        assert!(html.contains("class=\"no-results\""));

        let search = SearchView::unfiltered(&g);
        let html = render_page(&page(&g, &search, None));
        assert!(!html.contains("error-banner"));
        assert!(!html.contains("no-results"));
    }
}
