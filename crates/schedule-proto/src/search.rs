//! Live search over the rendered grid.
//!
//! Matching is a case-insensitive substring test on each day cell's text; the
//! time column never participates. A row stays visible when any of its day
//! cells matches. Matched cells are split into plain and marked segments so
//! every paint target can highlight the same way.

use regex::{Regex, RegexBuilder};

use crate::projection::GridModel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Mark(String),
}

/// Cell text ready to paint: a single plain segment when not highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellText {
    pub segments: Vec<Segment>,
}

impl CellText {
    fn plain(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment::Plain(text.to_string())],
        }
    }

    fn highlighted(text: &str, pattern: &Regex) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::Plain(text[last..m.start()].to_string()));
            }
            segments.push(Segment::Mark(m.as_str().to_string()));
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::Plain(text[last..].to_string()));
        }
        Self { segments }
    }

    pub fn is_highlighted(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Mark(_)))
    }

    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Plain(t) | Segment::Mark(t) => t.as_str(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub visible: bool,
    /// One entry per day cell, Sunday first.
    pub cells: Vec<CellText>,
}

/// Outcome of filtering a grid with one search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    /// Trimmed, lowercased term; empty means "show everything".
    pub term: String,
    pub rows: Vec<RowView>,
}

impl SearchView {
    /// Every row visible, no highlighting.
    pub fn unfiltered(grid: &GridModel) -> Self {
        filter(grid, "")
    }

    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.visible)
            .map(|(i, _)| i)
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    /// True only when a non-empty term left zero rows visible.
    pub fn no_results(&self) -> bool {
        self.is_active() && self.visible_count() == 0
    }
}

/// Literal, case-insensitive pattern for `term`. Regex metacharacters in the
/// term are escaped, so any user input is safe.
pub fn highlight_pattern(term: &str) -> Option<Regex> {
    if term.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .ok()
}

pub fn filter(grid: &GridModel, term: &str) -> SearchView {
    let term = term.trim().to_lowercase();
    let pattern = highlight_pattern(&term);

    let rows = grid
        .rows
        .iter()
        .map(|row| match &pattern {
            None => RowView {
                visible: true,
                cells: row.cells.iter().map(|c| CellText::plain(&c.show)).collect(),
            },
            Some(pattern) => {
                let mut visible = false;
                let cells = row
                    .cells
                    .iter()
                    .map(|cell| {
                        let text = cell.show.as_str();
                        if !text.is_empty() && pattern.is_match(text) {
                            visible = true;
                            CellText::highlighted(text, pattern)
                        } else {
                            CellText::plain(text)
                        }
                    })
                    .collect();
                RowView { visible, cells }
            }
        })
        .collect();

    SearchView { term, rows }
}
