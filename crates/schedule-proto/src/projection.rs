//! Schedule → grid projection.
//!
//! Rows are the distinct canonical times across the whole week, sorted by
//! minutes since midnight. Every row has one cell for each of the seven days,
//! empty when that day has nothing at that time.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::model::{ScheduleDocument, Slot, Weekday, WEEK};
use crate::time::{normalize, to_minutes};

/// Distinct row labels across every day, ascending by start minute.
///
/// Deduplication is by canonical key; the first raw string seen for a key is
/// kept as the label. Equal minute values keep first-seen order.
pub fn collect_time_slots(doc: &ScheduleDocument) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut labels: Vec<String> = Vec::new();
    for day in &doc.schedule {
        for slot in &day.slots {
            if seen.insert(normalize(&slot.time)) {
                labels.push(slot.time.clone());
            }
        }
    }
    labels.sort_by_key(|label| to_minutes(label));
    labels
}

/// Show airing on `day` at `row_label`, or `""` when that day has no slot
/// with the same canonical time.
pub fn lookup<'a>(doc: &'a ScheduleDocument, day: Weekday, row_label: &str) -> &'a str {
    find_slot(doc, day, &normalize(row_label))
        .map(|slot| slot.show.as_str())
        .unwrap_or("")
}

/// First slot on `day` whose canonical time equals `key`.
fn find_slot<'a>(doc: &'a ScheduleDocument, day: Weekday, key: &str) -> Option<&'a Slot> {
    doc.day(day)
        .and_then(|d| d.slots.iter().find(|slot| normalize(&slot.time) == key))
}

// ── Grid model ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DayHeader {
    pub day: Weekday,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub day: Weekday,
    /// Raw row label this cell sits under.
    pub time: String,
    pub show: String,
    pub episode: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub time_label: String,
    pub minutes: u32,
    /// Always seven cells, Sunday first.
    pub cells: Vec<GridCell>,
}

/// Row/column address of a cell; `col` is the day index (Sunday = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

/// Rows × days, independent of any rendering target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridModel {
    pub headers: Vec<DayHeader>,
    pub rows: Vec<GridRow>,
}

impl GridModel {
    pub fn build(doc: &ScheduleDocument) -> Self {
        let week_start = parse_date(&doc.week_start);
        let headers = WEEK
            .iter()
            .map(|&day| {
                let listed = doc.day(day).and_then(|d| parse_date(&d.date));
                let derived = week_start.map(|start| start + Duration::days(day.index() as i64));
                DayHeader {
                    day,
                    date: listed.or(derived),
                }
            })
            .collect();

        let rows = collect_time_slots(doc)
            .into_iter()
            .map(|label| {
                let key = normalize(&label);
                let cells = WEEK
                    .iter()
                    .map(|&day| {
                        let slot = find_slot(doc, day, &key);
                        GridCell {
                            day,
                            time: label.clone(),
                            show: slot.map(|s| s.show.clone()).unwrap_or_default(),
                            episode: slot.map(|s| s.episode.clone()).unwrap_or_default(),
                        }
                    })
                    .collect();
                GridRow {
                    minutes: to_minutes(&label),
                    time_label: label,
                    cells,
                }
            })
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell holding the slot `raw_time` on `day`, matched by canonical key.
    pub fn locate(&self, day: Weekday, raw_time: &str) -> Option<GridPosition> {
        let key = normalize(raw_time);
        self.rows
            .iter()
            .position(|row| normalize(&row.time_label) == key)
            .map(|row| GridPosition {
                row,
                col: day.index(),
            })
    }

    /// Last row starting at or before `minute`; the first row when none has
    /// started yet.
    pub fn row_at_or_before(&self, minute: u32) -> Option<usize> {
        if self.rows.is_empty() {
            return None;
        }
        Some(
            self.rows
                .iter()
                .rposition(|row| row.minutes <= minute)
                .unwrap_or(0),
        )
    }

    pub fn cell(&self, pos: GridPosition) -> Option<&GridCell> {
        self.rows.get(pos.row).and_then(|r| r.cells.get(pos.col))
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
