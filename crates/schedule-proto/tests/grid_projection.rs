mod common;

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use schedule_proto::model::{Weekday, WEEK};
use schedule_proto::now::{current_weekday_and_minute, find_current_show};
use schedule_proto::projection::{collect_time_slots, lookup, GridModel, GridPosition};
use schedule_proto::search::filter;
use schedule_proto::time::{normalize, to_minutes};

#[test]
fn rows_are_sorted_and_unique_by_canonical_key() {
    let doc = common::week();
    let labels = collect_time_slots(&doc);

    let minutes: Vec<u32> = labels.iter().map(|l| to_minutes(l)).collect();
    assert!(minutes.windows(2).all(|w| w[0] <= w[1]), "{:?}", labels);

    let keys: HashSet<String> = labels.iter().map(|l| normalize(l)).collect();
    assert_eq!(keys.len(), labels.len());

    // First-seen spelling is the label.
    assert_eq!(
        labels,
        vec!["12 AM", "9 AM", "11:00 AM", "12:00 PM", "1 PM", "1:30 PM"]
    );
}

#[test]
fn lookup_matches_across_spellings() {
    let doc = common::week();
    assert_eq!(lookup(&doc, Weekday::Monday, "9 AM"), "A");
    assert_eq!(lookup(&doc, Weekday::Tuesday, "9:00 AM"), "The Jazz Singer");
    assert_eq!(lookup(&doc, Weekday::Thursday, "11:00 AM"), "Dragnet");
    assert_eq!(lookup(&doc, Weekday::Wednesday, "9 AM"), "");
    assert_eq!(lookup(&doc, Weekday::Saturday, "1 PM"), "");
}

#[test]
fn every_row_spans_the_whole_week() {
    let doc = common::week();
    let grid = GridModel::build(&doc);
    assert_eq!(grid.rows.len(), 6);
    for row in &grid.rows {
        let days: Vec<Weekday> = row.cells.iter().map(|c| c.day).collect();
        assert_eq!(days, WEEK.to_vec());
        for cell in &row.cells {
            assert_eq!(cell.show, lookup(&doc, cell.day, &row.time_label));
        }
    }
    assert_eq!(grid.rows[1].cells[0].episode, "Ep. 12");
}

#[test]
fn now_playing_lands_on_its_grid_cell() {
    let doc = common::week();
    let grid = GridModel::build(&doc);

    // Monday 2025-01-06 10:00 in New York = 15:00 UTC.
    let now = Utc.with_ymd_and_hms(2025, 1, 6, 15, 0, 0).unwrap();
    let clock = current_weekday_and_minute(now, chrono_tz::America::New_York);
    assert_eq!(clock.weekday, Weekday::Monday);
    assert_eq!(clock.minute_of_day, 600);

    let playing = find_current_show(&doc, clock.weekday, clock.minute_of_day).unwrap();
    assert_eq!(playing.show, "A");
    assert_eq!(playing.start_time, "9:00 AM");
    assert_eq!(
        grid.locate(clock.weekday, &playing.start_time),
        Some(GridPosition { row: 1, col: 1 })
    );
}

#[test]
fn search_for_jazz_then_clear() {
    let grid = GridModel::build(&common::week());

    let view = filter(&grid, "JaZz");
    let visible: Vec<usize> = view.visible_rows().collect();
    assert_eq!(visible, vec![1]);
    for (i, row) in view.rows.iter().enumerate() {
        let has_jazz = grid.rows[i]
            .cells
            .iter()
            .any(|c| c.show.to_lowercase().contains("jazz"));
        assert_eq!(row.visible, has_jazz);
    }
    assert_eq!(
        view.rows[1].cells.iter().filter(|c| c.is_highlighted()).count(),
        2
    );

    let cleared = filter(&grid, "");
    assert_eq!(cleared.visible_count(), grid.rows.len());
    assert!(cleared
        .rows
        .iter()
        .flat_map(|r| r.cells.iter())
        .all(|c| !c.is_highlighted()));
}

#[test]
fn empty_shows_never_match() {
    let grid = GridModel::build(&common::week());
    // Friday 1 PM has an empty show; only Sunday's Gunsmoke keeps the row.
    let view = filter(&grid, "gun");
    assert_eq!(view.visible_rows().collect::<Vec<_>>(), vec![4]);
    assert!(!view.rows[4].cells[5].is_highlighted());
}
