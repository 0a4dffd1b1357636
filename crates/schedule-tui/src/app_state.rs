//! AppState: everything derived from the loaded schedule and the clock.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use schedule_proto::html::PageView;
use schedule_proto::loader::{Banner, LoadError};
use schedule_proto::model::{ScheduleDocument, Weekday};
use schedule_proto::now::{current_weekday_and_minute, find_current_show, NowPlaying, WallClock};
use schedule_proto::preference::Theme;
use schedule_proto::projection::{GridModel, GridPosition};
use schedule_proto::search::{filter, SearchView};

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Schedule ────────────────────────────────────────────────────────────
    pub source: String,
    pub document: Option<ScheduleDocument>,
    pub grid: GridModel,
    pub search: SearchView,
    pub banner: Option<Banner>,
    /// A load is in flight.
    pub loading: bool,

    // ── Clock ───────────────────────────────────────────────────────────────
    pub tz: Tz,
    pub clock: WallClock,
    /// "Mon 10:05 AM EST" in the station timezone.
    pub clock_label: String,
    pub now_playing: Option<NowPlaying>,
    pub now_cell: Option<GridPosition>,

    // ── UI ──────────────────────────────────────────────────────────────────
    pub theme: Theme,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn new(source: impl Into<String>, tz: Tz, theme: Theme, now: DateTime<Utc>) -> Self {
        let mut state = Self {
            source: source.into(),
            document: None,
            grid: GridModel::default(),
            search: SearchView::default(),
            banner: None,
            loading: false,
            tz,
            clock: current_weekday_and_minute(now, tz),
            clock_label: String::new(),
            now_playing: None,
            now_cell: None,
            theme,
            input_mode: InputMode::Normal,
        };
        state.refresh_now(now);
        state
    }

    /// Install a freshly loaded document. The active search term is re-run
    /// against the new grid and a previous load-failure banner is replaced.
    pub fn apply_document(&mut self, doc: ScheduleDocument, now: DateTime<Utc>) {
        self.grid = GridModel::build(&doc);
        self.banner = Banner::for_document(&doc);
        self.document = Some(doc);
        let term = self.search.term.clone();
        self.apply_search(&term);
        self.refresh_now(now);
    }

    /// A failed load keeps whatever grid is already on screen.
    pub fn apply_load_error(&mut self, err: &LoadError) {
        self.banner = Some(Banner::from(err));
    }

    pub fn apply_search(&mut self, term: &str) {
        self.search = filter(&self.grid, term);
    }

    /// Re-resolve the station clock and the now-playing cell.
    /// Returns `true` when anything shown on screen changed.
    pub fn refresh_now(&mut self, now: DateTime<Utc>) -> bool {
        let clock = current_weekday_and_minute(now, self.tz);
        let now_playing = self
            .document
            .as_ref()
            .and_then(|doc| find_current_show(doc, clock.weekday, clock.minute_of_day));
        let now_cell = now_playing
            .as_ref()
            .and_then(|np| self.grid.locate(clock.weekday, &np.start_time));
        let clock_label = now
            .with_timezone(&self.tz)
            .format("%a %-I:%M %p %Z")
            .to_string();

        let changed = clock != self.clock
            || now_playing != self.now_playing
            || now_cell != self.now_cell
            || clock_label != self.clock_label;
        self.clock = clock;
        self.now_playing = now_playing;
        self.now_cell = now_cell;
        self.clock_label = clock_label;
        changed
    }

    pub fn today(&self) -> Weekday {
        self.clock.weekday
    }

    /// Row "jump to today" lands on: the now-playing row, otherwise the last
    /// row that has started by the current minute.
    pub fn today_row(&self) -> Option<usize> {
        self.now_cell
            .map(|cell| cell.row)
            .or_else(|| self.grid.row_at_or_before(self.clock.minute_of_day))
    }

    pub fn week_label(&self) -> Option<String> {
        self.document.as_ref().and_then(|d| d.week_label())
    }

    pub fn last_updated(&self) -> Option<String> {
        self.document.as_ref().and_then(|d| d.last_updated_in(self.tz))
    }

    /// The same view, handed to the HTML paint target.
    pub fn page_view(&self) -> PageView<'_> {
        PageView {
            grid: &self.grid,
            search: &self.search,
            now_playing: self.now_cell,
            today: Some(self.today()),
            theme: self.theme,
            banner: self.banner.as_ref(),
            week_label: self.week_label(),
            last_updated: self.last_updated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use schedule_proto::html::render_page;
    use schedule_proto::loader::parse_document;
    use schedule_proto::model::{DaySchedule, Slot};

    fn doc() -> ScheduleDocument {
        ScheduleDocument {
            week_start: "2025-01-05".into(),
            week_end: "2025-01-11".into(),
            last_updated: "2025-01-05T06:00:00Z".into(),
            schedule: vec![
                DaySchedule::new(
                    Weekday::Monday,
                    vec![
                        Slot::new("9:00 AM", "A"),
                        Slot::new("11:00 AM", "B"),
                        Slot::new("8 PM", "Jazz After Dark"),
                    ],
                ),
                DaySchedule::new(Weekday::Tuesday, vec![Slot::new("6 AM", "Early Jazz")]),
            ],
            ..Default::default()
        }
    }

    // Monday 2025-01-06, 10:00 in New York.
    fn monday_ten() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 15, 0, 0).unwrap()
    }

    fn state() -> AppState {
        AppState::new(
            "schedule.json",
            chrono_tz::America::New_York,
            Theme::Light,
            monday_ten(),
        )
    }

    #[test]
    fn test_apply_document_resolves_now_playing() {
        let mut s = state();
        assert_eq!(s.now_playing, None);
        s.apply_document(doc(), monday_ten());

        assert_eq!(s.grid.rows.len(), 4);
        assert_eq!(s.search.visible_count(), 4);
        assert_eq!(s.now_playing.as_ref().map(|n| n.show.as_str()), Some("A"));
        assert_eq!(s.now_cell, Some(GridPosition { row: 1, col: 1 }));
        assert_eq!(s.today_row(), Some(1));
        assert_eq!(s.clock_label, "Mon 10:00 AM EST");
        assert_eq!(s.banner, None);
    }

    #[test]
    fn test_refresh_now_reports_changes() {
        let mut s = state();
        s.apply_document(doc(), monday_ten());
        assert!(!s.refresh_now(monday_ten()));

        // 11:30 AM: B has started.
        let later = monday_ten() + chrono::Duration::minutes(90);
        assert!(s.refresh_now(later));
        assert_eq!(s.now_playing.as_ref().map(|n| n.show.as_str()), Some("B"));
        assert_eq!(s.now_cell, Some(GridPosition { row: 2, col: 1 }));
    }

    #[test]
    fn test_today_row_without_current_show() {
        let mut s = state();
        s.apply_document(doc(), monday_ten());
        // Tuesday 7 AM: Early Jazz started at 6 AM.
        let tuesday = Utc.with_ymd_and_hms(2025, 1, 7, 12, 0, 0).unwrap();
        s.refresh_now(tuesday);
        assert_eq!(s.today(), Weekday::Tuesday);
        assert_eq!(s.today_row(), Some(0));

        // Wednesday noon: nothing listed, fall back to the last row started.
        let wednesday = Utc.with_ymd_and_hms(2025, 1, 8, 17, 0, 0).unwrap();
        s.refresh_now(wednesday);
        assert_eq!(s.now_playing, None);
        assert_eq!(s.today_row(), Some(2));
    }

    #[test]
    fn test_search_survives_reload() {
        let mut s = state();
        s.apply_document(doc(), monday_ten());
        s.apply_search("jazz");
        assert_eq!(s.search.visible_count(), 2);

        s.apply_document(doc(), monday_ten());
        assert_eq!(s.search.term, "jazz");
        assert_eq!(s.search.visible_count(), 2);
    }

    #[test]
    fn test_load_failure_then_successful_reload() {
        let mut s = state();
        s.apply_document(doc(), monday_ten());

        let err = parse_document(b"not json").unwrap_err();
        s.apply_load_error(&err);
        assert_eq!(s.banner, Some(Banner::LoadFailure));
        assert_eq!(s.grid.rows.len(), 4);

        s.apply_document(doc(), monday_ten());
        assert_eq!(s.banner, None);

        let mut reported = doc();
        reported.error = Some("Could not fetch schedule source page".into());
        s.apply_document(reported, monday_ten());
        assert_eq!(
            s.banner,
            Some(Banner::SourceReported(
                "Could not fetch schedule source page".into()
            ))
        );
    }

    #[test]
    fn test_page_view_renders() {
        let mut s = state();
        s.theme = Theme::Dark;
        s.apply_document(doc(), monday_ten());
        let html = render_page(&s.page_view());
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("Jan 5 – Jan 11, 2025"));
        assert!(html.contains("Last updated Sun Jan 5, 1:00 AM EST"));
        assert!(html.contains("class=\"now-playing today\">A</td>"));
    }
}
