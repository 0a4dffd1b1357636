//! App: the single controller of the schedule viewer.
//!
//! Architecture:
//! - `App` owns the components, the search box, the debounce slot and
//!   `AppState` (read-only for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks (terminal input, schedule loads).
//! - The event loop draws a frame, then awaits the next message or timer.
//! - Key handling produces `Vec<Action>`; App dispatches each Action.

use std::io;
use std::time::Duration;

use chrono::Utc;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use schedule_proto::config::Config;
use schedule_proto::loader::{load_document, LoadError};
use schedule_proto::model::ScheduleDocument;
use schedule_proto::platform;
use schedule_proto::preference::ThemeStore;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{header::Header, schedule_grid::ScheduleGrid},
    debounce::Debouncer,
    theme::palette,
    widgets::{
        banner::draw_banner,
        filter_input::{FilterAction, FilterInput},
        status_bar::{self, InputMode},
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    ScheduleLoaded(Result<ScheduleDocument, LoadError>),
}

pub struct App {
    state: AppState,
    header: Header,
    grid: ScheduleGrid,
    search_input: FilterInput,
    search_debounce: Debouncer<String>,
    theme_store: ThemeStore,
    refresh_interval: Duration,
    tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let theme_store = ThemeStore::new(&config.paths.preferences_file);
        let theme = theme_store.load(platform::os_prefers_dark());
        info!(
            "theme {} (preferences at {})",
            theme.as_str(),
            theme_store.path().display()
        );
        Self {
            state: AppState::new(
                config.source.location.clone(),
                config.clock.tz(),
                theme,
                Utc::now(),
            ),
            header: Header,
            grid: ScheduleGrid::new(),
            search_input: FilterInput::default(),
            search_debounce: Debouncer::new(config.search.debounce()),
            theme_store,
            refresh_interval: config.clock.refresh_interval(),
            tx: None,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        self.spawn_load();

        // ── Periodic timers ───────────────────────────────────────────────────
        // Now-playing re-evaluation; each tick is handled to completion before
        // the next one is awaited.
        let mut now_tick = tokio::time::interval(self.refresh_interval);
        now_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Debounce slot polling.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }

                _ = now_tick.tick() => {
                    if self.state.refresh_now(Utc::now()) {
                        debug!(
                            "[now] {} {:?}",
                            self.state.clock_label,
                            self.state.now_playing.as_ref().map(|n| n.show.as_str())
                        );
                        needs_redraw = true;
                    }
                }

                _ = ui_tick.tick() => {
                    if let Some(term) = self.search_debounce.poll() {
                        self.dispatch(Action::ApplySearch(term));
                        needs_redraw = true;
                    }
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("radio-schedule exiting");

        Ok(())
    }

    fn spawn_load(&mut self) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        if self.state.loading {
            debug!("load already in flight");
            return;
        }
        self.state.loading = true;
        let location = self.state.source.clone();
        tokio::spawn(async move {
            let result = load_document(&location).await;
            let _ = tx.send(AppMessage::ScheduleLoaded(result)).await;
        });
    }

    /// Returns `true` when the screen needs repainting.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    for action in self.handle_key(key) {
                        self.dispatch(action);
                    }
                    true
                }
                Event::Resize(..) => true,
                _ => false,
            },

            AppMessage::ScheduleLoaded(result) => {
                self.state.loading = false;
                match result {
                    Ok(doc) => self.state.apply_document(doc, Utc::now()),
                    Err(e) => self.state.apply_load_error(&e),
                }
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        if self.state.input_mode == InputMode::Search {
            return match self.search_input.handle_key(key) {
                FilterAction::Changed(text) => vec![Action::SearchChanged(text)],
                FilterAction::Cleared => vec![Action::ClearSearch],
                FilterAction::Confirmed | FilterAction::Cancelled => vec![Action::CloseSearch],
                FilterAction::None => vec![],
            };
        }

        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char('/') => vec![Action::OpenSearch],
            KeyCode::Esc if self.search_active() => {
                vec![Action::ClearSearch, Action::OpenSearch]
            }
            KeyCode::Char('x') => vec![Action::ClearSearch],
            KeyCode::Char('t') => vec![Action::ToggleTheme],
            KeyCode::Char('g') => vec![Action::JumpToToday],
            KeyCode::Char('R') => vec![Action::Reload],
            _ => self.grid.handle_key(key, &self.state),
        }
    }

    fn search_active(&self) -> bool {
        self.state.search.is_active()
            || !self.search_input.is_empty()
            || self.search_debounce.is_pending()
    }

    fn dispatch(&mut self, action: Action) {
        match &action {
            Action::Quit => self.should_quit = true,

            Action::OpenSearch => {
                self.state.input_mode = InputMode::Search;
                self.search_input.activate();
            }
            Action::CloseSearch => {
                self.state.input_mode = InputMode::Normal;
                self.search_input.deactivate();
                // Leaving the box runs whatever is still waiting.
                if let Some(term) = self.search_debounce.flush() {
                    self.dispatch(Action::ApplySearch(term));
                }
            }
            Action::SearchChanged(text) => {
                self.search_debounce.schedule(text.clone());
            }
            Action::ApplySearch(term) => {
                self.state.apply_search(term);
                debug!(
                    "[search] {:?}: {}/{} rows",
                    self.state.search.term,
                    self.state.search.visible_count(),
                    self.state.grid.rows.len()
                );
            }
            Action::ClearSearch => {
                self.search_debounce.cancel();
                self.search_input.clear();
                self.state.apply_search("");
            }

            Action::ToggleTheme => match self.theme_store.toggle(self.state.theme) {
                Ok(theme) => self.state.theme = theme,
                Err(e) => {
                    warn!("could not save theme preference: {}", e);
                    self.state.theme = self.state.theme.toggled();
                }
            },
            Action::JumpToToday => {
                self.state.refresh_now(Utc::now());
            }
            Action::Reload => {
                info!("[schedule] reload requested");
                self.spawn_load();
            }

            Action::SelectUp(_)
            | Action::SelectDown(_)
            | Action::SelectFirst
            | Action::SelectLast => {}
        }

        let follow_ups: Vec<Action> = {
            let s = &self.state;
            let mut all = Vec::new();
            all.extend(self.header.on_action(&action, s));
            all.extend(self.grid.on_action(&action, s));
            all
        };
        for a in follow_ups {
            self.dispatch(a);
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let palette = palette(self.state.theme);
        let area = frame.area();

        frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

        // ── Outer layout: header | banner | search | body | statusbar ────────
        let banner_h = if self.state.banner.is_some() { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(banner_h),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.draw(frame, outer[0], false, &self.state);

        if let Some(banner) = &self.state.banner {
            draw_banner(frame, outer[1], banner, palette);
        }

        self.search_input.draw(frame, outer[2], palette);

        let grid_focused = !self.search_input.is_active();
        self.grid.draw(frame, outer[3], grid_focused, &self.state);

        status_bar::draw_separator(frame, outer[4], palette);
        status_bar::draw_keys_bar(
            frame,
            outer[5],
            self.state.input_mode,
            palette,
            self.state.search.visible_count(),
            self.state.grid.rows.len(),
        );
    }
}
