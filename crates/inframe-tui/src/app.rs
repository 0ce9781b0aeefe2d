//! Application state and logic

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use inframe_api::ResourceKind;
use inframe_client::{ApiError, DashboardConfig, ErrorKind, HttpClient};
use inframe_table::{Navigator, Record, RecordTable};
use serde_json::Value;

use crate::action::Action;

/// Maximum number of event log entries kept
const EVENT_LOG_CAPACITY: usize = 100;

/// UI focus state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    Records,
    Details,
    Events,
}

/// Which keys the app is listening for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Confirm,
    Error,
}

/// Event log entry
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub level: EventLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventLevel {
    Info,
    Success,
    Error(ErrorKind),
}

/// Routes reached through row activation
#[derive(Debug, Default)]
pub struct RouteHistory {
    visited: Vec<String>,
}

impl RouteHistory {
    /// Most recent route
    pub fn current(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }

    /// Drop the most recent route
    fn back(&mut self) -> Option<String> {
        self.visited.pop()
    }

    /// Drop the route before the most recent one
    fn drop_previous(&mut self) {
        if let Some(index) = self.visited.len().checked_sub(2) {
            self.visited.remove(index);
        }
    }
}

impl Navigator for RouteHistory {
    fn navigate(&mut self, route: &str) {
        self.visited.push(route.to_string());
    }
}

/// Record loaded for the detail panel
#[derive(Debug, Clone)]
pub struct DetailView {
    pub kind: ResourceKind,
    pub id: String,
    pub value: Value,
}

/// Record awaiting delete confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub kind: ResourceKind,
    pub id: String,
}

/// Application state
pub struct App {
    /// Backend URL
    server_url: String,
    /// HTTP client
    http_client: Option<HttpClient>,
    /// Words shown per cell
    word_limit: usize,
    /// Should quit
    should_quit: bool,
    /// Current focus
    pub focus: Focus,
    /// Current screen
    pub screen: ResourceKind,
    /// Record table for the current screen
    pub table: RecordTable,
    /// Selected row of the filtered view
    pub selected: usize,
    /// Activated routes
    pub routes: RouteHistory,
    /// Record shown in the detail panel
    pub detail: Option<DetailView>,
    /// Event log
    pub event_log: VecDeque<EventLogEntry>,
    /// Show help popup
    pub show_help: bool,
    /// Search mode active
    pub search_active: bool,
    /// Last failed action, shown until dismissed
    pub error: Option<ApiError>,
    /// Delete waiting for confirmation
    pub pending_delete: Option<PendingDelete>,
    /// Tick counter for animations
    pub tick: u64,
}

impl App {
    /// Create a new application
    pub fn new(config: &DashboardConfig) -> Self {
        let screen = ResourceKind::AboutUs;
        Self {
            server_url: config.api.base_url.clone(),
            http_client: None,
            word_limit: config.ui.word_limit,
            should_quit: false,
            focus: Focus::Records,
            screen,
            table: table_for(screen, config.ui.word_limit),
            selected: 0,
            routes: RouteHistory::default(),
            detail: None,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            show_help: false,
            search_active: false,
            error: None,
            pending_delete: None,
            tick: 0,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Backend URL shown in the status bar
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Which keys are currently accepted
    pub fn input_mode(&self) -> InputMode {
        if self.error.is_some() {
            InputMode::Error
        } else if self.pending_delete.is_some() {
            InputMode::Confirm
        } else if self.search_active {
            InputMode::Search
        } else {
            InputMode::Normal
        }
    }

    /// Create the client and load the first screen
    ///
    /// A bad backend URL or an unreachable backend is reported in the UI, not
    /// returned.
    pub async fn connect(&mut self) {
        match HttpClient::new(&self.server_url) {
            Ok(client) => {
                self.http_client = Some(client);
                self.log_event(&format!("Using backend {}", self.server_url), EventLevel::Info);
                self.switch_screen(self.screen).await;
            }
            Err(err) => self.report(err),
        }
    }

    /// Log an event
    fn log_event(&mut self, message: &str, level: EventLevel) {
        let entry = EventLogEntry {
            timestamp: Utc::now(),
            message: message.to_string(),
            level,
        };
        self.event_log.push_front(entry);
        if self.event_log.len() > EVENT_LOG_CAPACITY {
            self.event_log.pop_back();
        }
    }

    /// Show a failed action and log it; other state is left as it was
    fn report(&mut self, err: ApiError) {
        tracing::warn!(kind = %err.kind(), status = ?err.status(), "{err}");
        self.log_event(err.message(), EventLevel::Error(err.kind()));
        self.error = Some(err);
    }

    /// Handle an action
    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            Action::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::Down => {
                if self.selected < self.table.visible_len().saturating_sub(1) {
                    self.selected += 1;
                }
            }
            Action::First => {
                self.selected = 0;
            }
            Action::Last => {
                self.selected = self.table.visible_len().saturating_sub(1);
            }
            Action::Select => {
                self.activate_selected().await;
            }
            Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else if self.pending_delete.is_some() {
                    self.pending_delete = None;
                    self.log_event("Delete cancelled", EventLevel::Info);
                } else if self.search_active {
                    self.search_active = false;
                } else {
                    self.close_detail();
                }
            }
            Action::Help => {
                self.show_help = !self.show_help;
            }
            Action::NextScreen => {
                let next = cycle(self.screen, 1);
                self.switch_screen(next).await;
            }
            Action::PrevScreen => {
                let prev = cycle(self.screen, ResourceKind::ALL.len() - 1);
                self.switch_screen(prev).await;
            }
            Action::Screen(kind) => {
                if kind != self.screen {
                    self.switch_screen(kind).await;
                }
            }
            Action::Refresh => {
                self.refresh().await;
            }
            Action::Delete => {
                if let Some(record) = self.selected_record() {
                    self.pending_delete = Some(PendingDelete {
                        kind: self.screen,
                        id: record.id().to_string(),
                    });
                }
            }
            Action::ConfirmDelete => {
                self.delete_pending().await;
            }
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Records => Focus::Details,
                    Focus::Details => Focus::Events,
                    Focus::Events => Focus::Records,
                };
            }
            Action::StartSearch => {
                self.search_active = true;
            }
            Action::SearchInput(c) => {
                if self.search_active {
                    let mut query = self.table.search().to_string();
                    query.push(c);
                    self.set_search(query);
                }
            }
            Action::SearchBackspace => {
                if self.search_active {
                    let mut query = self.table.search().to_string();
                    query.pop();
                    self.set_search(query);
                }
            }
            Action::ClearSearch => {
                self.set_search(String::new());
            }
            Action::DismissError => {
                self.error = None;
            }
            Action::Render | Action::None => {}
        }
    }

    fn set_search(&mut self, query: String) {
        self.table.set_search(query);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.table.visible_len().saturating_sub(1));
    }

    /// Currently selected record
    pub fn selected_record(&self) -> Option<&Record> {
        self.table.visible(self.selected)
    }

    /// Replace the current screen's records, keeping search text
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.table.set_records(records);
        self.clamp_selection();
    }

    /// Load `kind` and switch to it only once its records arrived
    async fn switch_screen(&mut self, kind: ResourceKind) {
        let Some(client) = self.http_client.clone() else {
            return;
        };

        match client.list_records(kind).await {
            Ok(records) => {
                let count = records.len();
                let mut table = table_for(kind, self.word_limit);
                table.set_records(records);

                self.screen = kind;
                self.table = table;
                self.selected = 0;
                self.search_active = false;
                self.close_detail();
                self.log_event(
                    &format!("Loaded {count} {} records", kind.label()),
                    EventLevel::Info,
                );
            }
            Err(err) => self.report(err),
        }
    }

    async fn refresh(&mut self) {
        let Some(client) = self.http_client.clone() else {
            return;
        };

        match client.list_records(self.screen).await {
            Ok(records) => {
                let count = records.len();
                self.set_records(records);
                self.log_event(&format!("Refreshed {count} records"), EventLevel::Success);
            }
            Err(err) => self.report(err),
        }
    }

    /// Close the detail panel along with its route
    fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.routes.back();
        }
    }

    /// Activate the selected row and load the record behind its route
    ///
    /// The route stays in the history only while its record is shown; a new
    /// record replaces the open one.
    async fn activate_selected(&mut self) {
        let replacing = self.detail.is_some();
        let Some(route) = self.table.activate(self.selected, &mut self.routes) else {
            return;
        };

        match self.fetch_detail(&route).await {
            Ok(detail) => {
                if replacing {
                    self.routes.drop_previous();
                }
                self.detail = Some(detail);
                self.focus = Focus::Details;
            }
            Err(err) => {
                self.routes.back();
                if let Some(err) = err {
                    self.report(err);
                }
            }
        }
    }

    async fn fetch_detail(&self, route: &str) -> std::result::Result<DetailView, Option<ApiError>> {
        let Some((kind, id)) = ResourceKind::parse_route(route) else {
            tracing::warn!(route, "route does not resolve to a record");
            return Err(None);
        };
        let client = self.http_client.as_ref().ok_or(None)?;
        let value = client.get_raw(kind, &id).await.map_err(Some)?;
        Ok(DetailView { kind, id, value })
    }

    async fn delete_pending(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        let Some(client) = self.http_client.clone() else {
            return;
        };

        match client.delete(pending.kind, &pending.id).await {
            Ok(()) => {
                self.log_event(
                    &format!("Deleted {} {}", pending.kind.label(), pending.id),
                    EventLevel::Success,
                );
                if self.detail.as_ref().is_some_and(|d| d.id == pending.id) {
                    self.close_detail();
                }
                self.refresh().await;
            }
            Err(err) => self.report(err),
        }
    }
}

fn table_for(kind: ResourceKind, word_limit: usize) -> RecordTable {
    RecordTable::new(kind.columns(), kind.base_route()).with_word_limit(word_limit)
}

fn cycle(kind: ResourceKind, step: usize) -> ResourceKind {
    let all = ResourceKind::ALL;
    let index = all.iter().position(|k| *k == kind).unwrap_or(0);
    all[(index + step) % all.len()]
}
