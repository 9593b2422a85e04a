//! View model: display-ready state for every dashboard region.
//!
//! Snapshot renderers write here and the `ui` module draws from here. Each
//! topic owns exactly one field; nothing in this module knows about JSON.

use chrono::{DateTime, Utc};

use crate::types::SshSecurity;
use crate::ui::util::time_ago;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

/// State of one region.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    /// Nothing received for this topic yet.
    Loading,
    /// A snapshot arrived but carried no data; holds the placeholder text.
    Empty(&'static str),
    Ready(T),
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Panel::Loading
    }
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn empty_text(&self) -> Option<&'static str> {
        match self {
            Panel::Empty(s) => Some(s),
            _ => None,
        }
    }
}

impl<T> Panel<Vec<T>> {
    /// `Ready(rows)` or `Empty(placeholder)` when there are no rows.
    pub fn rows(rows: Vec<T>, placeholder: &'static str) -> Self {
        if rows.is_empty() {
            Panel::Empty(placeholder)
        } else {
            Panel::Ready(rows)
        }
    }
}

/// A relative timestamp, formatted at draw time so it keeps ageing between
/// updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ago(pub Option<DateTime<Utc>>);

impl Ago {
    pub fn render(&self, now: DateTime<Utc>) -> String {
        time_ago(self.0, now)
    }
}

// ---------- host ----------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Meter {
    pub label: String,
    /// Bar fill, 0..=100.
    pub fill: f64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GpuView {
    pub fill: f64,
    pub value: String,
    pub info: String,
    pub temp: String,
    pub mem: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostView {
    /// Aggregate CPU, shown as the `AVG` bar.
    pub cpu: Meter,
    pub cores: Vec<Meter>,
    pub memory: Meter,
    pub swap: Meter,
    pub gpu: GpuView,
    pub disks: Vec<Meter>,
    pub ssh_sessions: String,
    pub uptime: String,
}

// ---------- services / streams ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthClass {
    Healthy,
    Unhealthy,
    Starting,
    Running,
    Stopped,
}

impl HealthClass {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthClass::Healthy => "healthy",
            HealthClass::Unhealthy => "unhealthy",
            HealthClass::Starting => "starting",
            HealthClass::Running => "running",
            HealthClass::Stopped => "stopped",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCard {
    pub name: String,
    pub class: HealthClass,
    pub label: &'static str,
    pub uptime: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamRow {
    pub user: String,
    pub title: String,
    pub fill: f64,
    pub percent: String,
    pub client: String,
    pub transcoding: bool,
    pub method: String,
}

// ---------- torrents / downloads / requests ----------

#[derive(Debug, Clone, PartialEq)]
pub struct TorrentRow {
    pub name: String,
    pub full_name: String,
    pub down: String,
    pub up: String,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TorrentsView {
    pub download: String,
    pub upload: String,
    pub ratio: String,
    pub counts: String,
    pub items: Panel<Vec<TorrentRow>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRow {
    pub source: String,
    /// Lower-cased source, used to pick a badge colour.
    pub source_class: String,
    pub title: String,
    pub fill: f64,
    pub percent: String,
    pub timeleft: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestRow {
    pub status: String,
    pub status_class: String,
    pub title: String,
    pub user: String,
    pub requested: Ago,
}

// ---------- transcodes / health / library ----------

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerCard {
    pub file: String,
    pub stats: String,
    /// None for idle workers: no bar is drawn.
    pub fill: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscodesView {
    pub pending: String,
    pub workers: Panel<Vec<WorkerCard>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthRow {
    pub severity: Severity,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryView {
    pub movies: String,
    pub series: String,
    pub episodes: String,
    pub songs: String,
}

// ---------- ssh security ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SshWindow {
    #[default]
    Day,
    Week,
    Month,
}

impl SshWindow {
    pub const ALL: [SshWindow; 3] = [SshWindow::Day, SshWindow::Week, SshWindow::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            SshWindow::Day => "24h",
            SshWindow::Week => "7d",
            SshWindow::Month => "30d",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OffenderRow {
    pub ip: String,
    pub last_seen: Ago,
    pub attempts: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthRow {
    pub user: String,
    pub ip: String,
    pub method: String,
    pub time: Ago,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SshCounters {
    pub accepted: String,
    pub failed: String,
    pub unique_ips: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SshView {
    /// Last payload, kept whole so the window can change without a fetch.
    pub retained: Option<SshSecurity>,
    pub window: SshWindow,
    pub counters: SshCounters,
    pub offenders: Panel<Vec<OffenderRow>>,
    pub recent_failed: Panel<Vec<AuthRow>>,
    pub recent_accepted: Panel<Vec<AuthRow>>,
}

// ---------- operator feedback ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Everything the dashboard shows. Constructed once at startup and owned by
/// the app loop for the whole session.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub connection: ConnectionState,
    pub host: Panel<HostView>,
    pub services: Panel<Vec<ServiceCard>>,
    pub streams: Panel<Vec<StreamRow>>,
    pub torrents: Panel<TorrentsView>,
    pub downloads: Panel<Vec<DownloadRow>>,
    pub requests: Panel<Vec<RequestRow>>,
    pub transcodes: Panel<TranscodesView>,
    pub health: Panel<Vec<HealthRow>>,
    // no placeholder: stays None until a library snapshot arrives
    pub library: Option<LibraryView>,
    pub ssh: SshView,
    pub notice: Option<Notice>,
    pub selected_service: usize,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }
}
