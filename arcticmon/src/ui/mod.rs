//! UI module root: screen layout plus shared drawing helpers. Each panel
//! lives in its own file and draws one region of the [`View`].

pub mod confirm;
pub mod downloads;
pub mod footer;
pub mod header;
pub mod health;
pub mod host;
pub mod library;
pub mod requests;
pub mod services;
pub mod ssh;
pub mod streams;
pub mod theme;
pub mod torrents;
pub mod transcodes;
pub mod util;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

use crate::actions::ActionInvoker;
use crate::view::{Panel, View};
use theme::dim;

/// Draw the whole dashboard for one frame.
pub fn draw(
    f: &mut ratatui::Frame<'_>,
    view: &View,
    actions: &ActionInvoker,
    now: DateTime<Local>,
) {
    let utc = now.with_timezone(&Utc);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(36),
            Constraint::Percentage(28),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::draw_header(f, rows[0], view, now);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);
    host::draw_host(f, top[0], &view.host);
    services::draw_services(f, top[1], &view.services, view.selected_service);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(rows[2]);
    streams::draw_streams(f, middle[0], &view.streams);
    torrents::draw_torrents(f, middle[1], &view.torrents);
    downloads::draw_downloads(f, middle[2], &view.downloads);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(24),
            Constraint::Percentage(24),
            Constraint::Percentage(20),
            Constraint::Percentage(32),
        ])
        .split(rows[3]);
    requests::draw_requests(f, bottom[0], &view.requests, utc);
    let media = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(4)])
        .split(bottom[1]);
    transcodes::draw_transcodes(f, media[0], &view.transcodes);
    library::draw_library(f, media[1], view.library.as_ref());
    health::draw_health(f, bottom[2], &view.health);
    ssh::draw_ssh(f, bottom[3], &view.ssh, utc);

    footer::draw_footer(f, rows[4], view.notice.as_ref(), actions);

    if let Some(p) = actions.pending() {
        let area = f.area();
        confirm::draw_confirm(f, area, p);
    }
}

/// Bordered panel with a title; returns the inner area.
pub(crate) fn panel(f: &mut ratatui::Frame<'_>, area: Rect, title: &str) -> Rect {
    f.render_widget(
        Block::default().borders(Borders::ALL).title(title.to_string()),
        area,
    );
    inner(area)
}

pub(crate) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Draw the placeholder for a region that has no rows yet. Returns the data
/// when the region is ready.
pub(crate) fn ready_or_placeholder<'a, T>(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    panel: &'a Panel<T>,
) -> Option<&'a T> {
    let text = match panel {
        Panel::Ready(v) => return Some(v),
        Panel::Loading => "Loading...",
        Panel::Empty(s) => *s,
    };
    if area.height > 0 {
        f.render_widget(Paragraph::new(text).style(dim()), area);
    }
    None
}

/// A text progress bar `█████░░░░░` of the given width.
pub(crate) fn mini_bar(fill: f64, width: usize) -> String {
    let filled = ((fill / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let mut s = "█".repeat(filled);
    s.push_str(&"░".repeat(width - filled));
    s
}

/// Dimmed `label` followed by `value`.
pub(crate) fn stat<'a>(label: &'a str, value: &'a str, style: Style) -> Vec<Span<'a>> {
    vec![
        Span::styled(label, dim()),
        Span::raw(" "),
        Span::styled(value, style),
        Span::raw("  "),
    ]
}

/// Fit `s` to `width` columns, cutting with "..." at the end.
pub(crate) fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width <= 3 {
        return s.chars().take(width).collect();
    }
    util::truncate(s, width - 3)
}
