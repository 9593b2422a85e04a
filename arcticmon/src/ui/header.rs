//! Top header: title, live-stream indicator and the wall clock.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::{self, ACCENT};
use crate::view::View;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, view: &View, now: DateTime<Local>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(area);

    let (color, label) = theme::connection(view.connection);
    let mut spans = vec![
        Span::styled(
            "Arctic Monitor",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color)),
    ];
    if let Some(h) = view.host.ready() {
        spans.push(Span::styled(format!("  up {}", h.uptime), theme::dim()));
    }
    spans.push(Span::styled("  (press 'q' to quit)", theme::dim()));
    f.render_widget(Paragraph::new(Line::from(spans)), cols[0]);

    let clock = now.format("%H:%M:%S").to_string();
    f.render_widget(Paragraph::new(clock).right_aligned(), cols[1]);
}
