//! Active playback sessions table.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    widgets::{Cell, Row, Table},
};

use crate::ui::theme;
use crate::ui::{mini_bar, panel, ready_or_placeholder};
use crate::view::{Panel, StreamRow};

const COLS: [Constraint; 5] = [
    Constraint::Length(12),     // User
    Constraint::Percentage(40), // Title
    Constraint::Length(15),     // Progress
    Constraint::Length(12),     // Client
    Constraint::Length(14),     // Method
];

pub fn draw_streams(f: &mut ratatui::Frame<'_>, area: Rect, streams: &Panel<Vec<StreamRow>>) {
    let title = match streams.ready() {
        Some(s) => format!("Streams ({})", s.len()),
        None => "Streams".to_string(),
    };
    let inner = panel(f, area, &title);
    if inner.height < 1 || inner.width < 10 {
        return;
    }
    let Some(rows) = ready_or_placeholder(f, inner, streams) else {
        return;
    };

    let body = rows.iter().map(|s| {
        let (icon, method_fg) = if s.transcoding {
            ("⚙ ", Color::Yellow)
        } else {
            ("✓ ", Color::Green)
        };
        Row::new(vec![
            Cell::from(s.user.clone()),
            Cell::from(s.title.clone()),
            Cell::from(format!("{} {:>4}", mini_bar(s.fill, 10), s.percent))
                .style(Style::default().fg(theme::ACCENT)),
            Cell::from(s.client.clone()).style(theme::dim()),
            Cell::from(format!("{icon}{}", s.method)).style(Style::default().fg(method_fg)),
        ])
    });
    let header = Row::new(vec!["User", "Title", "Progress", "Client", "Method"])
        .style(theme::header_row());

    let table = Table::new(body, COLS.to_vec())
        .header(header)
        .column_spacing(1);
    f.render_widget(table, inner);
}
