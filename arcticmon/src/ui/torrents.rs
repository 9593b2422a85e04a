//! Torrent client summary and the busiest torrents.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme;
use crate::ui::{fit, panel, ready_or_placeholder, stat};
use crate::view::{Panel, TorrentsView};

pub fn draw_torrents(f: &mut ratatui::Frame<'_>, area: Rect, torrents: &Panel<TorrentsView>) {
    let inner = panel(f, area, "Torrents");
    if inner.height < 1 || inner.width < 10 {
        return;
    }
    let Some(t) = ready_or_placeholder(f, inner, torrents) else {
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let mut speeds = stat("↓", &t.download, Style::default().fg(Color::Green));
    speeds.extend(stat("↑", &t.upload, Style::default().fg(Color::Cyan)));
    let mut totals = stat("Ratio", &t.ratio, Style::default());
    totals.extend(stat("A/S/T", &t.counts, Style::default()));
    f.render_widget(
        Paragraph::new(vec![Line::from(speeds), Line::from(totals)]),
        parts[0],
    );

    let list = parts[1];
    let Some(items) = ready_or_placeholder(f, list, &t.items) else {
        return;
    };
    let width = list.width as usize;
    let lines: Vec<Line> = items
        .iter()
        .take(list.height as usize)
        .map(|r| {
            let stats = format!(" ↓{} ↑{} {}", r.down, r.up, r.percent);
            let name_w = width.saturating_sub(stats.chars().count());
            Line::from(vec![
                Span::raw(format!("{:<w$}", fit(&r.name, name_w), w = name_w)),
                Span::styled(stats, theme::dim()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list);
}
