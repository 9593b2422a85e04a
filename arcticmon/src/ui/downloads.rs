//! Download queue: source badge, title, progress and time left.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::{self, source_color};
use crate::ui::{fit, mini_bar, panel, ready_or_placeholder};
use crate::view::{DownloadRow, Panel};

pub fn draw_downloads(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    downloads: &Panel<Vec<DownloadRow>>,
) {
    let inner = panel(f, area, "Downloads");
    if inner.height < 1 || inner.width < 10 {
        return;
    }
    let Some(rows) = ready_or_placeholder(f, inner, downloads) else {
        return;
    };

    // two lines per item: badge + title, then bar + eta
    let width = inner.width as usize;
    let mut lines = Vec::with_capacity(rows.len() * 2);
    for d in rows.iter().take(inner.height as usize / 2) {
        let badge = format!("[{}] ", d.source);
        let title_w = width.saturating_sub(badge.chars().count());
        lines.push(Line::from(vec![
            Span::styled(
                badge,
                Style::default()
                    .fg(source_color(&d.source_class))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(fit(&d.title, title_w)),
        ]));
        let tail = format!(" {:>6} {}", d.percent, d.timeleft);
        let bar_w = width.saturating_sub(tail.chars().count()).min(20);
        lines.push(Line::from(vec![
            Span::styled(mini_bar(d.fill, bar_w), Style::default().fg(theme::ACCENT)),
            Span::styled(tail, theme::dim()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}
