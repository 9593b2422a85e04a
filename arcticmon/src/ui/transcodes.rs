//! Transcode workers with per-worker progress gauges.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

use crate::ui::theme;
use crate::ui::{fit, panel, ready_or_placeholder};
use crate::view::{Panel, TranscodesView};

pub fn draw_transcodes(f: &mut ratatui::Frame<'_>, area: Rect, t: &Panel<TranscodesView>) {
    let title = match t.ready() {
        Some(v) => format!("Transcodes ({})", v.pending),
        None => "Transcodes".to_string(),
    };
    let inner = panel(f, area, &title);
    if inner.height < 1 || inner.width < 10 {
        return;
    }
    let Some(v) = ready_or_placeholder(f, inner, t) else {
        return;
    };
    let Some(workers) = ready_or_placeholder(f, inner, &v.workers) else {
        return;
    };

    let width = inner.width as usize;
    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for w in workers {
        if y >= bottom {
            break;
        }
        let line = Line::from(vec![
            Span::raw(fit(&w.file, width.saturating_sub(w.stats.chars().count() + 1))),
            Span::raw(" "),
            Span::styled(w.stats.clone(), theme::dim()),
        ]);
        let slot = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: 1,
        };
        f.render_widget(Paragraph::new(line), slot);
        y += 1;

        // idle workers get no bar
        let Some(fill) = w.fill else { continue };
        if y >= bottom {
            break;
        }
        let g = Gauge::default()
            .ratio(fill / 100.0)
            .label("")
            .gauge_style(Style::default().fg(theme::ACCENT));
        f.render_widget(g, Rect { y, ..slot });
        y += 1;
    }
}
