//! Recent media requests.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::{self, request_color};
use crate::ui::{fit, panel, ready_or_placeholder};
use crate::view::{Panel, RequestRow};

pub fn draw_requests(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    requests: &Panel<Vec<RequestRow>>,
    now: DateTime<Utc>,
) {
    let inner = panel(f, area, "Requests");
    if inner.height < 1 || inner.width < 10 {
        return;
    }
    let Some(rows) = ready_or_placeholder(f, inner, requests) else {
        return;
    };

    let width = inner.width as usize;
    let mut lines = Vec::with_capacity(rows.len() * 2);
    for r in rows.iter().take(inner.height as usize / 2) {
        let badge = format!("[{}] ", r.status);
        let title_w = width.saturating_sub(badge.chars().count());
        lines.push(Line::from(vec![
            Span::styled(badge, Style::default().fg(request_color(&r.status_class))),
            Span::raw(fit(&r.title, title_w)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {} · {}", r.user, r.requested.render(now)),
            theme::dim(),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}
