//! Health warnings reported by the monitored services.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::ui::theme::severity_color;
use crate::ui::{panel, ready_or_placeholder};
use crate::view::{HealthRow, Panel, Severity};

pub fn draw_health(f: &mut ratatui::Frame<'_>, area: Rect, health: &Panel<Vec<HealthRow>>) {
    let title = match health.ready() {
        Some(rows) => format!("Health ({})", rows.len()),
        None => "Health".to_string(),
    };
    let inner = panel(f, area, &title);
    if inner.height < 1 || inner.width < 6 {
        return;
    }
    let Some(rows) = ready_or_placeholder(f, inner, health) else {
        return;
    };

    let lines: Vec<Line> = rows
        .iter()
        .map(|h| {
            let color = severity_color(h.severity);
            let icon = match h.severity {
                Severity::Error => "✖ ",
                Severity::Warning => "⚠ ",
            };
            Line::from(vec![
                Span::styled(icon, Style::default().fg(color)),
                Span::styled(
                    format!("{}: ", h.source),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(h.message.clone()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
