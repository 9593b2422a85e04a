//! Container cards: one line per service with a health dot and label.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::{self, health_color};
use crate::ui::{fit, panel, ready_or_placeholder};
use crate::view::{Panel, ServiceCard};

const NAME_W: usize = 18;

pub fn draw_services(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    services: &Panel<Vec<ServiceCard>>,
    selected: usize,
) {
    let title = match services.ready() {
        Some(s) => format!("Services ({})", s.len()),
        None => "Services".to_string(),
    };
    let inner = panel(f, area, &title);
    if inner.height < 1 || inner.width < 10 {
        return;
    }
    let Some(cards) = ready_or_placeholder(f, inner, services) else {
        return;
    };

    // keep the selected card in view
    let viewport = inner.height as usize;
    let offset = selected.saturating_sub(viewport.saturating_sub(1));

    let lines: Vec<Line> = cards
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport)
        .map(|(i, c)| {
            let color = health_color(c.class);
            let mut spans = vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::raw(format!("{:<w$} ", fit(&c.name, NAME_W), w = NAME_W)),
                Span::styled(format!("{:<9}", c.label), Style::default().fg(color)),
                Span::styled(format!(" {}", c.uptime), theme::dim()),
            ];
            if c.link.is_some() {
                spans.push(Span::styled(" ↗", Style::default().fg(theme::ACCENT)));
            }
            let line = Line::from(spans);
            if i == selected {
                line.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
