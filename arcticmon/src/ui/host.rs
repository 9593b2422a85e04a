//! Host resources: CPU bars on the left; memory, swap, GPU and disks on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

use crate::ui::theme::{self, usage_color};
use crate::ui::{panel, ready_or_placeholder};
use crate::view::{HostView, Meter, Panel};

const LABEL_W: u16 = 6;

pub fn draw_host(f: &mut ratatui::Frame<'_>, area: Rect, host: &Panel<HostView>) {
    let title = match host.ready() {
        Some(h) => format!("Host ({})", h.ssh_sessions),
        None => "Host".to_string(),
    };
    let inner = panel(f, area, &title);
    if inner.height < 1 || inner.width < 20 {
        return;
    }
    let Some(h) = ready_or_placeholder(f, inner, host) else {
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    // CPU: AVG first, then as many cores as fit
    let cpu_rows = std::iter::once(&h.cpu)
        .chain(h.cores.iter())
        .take(cols[0].height as usize);
    for (i, m) in cpu_rows.enumerate() {
        draw_meter(f, row(cols[0], i), m, 8);
    }

    let right = cols[1];
    let mut y = 0usize;
    for m in [&h.memory, &h.swap] {
        draw_meter(f, row(right, y), m, 24);
        y += 1;
    }

    let gpu = Meter {
        label: "GPU".into(),
        fill: h.gpu.fill,
        value: h.gpu.value.clone(),
    };
    draw_meter(f, row(right, y), &gpu, 24);
    y += 1;
    let details: Vec<&str> = [&h.gpu.info, &h.gpu.temp, &h.gpu.mem]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect();
    if y < right.height as usize {
        let text = details.join("  ");
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(text, theme::dim()))),
            row(right, y),
        );
        y += 1;
    }

    for d in &h.disks {
        if y >= right.height as usize {
            break;
        }
        draw_meter(f, row(right, y), d, 24);
        y += 1;
    }
}

/// One-line slot `i` inside `area`, or a zero-height rect when out of room.
fn row(area: Rect, i: usize) -> Rect {
    let i = i as u16;
    Rect {
        x: area.x,
        y: area.y + i.min(area.height),
        width: area.width,
        height: u16::from(i < area.height),
    }
}

/// `[label] [gauge] [value]` on a single line.
fn draw_meter(f: &mut ratatui::Frame<'_>, area: Rect, m: &Meter, value_w: u16) {
    if area.height == 0 {
        return;
    }
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(LABEL_W),
            Constraint::Min(4),
            Constraint::Length(value_w),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(m.label.clone(), theme::dim())),
        parts[0],
    );
    let g = Gauge::default()
        .ratio(m.fill / 100.0)
        .label("")
        .gauge_style(Style::default().fg(usage_color(m.fill)));
    f.render_widget(g, parts[1]);
    f.render_widget(Paragraph::new(format!(" {}", m.value)), parts[2]);
}
