//! SSH security: window tabs, counters, top offenders and recent logins.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::ui::theme::{self, ACCENT};
use crate::ui::{inner, ready_or_placeholder, stat};
use crate::view::{AuthRow, Panel, SshView, SshWindow};

pub fn draw_ssh(f: &mut ratatui::Frame<'_>, area: Rect, ssh: &SshView, now: DateTime<Utc>) {
    let mut title = vec![Span::raw("SSH Security ")];
    for (i, w) in SshWindow::ALL.into_iter().enumerate() {
        let style = if w == ssh.window {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            theme::dim()
        };
        title.push(Span::styled(format!(" {} {} ", i + 1, w.as_str()), style));
    }
    f.render_widget(
        Block::default().borders(Borders::ALL).title(Line::from(title)),
        area,
    );
    let body = inner(area);
    if body.height < 2 || body.width < 20 {
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(body);

    if ssh.retained.is_none() {
        f.render_widget(Paragraph::new("Loading...").style(theme::dim()), parts[0]);
        return;
    }
    let c = &ssh.counters;
    let mut counters = stat("Accepted", &c.accepted, Style::default().fg(Color::Green));
    counters.extend(stat("Failed", &c.failed, Style::default().fg(Color::Red)));
    counters.extend(stat("Unique IPs", &c.unique_ips, Style::default()));
    f.render_widget(Paragraph::new(Line::from(counters)), parts[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(parts[1]);

    // offenders
    let off_area = titled(f, cols[0], "Top offenders");
    if let Some(rows) = ready_or_placeholder(f, off_area, &ssh.offenders) {
        let body = rows.iter().map(|o| {
            Row::new(vec![
                Cell::from(o.ip.clone()),
                Cell::from(o.attempts.clone()).style(Style::default().fg(Color::Red)),
                Cell::from(o.last_seen.render(now)).style(theme::dim()),
            ])
        });
        let widths = [
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(9),
        ];
        f.render_widget(Table::new(body, widths).column_spacing(1), off_area);
    }

    draw_auth(f, cols[1], "Recent failed", &ssh.recent_failed, Color::Red, now);
    draw_auth(f, cols[2], "Recent logins", &ssh.recent_accepted, Color::Green, now);
}

fn titled(f: &mut ratatui::Frame<'_>, area: Rect, title: &str) -> Rect {
    f.render_widget(
        Paragraph::new(Span::styled(title.to_string(), theme::header_row())),
        Rect { height: area.height.min(1), ..area },
    );
    Rect {
        y: area.y + area.height.min(1),
        height: area.height.saturating_sub(1),
        ..area
    }
}

fn draw_auth(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    rows: &Panel<Vec<AuthRow>>,
    color: Color,
    now: DateTime<Utc>,
) {
    let area = titled(f, area, title);
    let Some(rows) = ready_or_placeholder(f, area, rows) else {
        return;
    };
    let lines: Vec<Line> = rows
        .iter()
        .map(|r| {
            Line::from(vec![
                Span::styled(format!("{}@{}", r.user, r.ip), Style::default().fg(color)),
                Span::styled(format!(" {} {}", r.method, r.time.render(now)), theme::dim()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
