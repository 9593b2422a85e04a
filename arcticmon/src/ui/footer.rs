//! Bottom line: the latest action notice, or key help when there is none.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::actions::{ActionInvoker, RESTART_STACK, RESTART_VM, UPDATE_STACK, UPDATE_SYSTEM};
use crate::ui::theme;
use crate::ui::util::sanitize;
use crate::view::Notice;

const HELP: &str = "s restart stack  u update stack  U update system  R reboot  \
                    1/2/3 ssh window  tab select  o open  r reconnect  c clear";

pub fn draw_footer(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    notice: Option<&Notice>,
    actions: &ActionInvoker,
) {
    let mut spans = Vec::new();
    let busy: Vec<&str> = [RESTART_STACK, UPDATE_STACK, UPDATE_SYSTEM, RESTART_VM]
        .into_iter()
        .filter(|a| actions.is_busy(a))
        .collect();
    if !busy.is_empty() {
        spans.push(Span::styled(
            format!("⟳ {}  ", busy.join(", ")),
            Style::default().fg(ratatui::style::Color::Yellow),
        ));
    }
    match notice {
        Some(n) => spans.push(Span::styled(
            sanitize(&n.text),
            Style::default().fg(theme::notice_color(n.kind)),
        )),
        None => spans.push(Span::styled(HELP, theme::dim())),
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
