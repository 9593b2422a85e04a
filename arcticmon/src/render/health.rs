//! Advisory warnings reported by the media services.

use crate::types::HealthWarning;
use crate::ui::util::sanitize;
use crate::view::{HealthRow, Panel, Severity, View};

pub fn render_health(view: &mut View, health: &[HealthWarning]) {
    let rows = health
        .iter()
        .map(|h| HealthRow {
            severity: if h.kind == "error" {
                Severity::Error
            } else {
                Severity::Warning
            },
            source: sanitize(&h.source),
            message: sanitize(&h.message),
        })
        .collect();
    view.health = Panel::rows(rows, "All systems healthy");
}
