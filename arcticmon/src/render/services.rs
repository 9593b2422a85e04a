//! Container health cards.

use crate::types::Service;
use crate::ui::util::sanitize;
use crate::view::{HealthClass, Panel, ServiceCard, View};

/// Map the server's health string onto the closed set of classes.
/// Missing health reads as stopped; anything unrecognized is also drawn as
/// stopped but labelled "No check".
pub fn classify(health: &str) -> (HealthClass, &'static str) {
    match health {
        "healthy" => (HealthClass::Healthy, "Healthy"),
        "unhealthy" => (HealthClass::Unhealthy, "Unhealthy"),
        "starting" => (HealthClass::Starting, "Starting"),
        "running" => (HealthClass::Running, "Running"),
        "" | "stopped" => (HealthClass::Stopped, "Stopped"),
        _ => (HealthClass::Stopped, "No check"),
    }
}

pub fn render_services(view: &mut View, services: &[Service]) {
    let cards: Vec<ServiceCard> = services
        .iter()
        .map(|s| {
            let (class, label) = classify(&s.health);
            ServiceCard {
                name: sanitize(&s.name),
                class,
                label,
                uptime: sanitize(&s.uptime),
                link: s
                    .external_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .map(sanitize),
            }
        })
        .collect();

    view.selected_service = view.selected_service.min(cards.len().saturating_sub(1));
    view.services = Panel::rows(cards, "No services detected");
}
