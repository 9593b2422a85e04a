//! Shared UI colors.

use ratatui::style::{Color, Modifier, Style};

use crate::view::{ConnectionState, HealthClass, NoticeKind, Severity};

pub const DIM: Color = Color::DarkGray;
pub const ACCENT: Color = Color::Cyan;
pub const HEADER: Color = Color::Cyan;

pub fn dim() -> Style {
    Style::default().fg(DIM)
}

pub fn header_row() -> Style {
    Style::default().fg(HEADER).add_modifier(Modifier::BOLD)
}

/// Green / yellow / red by how full a bar is.
pub fn usage_color(fill: f64) -> Color {
    if fill < 70.0 {
        Color::Green
    } else if fill < 90.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn health_color(class: HealthClass) -> Color {
    match class {
        HealthClass::Healthy => Color::Green,
        HealthClass::Running => Color::Cyan,
        HealthClass::Starting => Color::Yellow,
        HealthClass::Unhealthy => Color::Red,
        HealthClass::Stopped => DIM,
    }
}

pub fn severity_color(s: Severity) -> Color {
    match s {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

pub fn notice_color(k: NoticeKind) -> Color {
    match k {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    }
}

pub fn connection(state: ConnectionState) -> (Color, &'static str) {
    match state {
        ConnectionState::Connecting => (Color::Yellow, "Connecting..."),
        ConnectionState::Connected => (Color::Green, "Live"),
        ConnectionState::Disconnected => (Color::Red, "Disconnected - reconnecting..."),
    }
}

/// Badge color for a download source (`radarr`, `sonarr`, ...).
pub fn source_color(class: &str) -> Color {
    match class {
        "radarr" => Color::Yellow,
        "sonarr" => Color::Cyan,
        "sabnzbd" => Color::Magenta,
        _ => Color::Blue,
    }
}

/// Badge color for a media request status.
pub fn request_color(class: &str) -> Color {
    match class {
        "available" => Color::Green,
        "approved" => Color::Blue,
        "pending" => Color::Yellow,
        "declined" => Color::Red,
        _ => DIM,
    }
}
