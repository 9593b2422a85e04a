//! Small UI helpers: human-readable sizes and speeds, truncation, relative
//! time, digit grouping and sanitizing of server-provided text.

use chrono::{DateTime, Utc};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const SPEED_UNITS: [&str; 4] = ["B/s", "KB/s", "MB/s", "GB/s"];

fn scale(v: u64, max_unit: usize) -> (f64, usize) {
    let mut x = v as f64;
    let mut i = 0;
    while x >= 1024.0 && i < max_unit {
        x /= 1024.0;
        i += 1;
    }
    (x, i)
}

pub fn human(b: u64) -> String {
    if b == 0 {
        return "0 B".into();
    }
    let (x, i) = scale(b, BYTE_UNITS.len() - 1);
    // whole numbers below a megabyte, one decimal above
    if i > 1 {
        format!("{x:.1} {}", BYTE_UNITS[i])
    } else {
        format!("{x:.0} {}", BYTE_UNITS[i])
    }
}

pub fn speed(bytes_per_sec: u64) -> String {
    if bytes_per_sec == 0 {
        return "0 B/s".into();
    }
    let (x, i) = scale(bytes_per_sec, SPEED_UNITS.len() - 1);
    format!("{x:.1} {}", SPEED_UNITS[i])
}

pub fn percent(v: f64) -> String {
    format!("{v:.1}%")
}

/// Clamp a percentage for use as a bar fill.
pub fn fill(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Cut `s` to `max` characters, appending `...` when anything was removed.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}

pub fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// "just now", "5m ago", "3h ago", "2d ago"; `--` when there is no time.
pub fn time_ago(t: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(t) = t else {
        return "--".into();
    };
    let secs = (now - t).num_seconds();
    if secs < 60 {
        "just now".into()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Group digits in threes with a comma: 1234567 -> "1,234,567".
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Strip anything a terminal could interpret from server-provided text.
/// Whitespace controls become a plain space; other controls are dropped.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
