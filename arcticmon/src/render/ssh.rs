//! SSH authentication activity.
//!
//! The whole payload is retained in [`SshView`] so the counter window can be
//! switched later without waiting for another snapshot. The three lists do
//! not depend on the window; offenders always cover the last 30 days.

use crate::types::{SshAuthEvent, SshSecurity};
use crate::ui::util::{parse_time, sanitize, thousands};
use crate::view::{Ago, AuthRow, OffenderRow, Panel, SshCounters, SshView, SshWindow, View};

fn auth_rows(events: &[SshAuthEvent]) -> Vec<AuthRow> {
    events
        .iter()
        .map(|e| AuthRow {
            user: sanitize(&e.user),
            ip: sanitize(&e.ip),
            method: sanitize(&e.method),
            time: Ago(parse_time(&e.time)),
        })
        .collect()
}

pub fn render_ssh(view: &mut View, data: SshSecurity) {
    let ssh = &mut view.ssh;

    let offenders = data
        .top_offenders
        .iter()
        .map(|o| OffenderRow {
            ip: sanitize(&o.ip),
            last_seen: Ago(parse_time(&o.last_seen)),
            attempts: o.attempts.to_string(),
        })
        .collect();
    ssh.offenders = Panel::rows(offenders, "No failed attempts");
    ssh.recent_failed = Panel::rows(auth_rows(&data.recent_failed), "No failed attempts");
    ssh.recent_accepted = Panel::rows(auth_rows(&data.recent_accepted), "No logins");

    ssh.retained = Some(data);
    update_ssh_counters(ssh);
}

/// Recompute the displayed totals from the retained payload for the current
/// window. Does nothing until a payload has been received.
pub fn update_ssh_counters(ssh: &mut SshView) {
    let Some(d) = ssh.retained.as_ref() else {
        return;
    };
    let (accepted, failed) = match ssh.window {
        SshWindow::Day => (d.accepted_24h, d.failed_24h),
        SshWindow::Week => (d.accepted_7d, d.failed_7d),
        SshWindow::Month => (d.accepted_30d, d.failed_30d),
    };
    ssh.counters = SshCounters {
        accepted: thousands(accepted.unwrap_or(0)),
        failed: thousands(failed.unwrap_or(0)),
        unique_ips: thousands(d.top_offenders.len() as u64),
    };
}

pub fn select_ssh_window(view: &mut View, window: SshWindow) {
    view.ssh.window = window;
    update_ssh_counters(&mut view.ssh);
}
