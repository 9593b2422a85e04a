//! Snapshot renderers: one per topic, each turning a decoded snapshot into
//! mutations of the region of [`View`] that it owns.
//!
//! Renderers never read another topic's region and never fail; empty or
//! absent data becomes the topic's placeholder. All server text goes through
//! [`sanitize`](crate::ui::util::sanitize) before it is stored.

pub mod downloads;
pub mod health;
pub mod host;
pub mod library;
pub mod requests;
pub mod services;
pub mod ssh;
pub mod streams;
pub mod torrents;
pub mod transcodes;

use crate::types::Snapshot;
use crate::view::View;

pub use ssh::{select_ssh_window, update_ssh_counters};

/// Replace the region owned by the snapshot's topic.
pub fn apply(view: &mut View, snapshot: Snapshot) {
    match snapshot {
        Snapshot::Host(h) => host::render_host(view, h.as_ref()),
        Snapshot::Services(s) => services::render_services(view, &s),
        Snapshot::Streams(s) => streams::render_streams(view, &s),
        Snapshot::Torrents(t) => torrents::render_torrents(view, &t),
        Snapshot::Downloads(d) => downloads::render_downloads(view, &d),
        Snapshot::Requests(r) => requests::render_requests(view, &r),
        Snapshot::Transcodes(t) => transcodes::render_transcodes(view, &t),
        Snapshot::Health(h) => health::render_health(view, &h),
        Snapshot::Library(l) => library::render_library(view, l.as_ref()),
        Snapshot::SshSecurity(s) => ssh::render_ssh(view, s),
    }
}
