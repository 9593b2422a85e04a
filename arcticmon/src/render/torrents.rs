//! Torrent client totals and the head of its torrent list.

use crate::types::Torrents;
use crate::ui::util::{sanitize, speed, truncate};
use crate::view::{Panel, TorrentRow, TorrentsView, View};

pub const MAX_TORRENTS: usize = 5;
pub const NAME_MAX: usize = 50;

pub fn render_torrents(view: &mut View, t: &Torrents) {
    let ratio = match t.ratio {
        Some(r) if r != 0.0 && r.is_finite() => format!("{r:.2}"),
        _ => "--".into(),
    };

    // server order is kept; it already ranks the list
    let items = t
        .top_torrents
        .iter()
        .take(MAX_TORRENTS)
        .map(|b| {
            let full_name = sanitize(&b.name);
            TorrentRow {
                name: truncate(&full_name, NAME_MAX),
                full_name,
                down: speed(b.dl_speed),
                up: speed(b.up_speed),
                percent: format!("{:.0}%", b.progress),
            }
        })
        .collect();

    view.torrents = Panel::Ready(TorrentsView {
        download: speed(t.dl_speed),
        upload: speed(t.up_speed),
        ratio,
        counts: format!(
            "{} / {} / {}",
            t.active_count, t.seeding_count, t.total_count
        ),
        items: Panel::rows(items, "No active torrents"),
    });
}
