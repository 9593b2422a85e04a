//! Usenet/arr download queue.

use crate::types::Download;
use crate::ui::util::{fill, sanitize, truncate};
use crate::view::{DownloadRow, Panel, View};

pub const MAX_DOWNLOADS: usize = 5;
pub const TITLE_MAX: usize = 45;

pub fn render_downloads(view: &mut View, downloads: &[Download]) {
    let rows = downloads
        .iter()
        .take(MAX_DOWNLOADS)
        .map(|d| {
            let source = sanitize(&d.source);
            DownloadRow {
                source_class: source.to_lowercase(),
                source,
                title: truncate(&sanitize(&d.title), TITLE_MAX),
                fill: fill(d.progress),
                percent: format!("{:.0}%", d.progress),
                timeleft: if d.timeleft.is_empty() {
                    "--".into()
                } else {
                    sanitize(&d.timeleft)
                },
            }
        })
        .collect();
    view.downloads = Panel::rows(rows, "Queue empty");
}
