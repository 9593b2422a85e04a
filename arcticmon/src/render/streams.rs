//! Active playback sessions.

use crate::types::Stream;
use crate::ui::util::{fill, sanitize};
use crate::view::{Panel, StreamRow, View};

fn title(s: &Stream) -> String {
    match s.series.as_deref().filter(|v| !v.is_empty()) {
        Some(series) => format!(
            "{} {} - {}",
            sanitize(series),
            sanitize(s.episode.as_deref().unwrap_or("")),
            sanitize(&s.title)
        ),
        None => sanitize(&s.title),
    }
}

pub fn render_streams(view: &mut View, streams: &[Stream]) {
    let rows = streams
        .iter()
        .map(|s| StreamRow {
            user: sanitize(&s.user),
            title: title(s),
            fill: fill(s.progress),
            percent: format!("{:.0}%", s.progress),
            client: sanitize(&s.client),
            transcoding: s.transcoding,
            method: sanitize(&s.play_method),
        })
        .collect();
    view.streams = Panel::rows(rows, "No active streams");
}
