//! Transcoding queue and workers.

use crate::types::{TranscodeWorker, Transcodes};
use crate::ui::util::{fill, sanitize, truncate};
use crate::view::{Panel, TranscodesView, View, WorkerCard};

const FILE_MAX: usize = 50;

fn card(w: &TranscodeWorker) -> WorkerCard {
    if w.status == "idle" {
        return WorkerCard {
            file: "Idle".into(),
            stats: String::new(),
            fill: None,
        };
    }
    let speed = if w.speed.is_empty() {
        "--".to_string()
    } else {
        sanitize(&w.speed)
    };
    WorkerCard {
        file: truncate(&sanitize(&w.file_name), FILE_MAX),
        stats: format!("{:.1}% \u{00B7} {speed}", w.progress),
        fill: Some(fill(w.progress)),
    }
}

pub fn render_transcodes(view: &mut View, t: &Transcodes) {
    view.transcodes = Panel::Ready(TranscodesView {
        pending: format!("Pending: {}", t.pending),
        workers: Panel::rows(t.workers.iter().map(card).collect(), "No active workers"),
    });
}
