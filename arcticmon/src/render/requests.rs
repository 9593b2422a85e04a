//! Media requests.

use crate::types::MediaRequest;
use crate::ui::util::{parse_time, sanitize};
use crate::view::{Ago, Panel, RequestRow, View};

pub fn render_requests(view: &mut View, requests: &[MediaRequest]) {
    let rows = requests
        .iter()
        .map(|r| {
            let status = sanitize(&r.status);
            RequestRow {
                status_class: status.to_lowercase(),
                status,
                title: sanitize(&r.title),
                user: sanitize(&r.user),
                requested: Ago(parse_time(&r.requested_at)),
            }
        })
        .collect();
    view.requests = Panel::rows(rows, "No recent requests");
}
