//! One-shot full snapshot fetched at startup.
//!
//! Runs alongside the live stream, never before it: if the fetch fails the
//! first live events fill the view instead, so there is no retry.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::AppEvent;
use crate::client::ServerClient;
use crate::dispatch::{dispatch_topic, Dispatch};
use crate::error::{ClientError, ClientResult};
use crate::types::Topic;
use crate::view::View;

const OVERVIEW_TIMEOUT: Duration = Duration::from_secs(10);

/// The overview document: topic name -> payload, plus keys we ignore.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Overview(pub Map<String, Value>);

impl Overview {
    /// Present topics in a fixed order. Absent and `null` keys mean "no data
    /// yet" and are skipped.
    pub fn into_topics(mut self) -> Vec<(Topic, Value)> {
        Topic::ALL
            .into_iter()
            .filter_map(|t| match self.0.remove(t.as_str()) {
                None | Some(Value::Null) => None,
                Some(v) => Some((t, v)),
            })
            .collect()
    }
}

pub async fn fetch_overview(client: &ServerClient) -> ClientResult<Overview> {
    let resp = client
        .get(&["api", "overview"])?
        .timeout(OVERVIEW_TIMEOUT)
        .send()
        .await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Render every topic present in `overview` through the same path as live
/// events. Returns how many topics were rendered.
pub fn apply_overview(view: &mut View, overview: Overview) -> usize {
    let mut rendered = 0;
    for (topic, data) in overview.into_topics() {
        if let Dispatch::Rendered(_) = dispatch_topic(view, topic, data) {
            rendered += 1;
        }
    }
    rendered
}

pub fn spawn_bootstrap(client: ServerClient, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let res = fetch_overview(&client).await;
        let _ = tx.send(AppEvent::Overview(res)).await;
    });
}

/// Log-and-continue handling for the bootstrap result.
pub fn finish_bootstrap(view: &mut View, res: ClientResult<Overview>) {
    match res {
        Ok(overview) => {
            let n = apply_overview(view, overview);
            info!(topics = n, "initial overview applied");
        }
        Err(e) => warn!(error = %e, "initial overview failed; waiting for live data"),
    }
}
