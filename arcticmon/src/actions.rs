//! Operator maintenance actions.
//!
//! [`ActionInvoker`] holds the confirmation prompt (at most one armed action)
//! and the busy markers (one per control, keyed by action name). The HTTP
//! call itself is fire-and-forget: its outcome comes back as an
//! [`AppEvent::ActionDone`](crate::app::AppEvent) and is only ever surfaced,
//! never retried.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::AppEvent;
use crate::client::ServerClient;
use crate::view::{Notice, NoticeKind};

// host upgrades answer only when apt is done
const ACTION_TIMEOUT: Duration = Duration::from_secs(15 * 60);

pub const RESTART_VM: &str = "restart-vm";
pub const RESTART_STACK: &str = "restart-stack";
pub const UPDATE_STACK: &str = "update-stack";
pub const UPDATE_SYSTEM: &str = "update-system";

const CONFIRMATIONS: [(&str, &str); 4] = [
    (
        RESTART_VM,
        "Are you sure you want to reboot the server? All services will be temporarily unavailable.",
    ),
    (
        RESTART_STACK,
        "Are you sure you want to restart all containers?",
    ),
    (
        UPDATE_STACK,
        "Pull latest images, recreate containers, and prune unused images?",
    ),
    (
        UPDATE_SYSTEM,
        "Run apt full-upgrade on the host? This may take a while.",
    ),
];

const GENERIC_CONFIRMATION: &str = "Are you sure?";

/// Destructive actions go through the confirmation prompt first.
pub fn requires_confirmation(action: &str) -> bool {
    CONFIRMATIONS.iter().any(|(a, _)| *a == action)
}

pub fn confirmation_message(action: &str) -> &'static str {
    CONFIRMATIONS
        .iter()
        .find(|(a, _)| *a == action)
        .map(|(_, m)| *m)
        .unwrap_or(GENERIC_CONFIRMATION)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub action: String,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// A confirmation prompt is now showing.
    Armed,
    /// Invoke now; the control has been marked busy.
    Invoke(String),
    /// Ignored: a prompt is already open or the control is busy.
    Suppressed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Success; carries the server's status/note summary if it sent one.
    Done(Option<String>),
    /// The server answered with an `error` field.
    Rejected(String),
    /// No usable answer: network failure or a body that is not JSON.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ActionInvoker {
    pending: Option<PendingAction>,
    busy: HashSet<String>,
}

impl ActionInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self, control: &str) -> bool {
        self.busy.contains(control)
    }

    /// Operator asked for `action`.
    pub fn request(&mut self, action: &str) -> Request {
        if self.pending.is_some() {
            return Request::Suppressed;
        }
        if requires_confirmation(action) {
            self.pending = Some(PendingAction {
                action: action.to_string(),
                message: confirmation_message(action),
            });
            return Request::Armed;
        }
        self.begin(action)
    }

    /// Accept the prompt. Clears it, then starts the action unless its
    /// control is still busy from an earlier run.
    pub fn confirm(&mut self) -> Request {
        match self.pending.take() {
            Some(p) => self.begin(&p.action),
            None => Request::Suppressed,
        }
    }

    /// Close the prompt without invoking anything.
    pub fn dismiss(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn begin(&mut self, control: &str) -> Request {
        if self.busy.insert(control.to_string()) {
            Request::Invoke(control.to_string())
        } else {
            Request::Suppressed
        }
    }

    /// Clear the busy marker whatever the outcome and turn it into operator
    /// feedback. Silent successes return `None`.
    pub fn finish(&mut self, control: &str, outcome: &ActionOutcome) -> Option<Notice> {
        self.busy.remove(control);
        match outcome {
            ActionOutcome::Done(summary) => summary.as_ref().map(|s| Notice {
                kind: NoticeKind::Info,
                text: format!("{control}: {s}"),
            }),
            ActionOutcome::Rejected(e) => Some(Notice {
                kind: NoticeKind::Error,
                text: format!("Error: {e}"),
            }),
            ActionOutcome::Failed(e) => Some(Notice {
                kind: NoticeKind::Error,
                text: format!("Action failed: {e}"),
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActionReply {
    error: Option<String>,
    status: Option<String>,
    note: Option<String>,
}

impl ActionReply {
    fn outcome(self) -> ActionOutcome {
        if let Some(e) = self.error.filter(|e| !e.is_empty()) {
            return ActionOutcome::Rejected(e);
        }
        let summary = match (self.status, self.note) {
            (Some(s), Some(n)) => Some(format!("{s} ({n})")),
            (Some(s), None) => Some(s),
            (None, Some(n)) => Some(n),
            (None, None) => None,
        };
        ActionOutcome::Done(summary)
    }
}

/// POST the action and classify the reply. The body is read whatever the
/// HTTP status, since rate-limit and failure answers carry `error` too.
pub async fn invoke(client: &ServerClient, action: &str) -> ActionOutcome {
    let req = match client.post(&["api", "actions", action]) {
        Ok(r) => r.timeout(ACTION_TIMEOUT),
        Err(e) => return ActionOutcome::Failed(e.to_string()),
    };
    let body = match req.send().await {
        Ok(resp) => match resp.bytes().await {
            Ok(b) => b,
            Err(e) => return ActionOutcome::Failed(e.to_string()),
        },
        Err(e) => return ActionOutcome::Failed(e.to_string()),
    };
    match serde_json::from_slice::<ActionReply>(&body) {
        Ok(reply) => reply.outcome(),
        Err(e) => ActionOutcome::Failed(e.to_string()),
    }
}

pub fn spawn_action(client: ServerClient, action: String, tx: mpsc::Sender<AppEvent>) {
    info!(%action, "invoking action");
    tokio::spawn(async move {
        let outcome = invoke(&client, &action).await;
        match &outcome {
            ActionOutcome::Done(_) => info!(%action, "action completed"),
            ActionOutcome::Rejected(e) | ActionOutcome::Failed(e) => {
                warn!(%action, error = %e, "action failed")
            }
        }
        let _ = tx.send(AppEvent::ActionDone { action, outcome }).await;
    });
}
