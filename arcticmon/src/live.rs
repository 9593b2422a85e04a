//! Live connection: the SSE subscription and its reconnect policy.
//!
//! [`LiveConnection`] is the transport-free state machine
//! (connecting -> connected -> disconnected -> connecting ...). It holds the
//! single reconnect deadline and a generation counter; every link task is
//! tagged with the generation it was started under, so events from a link
//! that has since been replaced are ignored. [`LiveManager`] pairs the state
//! machine with the actual link task.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::app::AppEvent;
use crate::client::ServerClient;
use crate::dispatch::dispatch_frame;
use crate::error::{ClientError, ClientResult};
use crate::sse::SseDecoder;
use crate::view::{ConnectionState, View};

/// Fixed delay before a reconnect attempt. Never grows; there is no retry cap.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Opened,
    Frame(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Event came from a replaced link.
    Stale,
    Opened,
    Frame(String),
    /// The link failed. `scheduled` is false when a reconnect was already
    /// pending and this error did not add another one.
    Disconnected { scheduled: bool },
}

#[derive(Debug)]
pub struct LiveConnection {
    state: ConnectionState,
    generation: u64,
    reconnect_at: Option<Instant>,
    delay: Duration,
}

impl LiveConnection {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: ConnectionState::Connecting,
            generation: 0,
            reconnect_at: None,
            delay,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reconnect_deadline(&self) -> Option<Instant> {
        self.reconnect_at
    }

    /// Start a new attempt. Cancels any pending reconnect and retires the
    /// previous generation. Returns the generation of the new link.
    pub fn begin_connect(&mut self) -> u64 {
        self.reconnect_at = None;
        self.generation += 1;
        self.state = ConnectionState::Connecting;
        self.generation
    }

    /// True once the pending reconnect deadline has passed.
    pub fn reconnect_due(&self, now: Instant) -> bool {
        matches!(self.reconnect_at, Some(at) if now >= at)
    }

    pub fn on_event(&mut self, generation: u64, event: LinkEvent, now: Instant) -> LinkOutcome {
        if generation != self.generation {
            return LinkOutcome::Stale;
        }
        match event {
            LinkEvent::Opened => {
                self.state = ConnectionState::Connected;
                self.reconnect_at = None;
                LinkOutcome::Opened
            }
            LinkEvent::Frame(data) => LinkOutcome::Frame(data),
            LinkEvent::Failed(_) => {
                self.state = ConnectionState::Disconnected;
                let scheduled = self.reconnect_at.is_none();
                if scheduled {
                    self.reconnect_at = Some(now + self.delay);
                }
                LinkOutcome::Disconnected { scheduled }
            }
        }
    }
}

impl Default for LiveConnection {
    fn default() -> Self {
        Self::new(RECONNECT_DELAY)
    }
}

/// Owns the state machine and the one live link task.
pub struct LiveManager {
    conn: LiveConnection,
    client: ServerClient,
    tx: mpsc::Sender<AppEvent>,
    link: Option<JoinHandle<()>>,
}

impl LiveManager {
    pub fn new(client: ServerClient, tx: mpsc::Sender<AppEvent>, delay: Duration) -> Self {
        Self {
            conn: LiveConnection::new(delay),
            client,
            tx,
            link: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.conn.state()
    }

    pub fn reconnect_deadline(&self) -> Option<Instant> {
        self.conn.reconnect_deadline()
    }

    pub fn reconnect_due(&self, now: Instant) -> bool {
        self.conn.reconnect_due(now)
    }

    /// Close the current link (if any) and open a new one.
    pub fn connect(&mut self) {
        self.close();
        let generation = self.conn.begin_connect();
        info!(generation, url = %self.client.base(), "opening live stream");
        self.link = Some(spawn_link(self.client.clone(), generation, self.tx.clone()));
    }

    fn close(&mut self) {
        if let Some(link) = self.link.take() {
            link.abort();
        }
    }

    /// Apply one link event, rendering frames into `view`.
    pub fn handle(&mut self, view: &mut View, generation: u64, event: LinkEvent) {
        let reason = match &event {
            LinkEvent::Failed(e) => Some(e.clone()),
            _ => None,
        };
        match self.conn.on_event(generation, event, Instant::now()) {
            LinkOutcome::Stale => debug!(generation, "dropping event from replaced link"),
            LinkOutcome::Opened => info!(generation, "live stream connected"),
            LinkOutcome::Frame(data) => {
                dispatch_frame(view, &data);
            }
            LinkOutcome::Disconnected { scheduled } => {
                self.close();
                warn!(
                    generation,
                    error = reason.as_deref().unwrap_or(""),
                    scheduled,
                    "live stream disconnected, reconnecting in {:?}",
                    self.conn.delay
                );
            }
        }
        view.connection = self.conn.state();
    }
}

impl Drop for LiveManager {
    fn drop(&mut self) {
        self.close();
    }
}

pub fn spawn_link(
    client: ServerClient,
    generation: u64,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let reason = match run_link(&client, generation, &tx).await {
            Ok(()) => return, // receiver gone; app is shutting down
            Err(e) => e.to_string(),
        };
        let _ = tx
            .send(AppEvent::Link {
                generation,
                event: LinkEvent::Failed(reason),
            })
            .await;
    })
}

async fn run_link(
    client: &ServerClient,
    generation: u64,
    tx: &mpsc::Sender<AppEvent>,
) -> ClientResult<()> {
    let resp = client
        .get(&["api", "events"])?
        .header(ACCEPT, "text/event-stream")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }

    let opened = AppEvent::Link {
        generation,
        event: LinkEvent::Opened,
    };
    if tx.send(opened).await.is_err() {
        return Ok(());
    }

    let mut decoder = SseDecoder::new();
    let mut body = resp.bytes_stream();
    while let Some(chunk) = body.next().await {
        for frame in decoder.push(&chunk?) {
            let event = AppEvent::Link {
                generation,
                event: LinkEvent::Frame(frame),
            };
            if tx.send(event).await.is_err() {
                return Ok(());
            }
        }
    }
    Err(ClientError::StreamEnded)
}
