//! End-to-end tests against an in-process axum server: overview bootstrap,
//! action posts and the live event stream with reconnects.

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arcticmon::actions::{invoke, ActionOutcome, RESTART_STACK, UPDATE_SYSTEM};
use arcticmon::app::AppEvent;
use arcticmon::bootstrap::{apply_overview, fetch_overview, finish_bootstrap, spawn_bootstrap};
use arcticmon::client::{BasicAuth, ServerClient};
use arcticmon::error::ClientError;
use arcticmon::live::LiveManager;
use arcticmon::view::{ConnectionState, Panel, View};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::stream;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, timeout, Instant};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Clone, Default)]
struct Hits(Arc<AtomicUsize>);

impl Hits {
    fn bump(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn overview_ok() -> Json<serde_json::Value> {
    Json(json!({
        "host": {"cpuPercent": 12.0, "uptime": "1d"},
        "services": [{"name": "jellyfin", "health": "healthy"}],
        "library": null,
        "generatedAt": "2026-01-01T00:00:00Z"
    }))
}

async fn overview_down() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// One host frame, then the stream closes.
async fn one_host_frame(
    State(hits): State<Hits>,
) -> Sse<impl futures_util::Stream<Item = Result<Event, Infallible>>> {
    let n = hits.bump();
    let frame = json!({"event": "host", "data": {"cpuPercent": 10.0 * n as f64, "uptime": "2h"}});
    Sse::new(stream::iter(vec![
        Ok(Event::default().comment("connected")),
        Ok(Event::default().data(frame.to_string())),
    ]))
}

async fn action(State(hits): State<Hits>, Path(name): Path<String>) -> impl IntoResponse {
    hits.bump();
    match name.as_str() {
        "restart-stack" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "action already in progress"})),
        )
            .into_response(),
        "update-system" => Json(json!({"status": "ok", "note": "reboot required"})).into_response(),
        _ => (StatusCode::BAD_GATEWAY, "upstream exploded").into_response(),
    }
}

#[tokio::test]
async fn bootstrap_renders_present_topics() {
    let base = serve(Router::new().route("/api/overview", get(overview_ok))).await;
    let client = ServerClient::new(&base, None, None).unwrap();

    let overview = fetch_overview(&client).await.expect("overview");
    let mut view = View::new();
    assert_eq!(apply_overview(&mut view, overview), 2);
    assert!(view.host.ready().is_some());
    assert_eq!(view.services.ready().map(Vec::len), Some(1));
    assert!(view.library.is_none());
    assert_eq!(view.streams, Panel::Loading);
}

#[tokio::test]
async fn bootstrap_failure_is_reported_not_fatal() {
    let base = serve(Router::new().route("/api/overview", get(overview_down))).await;
    let client = ServerClient::new(&base, None, None).unwrap();

    let res = fetch_overview(&client).await;
    assert!(matches!(res, Err(ClientError::Status(s)) if s.as_u16() == 500));

    let mut view = View::new();
    finish_bootstrap(&mut view, res);
    assert_eq!(view.host, Panel::Loading);
}

#[tokio::test]
async fn base_url_with_prefix_is_kept() {
    let app = Router::new().route("/dash/api/overview", get(overview_ok));
    let base = serve(app).await;
    let client = ServerClient::new(&format!("{base}/dash"), None, None).unwrap();
    assert!(fetch_overview(&client).await.is_ok());
}

#[tokio::test]
async fn basic_auth_is_sent() {
    async fn guarded(headers: HeaderMap) -> impl IntoResponse {
        let ok = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "Basic YWRtaW46cHc=");
        if ok {
            overview_ok().await.into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
    let base = serve(Router::new().route("/api/overview", get(guarded))).await;

    let anon = ServerClient::new(&base, None, None).unwrap();
    assert!(matches!(
        fetch_overview(&anon).await,
        Err(ClientError::Status(s)) if s.as_u16() == 401
    ));

    let auth = BasicAuth {
        user: "admin".into(),
        password: Some("pw".into()),
    };
    let client = ServerClient::new(&base, None, Some(auth)).unwrap();
    assert!(fetch_overview(&client).await.is_ok());
}

#[tokio::test]
async fn action_posts_once_and_surfaces_error_body() {
    let hits = Hits::default();
    let app = Router::new()
        .route("/api/actions/:name", post(action))
        .with_state(hits.clone());
    let base = serve(app).await;
    let client = ServerClient::new(&base, None, None).unwrap();

    let out = invoke(&client, RESTART_STACK).await;
    assert_eq!(
        out,
        ActionOutcome::Rejected("action already in progress".into())
    );
    assert_eq!(hits.get(), 1);

    let out = invoke(&client, UPDATE_SYSTEM).await;
    assert_eq!(out, ActionOutcome::Done(Some("ok (reboot required)".into())));

    let out = invoke(&client, "restart-vm").await;
    assert!(matches!(out, ActionOutcome::Failed(_)));
    assert_eq!(hits.get(), 3);
}

#[tokio::test]
async fn action_against_dead_server_fails() {
    let client = ServerClient::new("http://127.0.0.1:9", None, None).unwrap();
    assert!(matches!(
        invoke(&client, RESTART_STACK).await,
        ActionOutcome::Failed(_)
    ));
}

/// Mimics the app loop: link events plus the reconnect timer.
async fn drive_until<F>(
    live: &mut LiveManager,
    view: &mut View,
    rx: &mut mpsc::Receiver<AppEvent>,
    mut done: F,
) where
    F: FnMut(&View) -> bool,
{
    let work = async {
        while !done(view) {
            let deadline = live.reconnect_deadline();
            tokio::select! {
                Some(ev) = rx.recv() => match ev {
                    AppEvent::Link { generation, event } => live.handle(view, generation, event),
                    AppEvent::Overview(res) => finish_bootstrap(view, res),
                    AppEvent::ActionDone { .. } => {}
                },
                _ = async {
                    match deadline {
                        Some(at) => sleep_until(at).await,
                        None => std::future::pending().await,
                    }
                } => {
                    if live.reconnect_due(Instant::now()) {
                        live.connect();
                    }
                }
            }
        }
    };
    timeout(Duration::from_secs(10), work)
        .await
        .expect("condition not reached in time");
}

#[tokio::test]
async fn live_stream_renders_even_when_bootstrap_fails() {
    let hits = Hits::default();
    let app = Router::new()
        .route("/api/overview", get(overview_down))
        .route("/api/events", get(one_host_frame))
        .with_state(hits.clone());
    let base = serve(app).await;
    let client = ServerClient::new(&base, None, None).unwrap();

    let (tx, mut rx) = mpsc::channel(64);
    let mut view = View::new();
    spawn_bootstrap(client.clone(), tx.clone());
    let mut live = LiveManager::new(client, tx, Duration::from_millis(50));
    live.connect();
    assert_eq!(live.state(), ConnectionState::Connecting);

    drive_until(&mut live, &mut view, &mut rx, |v| v.host.ready().is_some()).await;
    let host = view.host.ready().unwrap();
    assert_eq!(host.cpu.value, "10%");
    assert_eq!(host.uptime, "2h");
}

#[tokio::test]
async fn live_stream_reconnects_after_close() {
    let hits = Hits::default();
    let app = Router::new()
        .route("/api/events", get(one_host_frame))
        .with_state(hits.clone());
    let base = serve(app).await;
    let client = ServerClient::new(&base, None, None).unwrap();

    let (tx, mut rx) = mpsc::channel(64);
    let mut view = View::new();
    let mut live = LiveManager::new(client, tx, Duration::from_millis(50));
    live.connect();

    // the second connection sends 20%
    drive_until(&mut live, &mut view, &mut rx, |v| {
        v.host.ready().is_some_and(|h| h.cpu.value == "20%")
    })
    .await;
    assert!(hits.get() >= 2);
}

#[tokio::test]
async fn unreachable_server_shows_disconnected() {
    let client = ServerClient::new("http://127.0.0.1:9", None, None).unwrap();
    let (tx, mut rx) = mpsc::channel(64);
    let mut view = View::new();
    let mut live = LiveManager::new(client, tx, Duration::from_secs(3));
    live.connect();

    drive_until(&mut live, &mut view, &mut rx, |v| {
        v.connection == ConnectionState::Disconnected
    })
    .await;
    assert!(live.reconnect_deadline().is_some());
    assert_eq!(view.host, Panel::Loading);
}
