//! Renderer and dispatcher behaviour: each topic, placeholders, limits and isolation.

use arcticmon::dispatch::{dispatch, dispatch_frame, Dispatch};
use arcticmon::render::select_ssh_window;
use arcticmon::types::Topic;
use arcticmon::view::{
    Ago, ConnectionState, HealthClass, Panel, Severity, SshWindow, View,
};
use chrono::{TimeZone, Utc};
use serde_json::json;

const GIB: u64 = 1024 * 1024 * 1024;

fn rendered(view: &mut View, topic: &str, data: serde_json::Value) {
    let r = dispatch(view, topic, data);
    assert!(matches!(r, Dispatch::Rendered(_)), "{topic}: {r:?}");
}

#[test]
fn fresh_view_is_loading_everywhere() {
    let v = View::new();
    assert_eq!(v.connection, ConnectionState::Connecting);
    assert_eq!(v.host, Panel::Loading);
    assert_eq!(v.services, Panel::Loading);
    assert_eq!(v.health, Panel::Loading);
    assert!(v.library.is_none());
    assert!(v.ssh.retained.is_none());
}

#[test]
fn host_meters_and_labels() {
    let mut v = View::new();
    rendered(
        &mut v,
        "host",
        json!({
            "cpuPercent": 42.4,
            "cpuCores": [{"id": 0, "percent": 10.0}, {"id": 1, "percent": 90.0}],
            "memTotal": 8 * GIB,
            "memUsed": 4 * GIB,
            "memPercent": 50.0,
            "swapTotal": 0,
            "disks": [{"mount": "/", "label": "root", "total": 100 * GIB, "used": 75 * GIB, "percent": 75.0}],
            "gpu": null,
            "sshSessions": 2,
            "uptime": "3d 4h"
        }),
    );
    let h = v.host.ready().expect("host ready");
    assert_eq!(h.cpu.label, "AVG");
    assert_eq!(h.cpu.value, "42%");
    assert_eq!(h.cores.len(), 2);
    assert_eq!(h.cores[1].label, "1");
    assert_eq!(h.cores[1].fill, 90.0);
    assert_eq!(h.memory.value, "50.0% (4.0 GB/8.0 GB)");
    assert_eq!(h.swap.value, "None");
    assert_eq!(h.gpu.value, "N/A");
    assert_eq!(h.gpu.info, "GPU: unavailable");
    assert_eq!(h.disks[0].label, "root");
    assert_eq!(h.disks[0].value, "75.0% (75.0 GB/100.0 GB)");
    assert_eq!(h.ssh_sessions, "SSH: 2");
    assert_eq!(h.uptime, "3d 4h");
}

#[test]
fn host_gpu_available_and_null_payload() {
    let mut v = View::new();
    rendered(
        &mut v,
        "host",
        json!({
            "gpu": {"name": "RTX 3060", "tempC": 61, "utilPercent": 37,
                    "memUsed": 2 * GIB, "memTotal": 12 * GIB, "available": true}
        }),
    );
    let h = v.host.ready().expect("host ready");
    assert_eq!(h.gpu.value, "37%");
    assert_eq!(h.gpu.info, "GPU: RTX 3060");
    assert_eq!(h.gpu.temp, "GPU Temp: 61°C");
    assert_eq!(h.gpu.mem, "VRAM: 2.0 GB/12.0 GB");
    assert!(h.cores.is_empty());
    assert_eq!(h.uptime, "--");

    rendered(&mut v, "host", serde_json::Value::Null);
    assert_eq!(v.host, Panel::Empty("No host data"));
}

#[test]
fn services_classification_and_placeholder() {
    let mut v = View::new();
    rendered(
        &mut v,
        "services",
        json!([
            {"name": "jellyfin", "health": "healthy", "uptime": "2d", "externalUrl": "http://jf:8096"},
            {"name": "sonarr", "health": "unhealthy"},
            {"name": "radarr", "health": "starting"},
            {"name": "qbit", "health": "running"},
            {"name": "bazarr", "health": ""},
            {"name": "odd", "health": "unknown-value"}
        ]),
    );
    let cards = v.services.ready().expect("services ready");
    let classes: Vec<_> = cards.iter().map(|c| (c.class, c.label)).collect();
    assert_eq!(
        classes,
        vec![
            (HealthClass::Healthy, "Healthy"),
            (HealthClass::Unhealthy, "Unhealthy"),
            (HealthClass::Starting, "Starting"),
            (HealthClass::Running, "Running"),
            (HealthClass::Stopped, "Stopped"),
            (HealthClass::Stopped, "No check"),
        ]
    );
    assert_eq!(cards[0].link.as_deref(), Some("http://jf:8096"));
    assert!(cards[1].link.is_none());

    v.selected_service = 5;
    rendered(&mut v, "services", json!([{"name": "only", "health": "healthy"}]));
    assert_eq!(v.selected_service, 0);

    rendered(&mut v, "services", json!([]));
    assert_eq!(v.services, Panel::Empty("No services detected"));
}

#[test]
fn server_text_is_sanitized() {
    let mut v = View::new();
    rendered(
        &mut v,
        "services",
        json!([{"name": "evil\u{1b}[2Jname\nline", "health": "healthy"}]),
    );
    let cards = v.services.ready().expect("services ready");
    assert_eq!(cards[0].name, "evil[2Jname line");
}

#[test]
fn streams_titles_and_placeholder() {
    let mut v = View::new();
    rendered(
        &mut v,
        "streams",
        json!([
            {"user": "ann", "title": "Pilot", "series": "Show", "episode": "S01E02",
             "progress": 12.6, "transcoding": true, "playMethod": "Transcode", "client": "Web"},
            {"user": "bob", "title": "Movie", "progress": 80.0, "playMethod": "DirectPlay"}
        ]),
    );
    let rows = v.streams.ready().expect("streams ready");
    assert_eq!(rows[0].title, "Show S01E02 - Pilot");
    assert_eq!(rows[0].percent, "13%");
    assert!(rows[0].transcoding);
    assert_eq!(rows[1].title, "Movie");
    assert_eq!(rows[1].method, "DirectPlay");

    rendered(&mut v, "streams", serde_json::Value::Null);
    assert_eq!(v.streams, Panel::Empty("No active streams"));
}

#[test]
fn torrents_keeps_first_five_and_truncates_names() {
    let long = "x".repeat(60);
    let items: Vec<_> = (0..8)
        .map(|i| {
            let name = if i == 0 { long.clone() } else { format!("t{i}") };
            json!({"name": name, "progress": 50.0, "dlSpeed": 1024, "upSpeed": 0})
        })
        .collect();
    let mut v = View::new();
    rendered(
        &mut v,
        "torrents",
        json!({"dlSpeed": 2048, "upSpeed": 0, "ratio": 1.234,
               "activeCount": 2, "seedingCount": 3, "totalCount": 8, "topTorrents": items}),
    );
    let t = v.torrents.ready().expect("torrents ready");
    assert_eq!(t.download, "2.0 KB/s");
    assert_eq!(t.upload, "0 B/s");
    assert_eq!(t.ratio, "1.23");
    assert_eq!(t.counts, "2 / 3 / 8");
    let rows = t.items.ready().expect("items ready");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].name, format!("{}...", "x".repeat(50)));
    assert_eq!(rows[0].full_name, long);
    assert_eq!(rows[1].name, "t1");
    assert_eq!(rows[4].name, "t4");
    assert_eq!(rows[1].down, "1.0 KB/s");
    assert_eq!(rows[1].percent, "50%");
}

#[test]
fn torrents_without_ratio_or_items() {
    let mut v = View::new();
    rendered(&mut v, "torrents", json!({"ratio": null, "topTorrents": null}));
    let t = v.torrents.ready().expect("torrents ready");
    assert_eq!(t.ratio, "--");
    assert_eq!(t.items, Panel::Empty("No active torrents"));

    rendered(&mut v, "torrents", json!({"ratio": 0.0}));
    assert_eq!(v.torrents.ready().map(|t| t.ratio.as_str()), Some("--"));
}

#[test]
fn downloads_limit_and_time_left() {
    let items: Vec<_> = (0..7)
        .map(|i| json!({"title": format!("d{i}"), "source": "Radarr", "progress": 10.0, "timeleft": ""}))
        .collect();
    let mut v = View::new();
    rendered(&mut v, "downloads", json!(items));
    let rows = v.downloads.ready().expect("downloads ready");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].source, "Radarr");
    assert_eq!(rows[0].source_class, "radarr");
    assert_eq!(rows[0].timeleft, "--");

    rendered(&mut v, "downloads", json!([]));
    assert_eq!(v.downloads, Panel::Empty("Queue empty"));
}

#[test]
fn requests_rows_carry_timestamps() {
    let mut v = View::new();
    rendered(
        &mut v,
        "requests",
        json!([{"title": "Dune", "type": "movie", "status": "Pending", "user": "ann",
                "requestedAt": "2026-01-01T00:00:00Z"}]),
    );
    let rows = v.requests.ready().expect("requests ready");
    assert_eq!(rows[0].status_class, "pending");
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 5, 0).unwrap();
    assert_eq!(rows[0].requested.render(now), "5m ago");
    assert_eq!(Ago(None).render(now), "--");

    rendered(&mut v, "requests", json!([]));
    assert_eq!(v.requests, Panel::Empty("No recent requests"));
}

#[test]
fn transcodes_idle_and_busy_workers() {
    let mut v = View::new();
    rendered(
        &mut v,
        "transcodes",
        json!({"pending": 3, "workers": [
            {"id": "w1", "status": "idle"},
            {"id": "w2", "status": "processing", "fileName": "movie.mkv", "progress": 42.0, "speed": "1.5x"},
            {"id": "w3", "status": "processing", "fileName": "other.mkv", "progress": 1.0}
        ]}),
    );
    let t = v.transcodes.ready().expect("transcodes ready");
    assert_eq!(t.pending, "Pending: 3");
    let w = t.workers.ready().expect("workers ready");
    assert_eq!(w[0].file, "Idle");
    assert!(w[0].fill.is_none());
    assert_eq!(w[1].file, "movie.mkv");
    assert_eq!(w[1].stats, "42.0% · 1.5x");
    assert_eq!(w[1].fill, Some(42.0));
    assert_eq!(w[2].stats, "1.0% · --");

    rendered(&mut v, "transcodes", json!({"pending": 0, "workers": []}));
    let t = v.transcodes.ready().expect("transcodes ready");
    assert_eq!(t.workers, Panel::Empty("No active workers"));
}

#[test]
fn health_severity() {
    let mut v = View::new();
    rendered(
        &mut v,
        "health",
        json!([
            {"source": "Sonarr", "type": "error", "message": "Indexer down"},
            {"source": "Radarr", "type": "warning", "message": "Disk low"},
            {"source": "Bazarr", "type": "notice", "message": "Hm"}
        ]),
    );
    let rows = v.health.ready().expect("health ready");
    let sev: Vec<_> = rows.iter().map(|r| r.severity).collect();
    assert_eq!(sev, vec![Severity::Error, Severity::Warning, Severity::Warning]);

    rendered(&mut v, "health", json!([]));
    assert_eq!(v.health, Panel::Empty("All systems healthy"));
}

#[test]
fn library_null_leaves_previous_counts() {
    let mut v = View::new();
    rendered(&mut v, "library", serde_json::Value::Null);
    assert!(v.library.is_none());

    rendered(
        &mut v,
        "library",
        json!({"movies": 1234, "series": 56, "episodes": 7890, "music": 1234567}),
    );
    let lib = v.library.clone().expect("library shown");
    assert_eq!(lib.movies, "1,234");
    assert_eq!(lib.songs, "1,234,567");

    rendered(&mut v, "library", serde_json::Value::Null);
    assert_eq!(v.library, Some(lib));
}

#[test]
fn ssh_window_switch_uses_retained_payload() {
    let mut v = View::new();
    rendered(
        &mut v,
        "sshSecurity",
        json!({
            "failed24h": 5, "failed7d": 50, "failed30d": 5000,
            "accepted24h": 1, "accepted7d": 7,
            "topOffenders": [
                {"ip": "1.2.3.4", "attempts": 40, "lastSeen": "2026-01-01T00:00:00Z"},
                {"ip": "5.6.7.8", "attempts": 10}
            ],
            "recentFailed": [{"user": "root", "ip": "1.2.3.4", "method": "password"}],
            "recentAccepted": null
        }),
    );
    assert_eq!(v.ssh.window, SshWindow::Day);
    assert_eq!(v.ssh.counters.failed, "5");
    assert_eq!(v.ssh.counters.accepted, "1");
    assert_eq!(v.ssh.counters.unique_ips, "2");
    assert_eq!(v.ssh.recent_accepted, Panel::Empty("No logins"));
    assert_eq!(v.ssh.offenders.ready().map(Vec::len), Some(2));

    select_ssh_window(&mut v, SshWindow::Week);
    assert_eq!(v.ssh.counters.failed, "50");
    select_ssh_window(&mut v, SshWindow::Day);
    assert_eq!(v.ssh.counters.failed, "5");
    select_ssh_window(&mut v, SshWindow::Week);
    assert_eq!(v.ssh.counters.failed, "50");

    // missing counter reads as zero
    select_ssh_window(&mut v, SshWindow::Month);
    assert_eq!(v.ssh.counters.failed, "5,000");
    assert_eq!(v.ssh.counters.accepted, "0");
}

#[test]
fn ssh_window_before_any_payload_is_harmless() {
    let mut v = View::new();
    select_ssh_window(&mut v, SshWindow::Month);
    assert_eq!(v.ssh.window, SshWindow::Month);
    assert!(v.ssh.retained.is_none());
    assert_eq!(v.ssh.counters.failed, "");

    // the window survives a later payload
    rendered(&mut v, "sshSecurity", json!({"failed30d": 9}));
    assert_eq!(v.ssh.counters.failed, "9");
    assert_eq!(v.ssh.offenders, Panel::Empty("No failed attempts"));
}

#[test]
fn rendering_is_idempotent_and_isolated() {
    let payload = json!({"dlSpeed": 10, "topTorrents": [{"name": "a"}]});
    let mut v = View::new();
    rendered(&mut v, "torrents", payload.clone());
    let once = v.torrents.clone();
    rendered(&mut v, "torrents", payload);
    assert_eq!(v.torrents, once);

    // other regions are untouched
    assert_eq!(v.services, Panel::Loading);
    assert_eq!(v.host, Panel::Loading);
    assert!(v.library.is_none());
}

#[test]
fn unknown_topic_is_ignored() {
    let mut v = View::new();
    let r = dispatch_frame(&mut v, r#"{"event":"weather","data":{"temp":3}}"#);
    assert_eq!(r, Dispatch::UnknownTopic("weather".into()));
    assert_eq!(v.host, Panel::Loading);
}

#[test]
fn malformed_frames_keep_previous_state() {
    let mut v = View::new();
    rendered(&mut v, "services", json!([{"name": "a", "health": "healthy"}]));
    let before = v.services.clone();

    let r = dispatch_frame(&mut v, "not json at all");
    assert!(matches!(r, Dispatch::Malformed { topic: None, .. }));

    let r = dispatch_frame(&mut v, r#"{"event":"services","data":"oops"}"#);
    assert!(matches!(
        r,
        Dispatch::Malformed {
            topic: Some(Topic::Services),
            ..
        }
    ));
    assert_eq!(v.services, before);
}

#[test]
fn envelope_without_data_renders_placeholder() {
    let mut v = View::new();
    let r = dispatch_frame(&mut v, r#"{"event":"health"}"#);
    assert_eq!(r, Dispatch::Rendered(Topic::Health));
    assert_eq!(v.health, Panel::Empty("All systems healthy"));
}
