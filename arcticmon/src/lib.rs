//! arcticmon: terminal dashboard for an Arctic Monitor server.
//!
//! Bootstraps from `GET api/overview`, then follows the live event stream at
//! `GET api/events` and redraws the affected region per topic. Maintenance
//! actions are posted to `api/actions/{name}`.

pub mod actions;
pub mod app;
pub mod bootstrap;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod live;
pub mod logging;
pub mod profiles;
pub mod render;
pub mod sse;
pub mod types;
pub mod ui;
pub mod view;
