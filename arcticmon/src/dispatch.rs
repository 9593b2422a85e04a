//! Event dispatcher: routes `(topic, payload)` pairs to the topic renderer.
//!
//! Unknown topics are ignored so the server can add topics without breaking
//! older clients. A payload that does not match its topic's schema is
//! dropped and logged, the same as a frame that is not JSON at all; the
//! region keeps showing the previous snapshot.

use serde_json::Value;
use tracing::{debug, warn};

use crate::render;
use crate::types::{Envelope, Snapshot, Topic};
use crate::view::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Rendered(Topic),
    UnknownTopic(String),
    /// Not a valid envelope, or a payload of the wrong shape for its topic.
    Malformed {
        topic: Option<Topic>,
        error: String,
    },
}

/// Decode one live-stream frame and dispatch it.
pub fn dispatch_frame(view: &mut View, frame: &str) -> Dispatch {
    match serde_json::from_str::<Envelope>(frame) {
        Ok(env) => dispatch(view, &env.event, env.data),
        Err(e) => {
            warn!(error = %e, "discarding malformed live message");
            Dispatch::Malformed {
                topic: None,
                error: e.to_string(),
            }
        }
    }
}

pub fn dispatch(view: &mut View, event: &str, data: Value) -> Dispatch {
    match event.parse::<Topic>() {
        Ok(topic) => dispatch_topic(view, topic, data),
        Err(_) => {
            debug!(event, "ignoring unknown topic");
            Dispatch::UnknownTopic(event.to_string())
        }
    }
}

pub fn dispatch_topic(view: &mut View, topic: Topic, data: Value) -> Dispatch {
    match Snapshot::decode(topic, data) {
        Ok(snapshot) => {
            render::apply(view, snapshot);
            Dispatch::Rendered(topic)
        }
        Err(e) => {
            warn!(%topic, error = %e, "discarding payload with unexpected shape");
            Dispatch::Malformed {
                topic: Some(topic),
                error: e.to_string(),
            }
        }
    }
}
