//! Types that mirror the dashboard server's JSON schema.
//!
//! Every struct tolerates missing fields (they take their `Default`) and
//! list fields accept `null` as empty, because the server emits `null` for
//! collections it has not populated yet.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

fn null_as_blank<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// The ten categories of server state the dashboard knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Host,
    Services,
    Streams,
    Torrents,
    Downloads,
    Requests,
    Transcodes,
    Health,
    Library,
    SshSecurity,
}

impl Topic {
    pub const ALL: [Topic; 10] = [
        Topic::Host,
        Topic::Services,
        Topic::Streams,
        Topic::Torrents,
        Topic::Downloads,
        Topic::Requests,
        Topic::Transcodes,
        Topic::Health,
        Topic::Library,
        Topic::SshSecurity,
    ];

    /// Wire name, as used both for envelope `event` fields and overview keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Host => "host",
            Topic::Services => "services",
            Topic::Streams => "streams",
            Topic::Torrents => "torrents",
            Topic::Downloads => "downloads",
            Topic::Requests => "requests",
            Topic::Transcodes => "transcodes",
            Topic::Health => "health",
            Topic::Library => "library",
            Topic::SshSecurity => "sshSecurity",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTopic(pub String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

/// One message on the live stream.
#[derive(Debug, Deserialize, Clone)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

// ---------- host ----------

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CpuCore {
    pub id: u32,
    pub percent: f64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Disk {
    #[serde(deserialize_with = "null_as_blank")]
    pub mount: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub label: String,
    pub total: u64,
    pub used: u64,
    pub percent: f64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Gpu {
    #[serde(deserialize_with = "null_as_blank")]
    pub name: String,
    pub temp_c: i32,
    pub util_percent: u32,
    pub mem_used: u64,
    pub mem_total: u64,
    pub mem_percent: f64,
    pub available: bool,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Host {
    pub cpu_percent: f64,
    // None and empty both mean "no per-core data"
    pub cpu_cores: Option<Vec<CpuCore>>,
    pub mem_total: u64,
    pub mem_used: u64,
    pub mem_percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
    #[serde(deserialize_with = "null_as_empty")]
    pub disks: Vec<Disk>,
    pub gpu: Option<Gpu>,
    pub ssh_sessions: u32,
    #[serde(deserialize_with = "null_as_blank")]
    pub uptime: String,
}

// ---------- services / streams ----------

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    #[serde(deserialize_with = "null_as_blank")]
    pub name: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub status: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub health: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub image: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub uptime: String,
    pub external_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Stream {
    #[serde(deserialize_with = "null_as_blank")]
    pub user: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub title: String,
    pub series: Option<String>,
    pub episode: Option<String>,
    #[serde(deserialize_with = "null_as_blank")]
    pub client: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub device: String,
    pub progress: f64,
    pub transcoding: bool,
    #[serde(deserialize_with = "null_as_blank")]
    pub play_method: String,
}

// ---------- torrents / downloads / requests ----------

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TorrentBrief {
    #[serde(deserialize_with = "null_as_blank")]
    pub name: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub state: String,
    pub progress: f64,
    pub dl_speed: u64,
    pub up_speed: u64,
    pub size: u64,
    pub ratio: f64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Torrents {
    pub dl_speed: u64,
    pub up_speed: u64,
    pub ratio: Option<f64>,
    pub active_count: u32,
    pub seeding_count: u32,
    pub total_count: u32,
    #[serde(deserialize_with = "null_as_empty")]
    pub top_torrents: Vec<TorrentBrief>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Download {
    #[serde(deserialize_with = "null_as_blank")]
    pub title: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub source: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub status: String,
    pub progress: f64,
    pub size: u64,
    #[serde(deserialize_with = "null_as_blank")]
    pub timeleft: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaRequest {
    #[serde(deserialize_with = "null_as_blank")]
    pub title: String,
    #[serde(rename = "type", deserialize_with = "null_as_blank")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub status: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub user: String,
    // RFC 3339
    #[serde(deserialize_with = "null_as_blank")]
    pub requested_at: String,
}

// ---------- transcodes / health / library ----------

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TranscodeWorker {
    #[serde(deserialize_with = "null_as_blank")]
    pub id: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub file_name: String,
    pub progress: f64,
    pub fps: f64,
    #[serde(deserialize_with = "null_as_blank")]
    pub speed: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub status: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Transcodes {
    #[serde(deserialize_with = "null_as_empty")]
    pub workers: Vec<TranscodeWorker>,
    pub pending: u32,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthWarning {
    #[serde(deserialize_with = "null_as_blank")]
    pub source: String,
    #[serde(rename = "type", deserialize_with = "null_as_blank")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub message: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Library {
    pub movies: u64,
    pub series: u64,
    pub episodes: u64,
    // the server model calls this `music`
    #[serde(alias = "music")]
    pub songs: u64,
}

// ---------- ssh security ----------

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SshOffender {
    #[serde(deserialize_with = "null_as_blank")]
    pub ip: String,
    pub attempts: u64,
    #[serde(deserialize_with = "null_as_blank")]
    pub last_seen: String,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SshAuthEvent {
    #[serde(deserialize_with = "null_as_blank")]
    pub time: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub user: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub method: String,
    pub success: bool,
}

/// Per-window counters are optional so a missing field can fall back to 0
/// at display time without being confused with a real zero on the wire.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SshSecurity {
    #[serde(rename = "failed24h")]
    pub failed_24h: Option<u64>,
    #[serde(rename = "failed7d")]
    pub failed_7d: Option<u64>,
    #[serde(rename = "failed30d")]
    pub failed_30d: Option<u64>,
    #[serde(rename = "accepted24h")]
    pub accepted_24h: Option<u64>,
    #[serde(rename = "accepted7d")]
    pub accepted_7d: Option<u64>,
    #[serde(rename = "accepted30d")]
    pub accepted_30d: Option<u64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub top_offenders: Vec<SshOffender>,
    #[serde(deserialize_with = "null_as_empty")]
    pub recent_failed: Vec<SshAuthEvent>,
    #[serde(deserialize_with = "null_as_empty")]
    pub recent_accepted: Vec<SshAuthEvent>,
}

/// A decoded payload for one topic. Each variant fully replaces the prior
/// value for its topic; there is no merging.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Host(Option<Host>),
    Services(Vec<Service>),
    Streams(Vec<Stream>),
    Torrents(Torrents),
    Downloads(Vec<Download>),
    Requests(Vec<MediaRequest>),
    Transcodes(Transcodes),
    Health(Vec<HealthWarning>),
    Library(Option<Library>),
    SshSecurity(SshSecurity),
}

impl Snapshot {
    /// Decode the payload for `topic`. A JSON `null` payload is accepted and
    /// maps to the topic's empty value (or `None` where absence matters).
    pub fn decode(topic: Topic, data: serde_json::Value) -> Result<Self, serde_json::Error> {
        fn opt<T: DeserializeOwned>(v: serde_json::Value) -> Result<Option<T>, serde_json::Error> {
            serde_json::from_value(v)
        }
        Ok(match topic {
            Topic::Host => Snapshot::Host(opt(data)?),
            Topic::Services => Snapshot::Services(opt(data)?.unwrap_or_default()),
            Topic::Streams => Snapshot::Streams(opt(data)?.unwrap_or_default()),
            Topic::Torrents => Snapshot::Torrents(opt(data)?.unwrap_or_default()),
            Topic::Downloads => Snapshot::Downloads(opt(data)?.unwrap_or_default()),
            Topic::Requests => Snapshot::Requests(opt(data)?.unwrap_or_default()),
            Topic::Transcodes => Snapshot::Transcodes(opt(data)?.unwrap_or_default()),
            Topic::Health => Snapshot::Health(opt(data)?.unwrap_or_default()),
            Topic::Library => Snapshot::Library(opt(data)?),
            Topic::SshSecurity => Snapshot::SshSecurity(opt(data)?.unwrap_or_default()),
        })
    }

    pub fn topic(&self) -> Topic {
        match self {
            Snapshot::Host(_) => Topic::Host,
            Snapshot::Services(_) => Topic::Services,
            Snapshot::Streams(_) => Topic::Streams,
            Snapshot::Torrents(_) => Topic::Torrents,
            Snapshot::Downloads(_) => Topic::Downloads,
            Snapshot::Requests(_) => Topic::Requests,
            Snapshot::Transcodes(_) => Topic::Transcodes,
            Snapshot::Health(_) => Topic::Health,
            Snapshot::Library(_) => Topic::Library,
            Snapshot::SshSecurity(_) => Topic::SshSecurity,
        }
    }
}
