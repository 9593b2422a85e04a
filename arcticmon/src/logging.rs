//! Log setup. The terminal belongs to the dashboard, so records go to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::profiles::config_dir;

pub fn default_log_path() -> PathBuf {
    config_dir().join("arcticmon.log")
}

/// Install the global subscriber writing to `path` (appending). `RUST_LOG`
/// overrides the default `info` filter. When the file cannot be opened every
/// record is discarded; returns whether the file is in use.
pub fn init_logging(path: &Path) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(path));

    match file {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            true
        }
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
            false
        }
    }
}
