//! `speedclip.toml` config loading.

use serde::{Deserialize, Serialize};

use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "speedclip.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Pretty-print the clipped document.
    pub pretty: bool,

    /// Print the per-profile crop report to stderr.
    pub report: bool,
}

impl Config {
    /// Reads `path` if it exists. A broken file is logged and ignored.
    pub fn load_optional(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "config unreadable; using defaults");
                return Self::default();
            }
        };
        match toml::from_str::<Self>(&text) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), ?config, "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "config invalid; using defaults");
                Self::default()
            }
        }
    }
}
