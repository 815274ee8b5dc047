//! Exporter configuration, read from a RON file.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```ron
//! (
//!     mode: plain_text,
//!     output_dir: "exports/chats",
//!     selectors: (container: "#chat"),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use exporter_engine::{ContentMode, HostSelectors, ReadinessPolicy, DEFAULT_MAX_LABEL_LEN};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "chat_exporter.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    pub mode: ContentMode,
    pub file_name_max_length: usize,
    pub output_dir: PathBuf,
    pub selectors: HostSelectors,
    pub readiness: ReadinessConfig,
    pub log_file: Option<PathBuf>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            mode: ContentMode::Markup,
            file_name_max_length: DEFAULT_MAX_LABEL_LEN,
            output_dir: PathBuf::from("exports"),
            selectors: HostSelectors::default(),
            readiness: ReadinessConfig::default(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub poll_interval_ms: u64,
    pub deadline_ms: u64,
    pub settle_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        let policy = ReadinessPolicy::default();
        Self {
            poll_interval_ms: policy.poll_interval.as_millis() as u64,
            deadline_ms: policy.deadline.as_millis() as u64,
            settle_ms: policy.settle.as_millis() as u64,
        }
    }
}

impl ReadinessConfig {
    pub fn policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            deadline: Duration::from_millis(self.deadline_ms),
            settle: Duration::from_millis(self.settle_ms),
        }
    }
}

/// Load the config from `explicit`, or from `./chat_exporter.ron` when that
/// file exists, or fall back to defaults. Runs before logging is set up.
///
/// An explicitly named file must exist and parse.
pub fn load(explicit: Option<&Path>) -> Result<ExporterConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if !default_path.is_file() {
                return Ok(ExporterConfig::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid config {}", path.display()))
}

pub fn parse(content: &str) -> Result<ExporterConfig> {
    Ok(ron::from_str(content)?)
}
