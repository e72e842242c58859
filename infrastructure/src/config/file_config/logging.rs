//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving every mission turn (disabled when unset)
    pub conversation_log: Option<PathBuf>,
    /// Directory for daily-rotated diagnostic logs (stderr only when unset)
    pub log_dir: Option<PathBuf>,
}
