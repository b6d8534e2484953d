//! Configuration schema for matcache
//!
//! Configuration is stored at `~/.config/matcache/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default report file, overwritten on every run
pub const DEFAULT_REPORT_FILE: &str = "task-mat-redis-cache-parallel-testing.txt";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input settings
    pub input: InputConfig,

    /// Redis connection settings
    pub cache: CacheConfig,

    /// Worker pool settings
    pub workers: WorkersConfig,

    /// Timing report settings
    pub report: ReportConfig,
}

/// Where matrix source files are read from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory whose regular files are processed (non-recursive)
    pub dir: Option<PathBuf>,
}

/// Redis connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis host
    pub host: String,

    /// Redis port
    pub port: u16,

    /// Logical database index
    pub db: i64,
}

impl CacheConfig {
    /// Connection URL understood by the redis client
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
        }
    }
}

/// Worker pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkersConfig {
    /// Upper bound on concurrent file tasks (further capped by CPU count)
    pub max_workers: usize,

    /// Seconds to wait for all files before abandoning the rest
    pub timeout_secs: u64,
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            timeout_secs: 600,
        }
    }
}

/// Timing report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File the timing line is written to
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }
}
