//! Error types for matcache
//!
//! Commands and worker tasks return `MatcacheResult<T>`. Per-line parse
//! failures and per-matrix write failures are not errors at this level:
//! they are collected as values in [`crate::processor::FileOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for matcache operations
pub type MatcacheResult<T> = Result<T, MatcacheError>;

/// Conditions that end a command or a single worker task
#[derive(Error, Debug)]
pub enum MatcacheError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Input errors
    #[error("No input directory given")]
    InputDirMissing,

    #[error("Input directory not found: {0}")]
    InputDirNotFound(PathBuf),

    #[error("Failed to read input directory {path}: {source}")]
    InputDirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache store errors
    #[error("Invalid cache address {address}: {source}")]
    StoreAddress {
        address: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("Failed to connect to cache at {address}: {source}")]
    StoreConnect {
        address: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("Cache command {command} failed for key {key}: {source}")]
    StoreCommand {
        command: &'static str,
        key: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Key not found in cache: {0}")]
    KeyNotFound(String),

    #[error("Malformed cached value at {key}: {reason}")]
    MalformedValue { key: String, reason: String },

    // Task errors
    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl MatcacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a cache command error
    pub fn store_command(command: &'static str, key: impl Into<String>, source: redis::RedisError) -> Self {
        Self::StoreCommand {
            command,
            key: key.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InputDirMissing => {
                Some("Pass a directory: matcache process <DIR>, or set input.dir in the config")
            }
            Self::StoreConnect { .. } => Some("Is Redis running? Check cache.host and cache.port"),
            Self::KeyNotFound(_) => Some("Matrix keys look like <file_path>_<index>"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MatcacheError::InputDirNotFound(PathBuf::from("/no/such/dir"));
        assert!(err.to_string().contains("Input directory not found"));
    }

    #[test]
    fn error_hint() {
        let err = MatcacheError::KeyNotFound("a.txt_0".to_string());
        assert_eq!(err.hint(), Some("Matrix keys look like <file_path>_<index>"));
        assert!(MatcacheError::Internal("x".to_string()).hint().is_none());
    }
}
