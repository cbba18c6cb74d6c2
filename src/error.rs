//! Error types and exit codes for alias-index

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for alias-index operations
#[derive(Error, Debug)]
pub enum AliasIndexError {
    /// A shard record could not be parsed. Fatal for the whole run.
    #[error("Corrupt shard {path}: line {line}: {message}")]
    ShardCorrupt {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to read shard {path}: {source}")]
    ShardIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AliasIndexError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Numeric exit status for this error:
    /// - 0: Success
    /// - 1: IO error (including unreadable shards)
    /// - 2: Configuration error
    /// - 3: Corrupt shard record
    /// - 4: Internal failure (worker pool, serialization)
    pub fn code(&self) -> u8 {
        match self {
            Self::ShardIo { .. } => 1,
            Self::Io(_) => 1,
            Self::Config { .. } => 2,
            Self::ShardCorrupt { .. } => 3,
            Self::WorkerPool { .. } => 4,
            Self::Serialization { .. } => 4,
        }
    }

    /// Convert error to appropriate process exit code
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<serde_json::Error> for AliasIndexError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

/// Result type alias for alias-index operations
pub type Result<T> = std::result::Result<T, AliasIndexError>;
