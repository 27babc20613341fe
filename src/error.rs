use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagError {
    #[error("Hosts file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Hosts file contains no valid hosts")]
    NoValidHosts,

    #[error("Unsupported OS: {0}")]
    NotImplemented(String),

    #[error("Cannot run an empty command")]
    EmptyCommand,

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid probe configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DiagError {
    /// Errors the CLI reports to the user instead of letting them escape `main`.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, DiagError::FileNotFound(_) | DiagError::NoValidHosts)
    }
}

pub type Result<T> = std::result::Result<T, DiagError>;
