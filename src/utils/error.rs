//! Centralized error types for todoboard
//!
//! Library code returns [`TodoBoardError`]. The config, snapshot and CLI
//! layers carry it inside `anyhow`, so `main` can still downcast it for the
//! log level and the user hint.

use std::path::PathBuf;
use thiserror::Error;

/// Global error type for todoboard operations
#[derive(Error, Debug)]
pub enum TodoBoardError {
    /// Switching to (or reading) a session id that is not in the store
    #[error("Session \"{session_id}\" not found")]
    SessionNotFound { session_id: String },

    /// An operation needed a current session but none is selected
    #[error("No active session is selected")]
    NoActiveSession,

    /// Malformed todo entries or other invalid caller input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors with path context
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl TodoBoardError {
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound {
            session_id: session_id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Returns the level this error should be logged at
    pub fn severity(&self) -> tracing::Level {
        match self {
            TodoBoardError::Config { .. } => tracing::Level::ERROR,
            TodoBoardError::Serialization { .. } => tracing::Level::ERROR,
            TodoBoardError::Io { .. } => tracing::Level::WARN,
            TodoBoardError::SessionNotFound { .. } => tracing::Level::INFO,
            TodoBoardError::NoActiveSession => tracing::Level::INFO,
            TodoBoardError::InvalidInput { .. } => tracing::Level::INFO,
        }
    }

    /// Context-aware hint for the user, if there is one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            TodoBoardError::SessionNotFound { .. } => {
                Some("Run 'todoboard list' to see the active sessions.".to_string())
            }
            TodoBoardError::NoActiveSession => Some(
                "Resume a chat or switch to a session before updating todos.".to_string(),
            ),
            TodoBoardError::InvalidInput { message } if message.contains("content") => {
                Some("Every todo needs a non-empty \"content\" and a \"status\".".to_string())
            }
            TodoBoardError::Config { .. } => Some(
                "Check your config.json file or TODOBOARD_* environment variables.".to_string(),
            ),
            _ => None,
        }
    }
}

/// Result type alias using TodoBoardError
pub type Result<T> = std::result::Result<T, TodoBoardError>;

impl From<serde_json::Error> for TodoBoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
