//! Application-wide error types and result alias.
//!
//! `TaskpadError` collects failures from the remote collection, local
//! validation, configuration loading, and the terminal into one enum.
//!
//! Modules return the shared `Result<T>` alias so controller and runtime code
//! can propagate errors through a consistent type. `kind()` folds the
//! transport-level variants into the three categories users see.

use std::io;

use crate::item::ItemId;

#[derive(Debug, thiserror::Error)]
pub enum TaskpadError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("item {0} not found")]
    NotFound(ItemId),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// User-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    NotFound,
    Validation,
    Other,
}

impl TaskpadError {
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        TaskpadError::Transport(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        TaskpadError::Validation(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        TaskpadError::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskpadError::Transport(_)
            | TaskpadError::Http(_)
            | TaskpadError::Json(_)
            | TaskpadError::Url(_) => ErrorKind::Transport,
            TaskpadError::NotFound(_) => ErrorKind::NotFound,
            TaskpadError::Validation(_) => ErrorKind::Validation,
            TaskpadError::Io(_)
            | TaskpadError::TomlDe(_)
            | TaskpadError::Config(_)
            | TaskpadError::Other(_) => ErrorKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, TaskpadError>;

impl From<String> for TaskpadError {
    fn from(s: String) -> Self {
        TaskpadError::Other(s)
    }
}

impl From<&str> for TaskpadError {
    fn from(s: &str) -> Self {
        TaskpadError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error() {
        let err = TaskpadError::transport("connection refused");
        assert_eq!(err.to_string(), "transport error: connection refused");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_not_found_error() {
        let err = TaskpadError::NotFound(ItemId::from("42"));
        assert_eq!(err.to_string(), "item 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let err = TaskpadError::validation("title must not be empty");
        assert_eq!(
            err.to_string(),
            "validation error: title must not be empty"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_config_error() {
        let err = TaskpadError::config("missing file");
        assert_eq!(err.to_string(), "Configuration error: missing file");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_json_error_counts_as_transport() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TaskpadError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TaskpadError = io_err.into();
        assert!(matches!(err, TaskpadError::Io(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_string_conversion() {
        let err: TaskpadError = "string error".into();
        assert_eq!(err.to_string(), "string error");

        let err: TaskpadError = String::from("owned string error").into();
        assert_eq!(err.to_string(), "owned string error");
    }
}
