use std::error::Error;
use std::io;
use thiserror::Error;

/// Errors raised by the vault-backed note stores.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File name cannot contain any of the following characters: * \" \\ / < > : | ? ({0})")]
    InvalidFileName(String),

    #[error("Invalid base path: {0}")]
    InvalidBasePath(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while reading or writing the settings blob on disk.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError<E: Error + 'static> {
    #[error("Settings persistence error: {0}")]
    Persistence(#[source] E),

    #[error("Malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure of a single note submission.
///
/// Displays as the underlying error so the notification carries the store's or the
/// editor's own description.
#[derive(Debug, Error)]
pub enum SubmitError<S: Error + 'static, E: Error + 'static> {
    #[error(transparent)]
    Store(S),

    #[error(transparent)]
    Editor(E),
}
