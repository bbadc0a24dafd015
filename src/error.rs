//! Error types for the zettel store.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for store operations
pub type VaultResult<T> = Result<T, VaultError>;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("unsupported ID type: {0}")]
    UnsupportedIdType(String),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("invalid encoding charset: {0}")]
    InvalidCharset(String),

    #[error("malformed note file: {0}")]
    MalformedNoteFile(String),

    #[error("missing tag name in {0}")]
    MissingTagName(PathBuf),

    #[error("tag or alias already registered: {0}")]
    DuplicateKey(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl VaultError {
    /// Create a new invalid-charset error
    pub fn charset(message: impl Into<String>) -> Self {
        VaultError::InvalidCharset(message.into())
    }

    /// Create a new malformed-note error
    pub fn malformed(message: impl Into<String>) -> Self {
        VaultError::MalformedNoteFile(message.into())
    }
}
