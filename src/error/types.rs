//! Error types
//!
//! Defines domain-specific error types for the storage layer and the server.

use std::fmt;
use std::io;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// Category name outside the fixed enumeration
    InvalidCategory(String),
    /// Empty, hidden, oversized, or otherwise unusable file name
    InvalidFileName(String),
    /// File name that would resolve outside its category location
    PathTraversal(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidCategory(c) => write!(f, "Invalid category: {}", c),
            StorageError::InvalidFileName(n) => write!(f, "Invalid file name: {}", n),
            StorageError::PathTraversal(n) => write!(f, "Path traversal attempt: {}", n),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General server error raised while starting or running the service
#[derive(Debug)]
pub enum ServerError {
    Storage(StorageError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Storage(e) => write!(f, "Storage error: {}", e),
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<StorageError> for ServerError {
    fn from(error: StorageError) -> Self {
        ServerError::Storage(error)
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}
