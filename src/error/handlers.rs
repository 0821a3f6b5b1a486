//! Error handlers
//!
//! Maps storage errors onto HTTP status codes and logs them.

use axum::http::StatusCode;
use log::{error, warn};

use crate::error::types::StorageError;

/// Log a storage error at a level matching its severity
pub fn handle_error(err: &StorageError) {
    match err {
        StorageError::IoError(_) => error!("Storage failure: {}", err),
        _ => warn!("Rejected request: {}", err),
    }
}

/// Convert a storage error to the HTTP status code returned to clients
pub fn status_for(err: &StorageError) -> StatusCode {
    match err {
        StorageError::InvalidCategory(_) => StatusCode::NOT_FOUND,
        StorageError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
        StorageError::PathTraversal(_) => StatusCode::BAD_REQUEST,
        StorageError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&StorageError::InvalidCategory("tiles".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&StorageError::PathTraversal("../x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&StorageError::InvalidFileName("".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&StorageError::IoError(io::Error::other("disk full"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
