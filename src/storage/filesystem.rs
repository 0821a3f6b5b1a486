//! File system operations
//!
//! Thin async wrappers over `tokio::fs` used by the category store.

use log::{debug, error};
use std::io::{ErrorKind, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::storage::validation::HIDDEN_PREFIX;

/// Create a directory and any missing parents; succeeds if it already exists
pub async fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await
}

/// Remove a file, reporting whether it was present
pub async fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Read a whole file, returning `None` if it does not exist
pub async fn read_file_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write `content` to `dir/filename` through a temporary file.
///
/// The data goes to a hidden, uniquely named file in the same directory and is
/// renamed into place once synced. Any failure removes the temporary file, so
/// the destination either keeps its previous content or holds the full payload.
pub async fn write_file_atomic(dir: &Path, filename: &str, content: &[u8]) -> Result<()> {
    let final_path = dir.join(filename);
    // Fixed length, independent of the destination name
    let temp_path = dir.join(format!("{HIDDEN_PREFIX}{}.tmp", Uuid::new_v4().simple()));

    if let Err(e) = write_and_sync(&temp_path, content).await {
        error!("Failed to write temporary file {}: {e}", temp_path.display());
        discard_temp(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, &final_path).await {
        error!(
            "Failed to rename {} to {}: {e}",
            temp_path.display(),
            final_path.display()
        );
        discard_temp(&temp_path).await;
        return Err(e);
    }

    Ok(())
}

async fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}

async fn discard_temp(path: &Path) {
    if let Err(e) = remove_file_if_exists(path).await {
        debug!("Could not clean up {}: {e}", path.display());
    }
}
