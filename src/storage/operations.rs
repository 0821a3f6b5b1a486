//! Storage operations
//!
//! The category store: list, save, read, and delete files inside the
//! directory backing each category.

use log::{info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::StorageError;
use crate::storage::category::{Category, CategoryLocations};
use crate::storage::filesystem::{
    create_directory, read_file_if_exists, remove_file_if_exists, write_file_atomic,
};
use crate::storage::validation::{is_hidden, validate_filename};

/// Extension of the config file paired with each map
const MAP_CONFIG_EXTENSION: &str = ".json";

/// File store scoped by category.
///
/// Holds no mutable state; every call resolves its location and touches the
/// file system afresh.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    locations: CategoryLocations,
}

impl CategoryStore {
    pub fn new(locations: CategoryLocations) -> Self {
        Self { locations }
    }

    /// Store rooted at `root`, with one subdirectory per category
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self::new(CategoryLocations::from_root(root))
    }

    pub fn resolve_location(&self, category: Category) -> &Path {
        self.locations.resolve(category)
    }

    /// Create the location backing `category` if missing
    pub async fn ensure_location(&self, category: Category) -> Result<&Path, StorageError> {
        let location = self.resolve_location(category);
        create_directory(location).await?;
        Ok(location)
    }

    /// Create every category location
    pub async fn ensure_all_locations(&self) -> Result<(), StorageError> {
        for category in Category::ALL {
            self.ensure_location(category).await?;
        }
        Ok(())
    }

    /// Names of visible files in `category`.
    ///
    /// A location that does not exist yet lists as empty.
    pub async fn list(&self, category: Category) -> Result<Vec<String>, StorageError> {
        let location = self.resolve_location(category);

        let mut entries = match fs::read_dir(location).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // Names that are not UTF-8 could never be read back or deleted
            let Ok(name) = entry.file_name().into_string() else {
                warn!("Skipping non UTF-8 entry in {}", category);
                continue;
            };
            if is_hidden(&name) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            names.push(name);
        }
        names.sort();

        info!("Listed {} - {} entries", category, names.len());
        Ok(names)
    }

    /// Write `content` as `filename` in `category`, replacing any previous file
    pub async fn save(
        &self,
        category: Category,
        filename: &str,
        content: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let filename = validate_filename(filename)?;
        let location = self.ensure_location(category).await?;

        write_file_atomic(location, filename, content).await?;

        let path = location.join(filename);
        info!(
            "Saved {}/{} ({} bytes, real: {})",
            category,
            filename,
            content.len(),
            path.display()
        );
        Ok(path)
    }

    /// Full content of `filename`, or `None` if it does not exist
    pub async fn read(
        &self,
        category: Category,
        filename: &str,
    ) -> Result<Option<Vec<u8>>, StorageError> {
        let filename = validate_filename(filename)?;
        let path = self.resolve_location(category).join(filename);

        let content = read_file_if_exists(&path).await?;
        if content.is_none() {
            info!("Read {}/{}: not found", category, filename);
        }
        Ok(content)
    }

    /// Remove `filename` from `category`, returning whether it existed.
    ///
    /// Deleting a map also removes its companion `<name>.json` from configs.
    /// That second delete is best effort: it runs whatever the outcome of the
    /// first, and its own outcome is only logged.
    pub async fn delete(&self, category: Category, filename: &str) -> Result<bool, StorageError> {
        let filename = validate_filename(filename)?;
        let path = self.resolve_location(category).join(filename);

        let primary = remove_file_if_exists(&path).await.map_err(StorageError::from);
        match &primary {
            Ok(true) => info!("Deleted {}/{}", category, filename),
            Ok(false) => info!("Delete {}/{}: not found", category, filename),
            Err(e) => warn!("Failed to delete {}/{}: {}", category, filename, e),
        }

        if category == Category::Maps {
            self.delete_map_config(filename).await;
        }

        primary
    }

    async fn delete_map_config(&self, map_name: &str) {
        let config_name = format!("{map_name}{MAP_CONFIG_EXTENSION}");
        let path = self.resolve_location(Category::Configs).join(&config_name);

        match remove_file_if_exists(&path).await {
            Ok(true) => info!("Deleted companion config {}/{}", Category::Configs, config_name),
            Ok(false) => {}
            Err(e) => warn!(
                "Failed to delete companion config {}/{}: {}",
                Category::Configs,
                config_name,
                e
            ),
        }
    }
}
