//! Storage categories
//!
//! The closed set of file categories and the table mapping each one to its
//! directory under the data root.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::StorageError;

/// A named class of stored files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Maps,
    Markers,
    Configs,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Maps, Category::Markers, Category::Configs];

    /// Directory name and URL segment for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Maps => "maps",
            Category::Markers => "markers",
            Category::Configs => "configs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maps" => Ok(Category::Maps),
            "markers" => Ok(Category::Markers),
            "configs" => Ok(Category::Configs),
            other => Err(StorageError::InvalidCategory(other.to_string())),
        }
    }
}

/// Immutable category-to-directory table, fixed when constructed
#[derive(Debug, Clone)]
pub struct CategoryLocations {
    maps: PathBuf,
    markers: PathBuf,
    configs: PathBuf,
}

impl CategoryLocations {
    /// Lay out one subdirectory per category under `root`
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            maps: root.join(Category::Maps.as_str()),
            markers: root.join(Category::Markers.as_str()),
            configs: root.join(Category::Configs.as_str()),
        }
    }

    pub fn resolve(&self, category: Category) -> &Path {
        match category {
            Category::Maps => &self.maps,
            Category::Markers => &self.markers,
            Category::Configs => &self.configs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!("maps".parse::<Category>().unwrap(), Category::Maps);
        assert_eq!("markers".parse::<Category>().unwrap(), Category::Markers);
        assert_eq!("configs".parse::<Category>().unwrap(), Category::Configs);
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "tiles".parse::<Category>().unwrap_err();
        assert!(matches!(err, StorageError::InvalidCategory(c) if c == "tiles"));

        // Case sensitive, matching the on-disk directory names
        assert!("Maps".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_locations_are_distinct_subdirectories() {
        let locations = CategoryLocations::from_root("/srv/data");
        assert_eq!(
            locations.resolve(Category::Maps),
            Path::new("/srv/data/maps")
        );
        assert_eq!(
            locations.resolve(Category::Markers),
            Path::new("/srv/data/markers")
        );
        assert_eq!(
            locations.resolve(Category::Configs),
            Path::new("/srv/data/configs")
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }
}
