//! File system storage management
//!
//! Category resolution, file name validation, and the file operations the
//! HTTP layer exposes.

pub mod category;
pub mod filesystem;
pub mod operations;
pub mod validation;

pub use category::{Category, CategoryLocations};
pub use operations::CategoryStore;
pub use validation::{HIDDEN_PREFIX, validate_filename};
