//! Content loaders for reading loadout data from files.
//!
//! Each loader has a `load` entry point taking a path and a `parse` entry
//! point taking the file contents, so embedded data goes through the same
//! code as files on disk.

pub mod categories;
pub mod config;
pub mod factory;
pub mod items;

pub use categories::{CategoryLoader, CategorySpec};
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use items::{ItemCatalog, ItemLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
