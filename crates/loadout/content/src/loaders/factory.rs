//! Content factory for building the definition database and catalogs from
//! data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use loadout_core::{CategoryCatalog, DefDatabase, LoadContext, LoadoutConfig};

use crate::loaders::{CategoryLoader, ConfigLoader, ItemLoader, LoadResult};

/// Everything the rules engine needs from content.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub defs: DefDatabase,
    pub categories: CategoryCatalog,
    pub config: LoadoutConfig,
}

impl Content {
    /// Name resolution for restoring saved loadouts.
    pub fn load_context(&self) -> LoadContext<'_> {
        LoadContext::new(&self.defs, &self.categories)
    }
}

/// Content factory that loads all loadout content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── items.ron
/// └── categories.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load selector defaults from `config.toml`, falling back to the
    /// built-in defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<LoadoutConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config.toml; using defaults");
            return Ok(LoadoutConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item and material definitions from `items.ron`.
    pub fn load_items(&self) -> LoadResult<DefDatabase> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load generic categories from `categories.ron`.
    pub fn load_categories(&self, defs: &DefDatabase) -> LoadResult<CategoryCatalog> {
        let path = self.data_dir.join("categories.ron");
        CategoryLoader::load(&path, defs)
    }

    /// Load everything.
    pub fn load_all(&self) -> LoadResult<Content> {
        let defs = self
            .load_items()
            .with_context(|| format!("loading items from {}", self.data_dir.display()))?;
        let categories = self
            .load_categories(&defs)
            .with_context(|| format!("loading categories from {}", self.data_dir.display()))?;
        let config = self.load_config()?;

        tracing::info!(
            data_dir = %self.data_dir.display(),
            items = defs.item_count(),
            categories = categories.len(),
            "content loaded"
        );
        Ok(Content {
            defs,
            categories,
            config,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn test_loads_shipped_data_directory() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let content = factory.load_all().expect("shipped data loads");

        assert!(content.defs.item_count() > 0);
        assert!(content.categories.get("any_meal").is_some());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let factory = ContentFactory::new("/nonexistent/loadout-data");
        assert!(factory.load_all().is_err());
    }
}
