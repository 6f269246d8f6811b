//! Content compiled into the binary.
//!
//! The files under `data/` are embedded with `include_str!`, so tools work
//! without a data directory on disk.

use crate::loaders::{CategoryLoader, ConfigLoader, Content, ItemLoader, LoadResult};

const ITEMS_RON: &str = include_str!("../data/items.ron");
const CATEGORIES_RON: &str = include_str!("../data/categories.ron");
const CONFIG_TOML: &str = include_str!("../data/config.toml");

/// Parses the embedded content.
pub fn load() -> LoadResult<Content> {
    let defs = ItemLoader::parse(ITEMS_RON)?;
    let categories = CategoryLoader::parse(CATEGORIES_RON, &defs)?;
    let config = ConfigLoader::parse(CONFIG_TOML)?;
    Ok(Content {
        defs,
        categories,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::{DefOracle, IdAllocator, ItemKind, Loadout, Thing, ThingSelector};

    #[test]
    fn test_builtin_content_loads() {
        let content = load().expect("embedded content parses");

        assert!(content.defs.item(&ItemKind::new("longsword")).is_some());
        assert_eq!(content.categories.len(), 5);
        assert_eq!(content.config, loadout_core::LoadoutConfig::default());
    }

    #[test]
    fn test_builtin_categories_drive_matching() {
        let content = load().unwrap();
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("traveller");
        let any_meal = content.categories.get("any_meal").unwrap();
        loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal), None)
            .unwrap();

        let pemmican = content.defs.item(&ItemKind::new("pemmican")).unwrap();
        let berries = content.defs.item(&ItemKind::new("berries")).unwrap();
        assert!(loadout.allows(&Thing::new(pemmican), 0).is_some());
        assert!(loadout.allows(&Thing::new(berries), 0).is_none());
    }
}
