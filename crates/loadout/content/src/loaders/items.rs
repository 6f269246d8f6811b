//! Item and material definition loader.

use std::path::Path;

use loadout_core::{DefDatabase, DefOracle, ItemDefinition, MaterialDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    #[serde(default)]
    pub materials: Vec<MaterialDefinition>,
    pub items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    /// Builds a definition database.
    ///
    /// Items made from a material must name a known default material.
    pub fn into_database(self) -> LoadResult<DefDatabase> {
        let mut db = DefDatabase::new();
        for material in self.materials {
            db.insert_material(material);
        }

        for item in self.items {
            if let Some(stuff) = &item.default_stuff {
                if db.material(stuff).is_none() {
                    anyhow::bail!("item `{}` defaults to unknown material `{}`", item.kind, stuff);
                }
            }
            db.insert_item(item);
        }
        Ok(db)
    }
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load definitions from a RON file containing an [`ItemCatalog`].
    pub fn load(path: &Path) -> LoadResult<DefDatabase> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DefDatabase> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let db = catalog.into_database()?;
        tracing::debug!(
            items = db.item_count(),
            materials = db.material_count(),
            "item catalog loaded"
        );
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::{ItemClass, ItemKind};

    #[test]
    fn test_parse_applies_defaults() {
        let db = ItemLoader::parse(
            r#"(
                materials: [(kind: "steel", label: "steel")],
                items: [
                    (kind: "longsword", label: "longsword", class: Weapon, mass: 2.0,
                     made_from_stuff: true, default_stuff: Some("steel"), has_quality: true),
                    (kind: "rock", label: "rock", mass: 5.0),
                ],
            )"#,
        )
        .expect("catalog parses");

        let sword = db.item(&ItemKind::new("longsword")).unwrap();
        assert!(sword.has_quality);
        assert!(!sword.uses_hit_points);

        let rock = db.item(&ItemKind::new("rock")).unwrap();
        assert_eq!(rock.class, ItemClass::Misc);
        assert_eq!(rock.stack_limit, 1);
    }

    #[test]
    fn test_unknown_default_material_is_rejected() {
        let result = ItemLoader::parse(
            r#"(items: [(kind: "club", label: "club", mass: 1.0, default_stuff: Some("bone"))])"#,
        );
        assert!(result.is_err());
    }
}
