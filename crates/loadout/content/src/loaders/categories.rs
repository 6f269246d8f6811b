//! Generic category loader.

use std::path::Path;

use loadout_core::{CategoryCatalog, CategoryFilter, DefOracle, GenericCategory, ItemKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One category as written in `categories.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub label: String,
    /// Item whose mass stands in for the category.
    pub representative: ItemKind,
    pub default_count: u32,
    pub filter: CategoryFilter,
}

impl CategorySpec {
    fn resolve(self, defs: &dyn DefOracle) -> LoadResult<GenericCategory> {
        let representative = defs.item(&self.representative).ok_or_else(|| {
            anyhow::anyhow!(
                "category `{}` names unknown representative `{}`",
                self.name,
                self.representative
            )
        })?;

        if !self.filter.matches(&representative) {
            tracing::warn!(
                category = %self.name,
                representative = %self.representative,
                "representative is not a member of its own category"
            );
        }

        Ok(GenericCategory::from_filter(
            self.name,
            self.label,
            representative,
            self.default_count,
            self.filter,
        ))
    }
}

/// Loader for generic categories from RON files.
pub struct CategoryLoader;

impl CategoryLoader {
    /// Load categories from a RON file, resolving representatives in `defs`.
    pub fn load(path: &Path, defs: &dyn DefOracle) -> LoadResult<CategoryCatalog> {
        let content = read_file(path)?;
        Self::parse(&content, defs)
    }

    pub fn parse(content: &str, defs: &dyn DefOracle) -> LoadResult<CategoryCatalog> {
        let specs: Vec<CategorySpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse category RON: {}", e))?;

        let mut catalog = CategoryCatalog::new();
        for spec in specs {
            catalog.insert(spec.resolve(defs)?);
        }

        tracing::debug!(categories = catalog.len(), "category catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::{DefDatabase, ItemClass, ItemDefinition};

    fn defs() -> DefDatabase {
        let mut db = DefDatabase::new();
        db.insert_item(ItemDefinition::new("simple_meal", ItemClass::Meal, 0.44));
        db.insert_item(ItemDefinition::new("berries", ItemClass::RawFood, 0.03));
        db
    }

    #[test]
    fn test_parse_builds_predicates() {
        let db = defs();
        let catalog = CategoryLoader::parse(
            r#"[(
                name: "any_food",
                label: "any food",
                representative: "simple_meal",
                default_count: 5,
                filter: AnyOf([Class(Meal), Class(RawFood)]),
            )]"#,
            &db,
        )
        .expect("categories parse");

        let food = catalog.get("any_food").unwrap();
        assert_eq!(food.default_count(), 5);
        assert!(food.includes(&ItemDefinition::new("berries", ItemClass::RawFood, 0.03)));
        assert!(!food.includes(&ItemDefinition::new("beer", ItemClass::Drug, 0.3)));
    }

    #[test]
    fn test_unknown_representative_is_an_error() {
        let db = defs();
        let err = CategoryLoader::parse(
            r#"[(name: "any_drug", label: "any drug", representative: "beer",
                 default_count: 1, filter: Class(Drug))]"#,
            &db,
        )
        .unwrap_err();

        assert!(err.to_string().contains("beer"));
    }
}
