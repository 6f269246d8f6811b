//! Item and material definitions.
//!
//! Definitions are supplied from outside the core (see `loadout-content`) and
//! are only ever looked up by name. Selectors and things hold definitions
//! behind [`Arc`] so the database can be shared and dropped independently.

mod condition;
mod quality;

pub use condition::ConditionRange;
pub use quality::{Quality, QualityRange};

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of an item definition (e.g. `longsword`). Opaque lookup key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemKind(String);

/// Name of a material definition (e.g. `plasteel`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialKind(String);

impl ItemKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl MaterialKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&str> for MaterialKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Broad item classification used by category filters.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemClass {
    Weapon,
    Apparel,
    Meal,
    RawFood,
    Medicine,
    Drug,
    Resource,
    #[default]
    Misc,
}

/// Static description of an item kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub kind: ItemKind,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: ItemClass,
    /// Mass of one unit in kilograms.
    pub mass: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_stack_limit"))]
    pub stack_limit: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub made_from_stuff: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_stuff: Option<MaterialKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_quality: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses_hit_points: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

#[cfg(feature = "serde")]
fn default_stack_limit() -> u32 {
    1
}

impl ItemDefinition {
    /// Creates a plain definition: unstackable, no material, no quality, no
    /// hit points. Use the `with_*` builders for the rest.
    pub fn new(kind: impl Into<ItemKind>, class: ItemClass, mass: f32) -> Self {
        let kind = kind.into();
        Self {
            label: kind.as_str().replace('_', " "),
            kind,
            class,
            mass,
            stack_limit: 1,
            made_from_stuff: false,
            default_stuff: None,
            has_quality: false,
            uses_hit_points: false,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_stack_limit(mut self, stack_limit: u32) -> Self {
        self.stack_limit = stack_limit;
        self
    }

    /// Marks the item as crafted from a material, defaulting to `default_stuff`.
    #[must_use]
    pub fn with_stuff(mut self, default_stuff: impl Into<MaterialKind>) -> Self {
        self.made_from_stuff = true;
        self.default_stuff = Some(default_stuff.into());
        self
    }

    #[must_use]
    pub fn with_quality(mut self) -> Self {
        self.has_quality = true;
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self) -> Self {
        self.uses_hit_points = true;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl From<String> for ItemKind {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Static description of a material.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialDefinition {
    pub kind: MaterialKind,
    pub label: String,
}

impl MaterialDefinition {
    pub fn new(kind: impl Into<MaterialKind>, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
        }
    }
}

/// Read access to item and material definitions.
pub trait DefOracle {
    fn item(&self, kind: &ItemKind) -> Option<Arc<ItemDefinition>>;

    fn material(&self, kind: &MaterialKind) -> Option<&MaterialDefinition>;

    /// All item definitions, in registration order.
    fn items(&self) -> Vec<Arc<ItemDefinition>>;
}

/// In-memory definition database.
#[derive(Clone, Debug, Default)]
pub struct DefDatabase {
    items: HashMap<ItemKind, Arc<ItemDefinition>>,
    item_order: Vec<ItemKind>,
    materials: HashMap<MaterialKind, MaterialDefinition>,
}

impl DefDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item definition, replacing any previous one of the same kind.
    pub fn insert_item(&mut self, def: ItemDefinition) -> Arc<ItemDefinition> {
        let def = Arc::new(def);
        if self.items.insert(def.kind.clone(), def.clone()).is_none() {
            self.item_order.push(def.kind.clone());
        }
        def
    }

    pub fn insert_material(&mut self, def: MaterialDefinition) {
        self.materials.insert(def.kind.clone(), def);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl DefOracle for DefDatabase {
    fn item(&self, kind: &ItemKind) -> Option<Arc<ItemDefinition>> {
        self.items.get(kind).cloned()
    }

    fn material(&self, kind: &MaterialKind) -> Option<&MaterialDefinition> {
        self.materials.get(kind)
    }

    fn items(&self) -> Vec<Arc<ItemDefinition>> {
        self.item_order
            .iter()
            .filter_map(|kind| self.items.get(kind).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_keeps_registration_order() {
        let mut defs = DefDatabase::new();
        defs.insert_item(ItemDefinition::new("longsword", ItemClass::Weapon, 2.0));
        defs.insert_item(ItemDefinition::new("simple_meal", ItemClass::Meal, 0.44));
        defs.insert_item(ItemDefinition::new("longsword", ItemClass::Weapon, 2.5));

        let kinds: Vec<_> = defs.items().iter().map(|d| d.kind.clone()).collect();
        assert_eq!(kinds, vec![ItemKind::new("longsword"), ItemKind::new("simple_meal")]);
        assert_eq!(defs.item(&"longsword".into()).map(|d| d.mass), Some(2.5));
    }

    #[test]
    fn builder_sets_flags() {
        let def = ItemDefinition::new("longsword", ItemClass::Weapon, 2.0)
            .with_stuff("steel")
            .with_quality()
            .with_hit_points()
            .with_tag("melee");

        assert!(def.made_from_stuff && def.has_quality && def.uses_hit_points);
        assert_eq!(def.default_stuff, Some(MaterialKind::new("steel")));
        assert!(def.has_tag("melee"));
        assert_eq!(def.label, "longsword");
    }
}
