//! Generic item categories ("any meal", "any medicine").
//!
//! A category pairs a name with an inclusion predicate over item definitions.
//! The predicate is behaviour, not data: saves store only the category name
//! and the category is looked up again in the [`CategoryCatalog`] on load.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use crate::defs::{ItemClass, ItemDefinition, ItemKind};

type Predicate = dyn Fn(&ItemDefinition) -> bool + Send + Sync;

/// Immutable generic category definition.
#[derive(Clone)]
pub struct GenericCategory {
    name: String,
    label: String,
    representative: Arc<ItemDefinition>,
    default_count: u32,
    predicate: Arc<Predicate>,
}

impl GenericCategory {
    /// Creates a category from an arbitrary predicate.
    ///
    /// `representative` is the item kind groups built from this category
    /// target; its mass is used for weight estimates.
    pub fn new<F>(
        name: impl Into<String>,
        label: impl Into<String>,
        representative: Arc<ItemDefinition>,
        default_count: u32,
        predicate: F,
    ) -> Self
    where
        F: Fn(&ItemDefinition) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            label: label.into(),
            representative,
            default_count,
            predicate: Arc::new(predicate),
        }
    }

    /// Creates a category whose predicate is a declarative [`CategoryFilter`].
    pub fn from_filter(
        name: impl Into<String>,
        label: impl Into<String>,
        representative: Arc<ItemDefinition>,
        default_count: u32,
        filter: CategoryFilter,
    ) -> Self {
        Self::new(name, label, representative, default_count, move |def| {
            filter.matches(def)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn representative(&self) -> &Arc<ItemDefinition> {
        &self.representative
    }

    pub fn default_count(&self) -> u32 {
        self.default_count
    }

    pub fn includes(&self, def: &ItemDefinition) -> bool {
        (self.predicate)(def)
    }
}

impl fmt::Debug for GenericCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericCategory")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("representative", &self.representative.kind)
            .field("default_count", &self.default_count)
            .finish_non_exhaustive()
    }
}

/// Declarative item filter, the serializable form of a category predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategoryFilter {
    Class(ItemClass),
    Tag(String),
    Kinds(Vec<ItemKind>),
    AnyOf(Vec<CategoryFilter>),
    AllOf(Vec<CategoryFilter>),
    Not(Box<CategoryFilter>),
}

impl CategoryFilter {
    pub fn matches(&self, def: &ItemDefinition) -> bool {
        match self {
            Self::Class(class) => def.class == *class,
            Self::Tag(tag) => def.has_tag(tag),
            Self::Kinds(kinds) => kinds.contains(&def.kind),
            Self::AnyOf(filters) => filters.iter().any(|f| f.matches(def)),
            Self::AllOf(filters) => filters.iter().all(|f| f.matches(def)),
            Self::Not(filter) => !filter.matches(def),
        }
    }
}

/// Catalog of known generic categories, looked up by name.
#[derive(Clone, Debug, Default)]
pub struct CategoryCatalog {
    by_name: HashMap<String, Arc<GenericCategory>>,
    order: Vec<String>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category, replacing any previous one with the same name.
    pub fn insert(&mut self, category: GenericCategory) -> Arc<GenericCategory> {
        let category = Arc::new(category);
        let name = category.name().to_owned();
        if self.by_name.insert(name.clone(), category.clone()).is_none() {
            self.order.push(name);
        }
        category
    }

    pub fn get(&self, name: &str) -> Option<Arc<GenericCategory>> {
        self.by_name.get(name).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<GenericCategory>> {
        self.order.iter().filter_map(|name| self.by_name.get(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
