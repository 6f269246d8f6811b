//! Session-wide owner of loadouts and the ID allocator.

use std::sync::Arc;

use crate::category::GenericCategory;
use crate::config::LoadoutConfig;
use crate::defs::ItemDefinition;
use crate::error::{LoadoutError, Result};
use crate::ids::{IdAllocator, LoadoutId};
use crate::loadout::Loadout;
use crate::selector::{SingleThingSelector, ThingSelector};

#[cfg(feature = "serde")]
use crate::scribe::{LoadContext, LoadoutRecord};

/// Owns every loadout of a session, in creation order.
///
/// All selectors created through the manager, including the ones produced by
/// [`Self::copy`] and [`Self::restore`], draw from one allocator, so selector
/// IDs are unique across the whole session.
#[derive(Debug, Default)]
pub struct LoadoutManager {
    ids: IdAllocator,
    config: LoadoutConfig,
    loadouts: Vec<(LoadoutId, Loadout)>,
}

impl LoadoutManager {
    pub fn new(config: LoadoutConfig) -> Self {
        Self {
            ids: IdAllocator::new(),
            config,
            loadouts: Vec::new(),
        }
    }

    pub fn config(&self) -> &LoadoutConfig {
        &self.config
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub fn create(&mut self, label: impl Into<String>) -> LoadoutId {
        self.insert(Loadout::new(label))
    }

    /// Deep copy of `id`, labelled "<label> (copy)".
    pub fn copy(&mut self, id: LoadoutId) -> Result<LoadoutId> {
        let source = self
            .loadouts
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, loadout)| loadout)
            .ok_or(LoadoutError::UnknownLoadout(id))?;
        let label = format!("{} (copy)", source.label());
        let mut copy = source.duplicate(&mut self.ids);
        copy.set_label(label);
        Ok(self.insert(copy))
    }

    pub fn remove(&mut self, id: LoadoutId) -> Result<Loadout> {
        let index = self
            .loadouts
            .iter()
            .position(|(key, _)| *key == id)
            .ok_or(LoadoutError::UnknownLoadout(id))?;
        let (_, loadout) = self.loadouts.remove(index);
        tracing::debug!(loadout = %id, label = %loadout.label(), "loadout removed");
        Ok(loadout)
    }

    pub fn get(&self, id: LoadoutId) -> Option<&Loadout> {
        self.loadouts
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, loadout)| loadout)
    }

    pub fn get_mut(&mut self, id: LoadoutId) -> Option<&mut Loadout> {
        self.loadouts
            .iter_mut()
            .find(|(key, _)| *key == id)
            .map(|(_, loadout)| loadout)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LoadoutId, &Loadout)> {
        self.loadouts.iter().map(|(id, loadout)| (*id, loadout))
    }

    pub fn len(&self) -> usize {
        self.loadouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loadouts.is_empty()
    }

    /// First loadout with exactly this label.
    pub fn find_by_label(&self, label: &str) -> Option<LoadoutId> {
        self.iter()
            .find(|(_, loadout)| loadout.label() == label)
            .map(|(id, _)| id)
    }

    /// Single-thing selector carrying the configured defaults.
    pub fn new_single_selector(&mut self, def: Arc<ItemDefinition>) -> ThingSelector {
        let single = SingleThingSelector::new(def)
            .with_quality(self.config.default_quality_range)
            .with_hit_points(self.config.default_hit_points);
        ThingSelector::new(&mut self.ids, single, self.config.default_stack_count)
    }

    /// Generic selector with the category's own default count.
    pub fn new_generic_selector(&mut self, category: Arc<GenericCategory>) -> ThingSelector {
        ThingSelector::generic(&mut self.ids, category)
    }

    #[cfg(feature = "serde")]
    pub fn restore(&mut self, record: &LoadoutRecord, ctx: &LoadContext<'_>) -> LoadoutId {
        let loadout = Loadout::from_record(record, ctx, &mut self.ids);
        self.insert(loadout)
    }

    fn insert(&mut self, loadout: Loadout) -> LoadoutId {
        let id = self.ids.next_loadout();
        tracing::debug!(loadout = %id, label = %loadout.label(), "loadout registered");
        self.loadouts.push((id, loadout));
        id
    }
}
