//! Save records for loadouts.
//!
//! Saving flattens a [`Loadout`] into plain records that reference definitions
//! and categories by name. Loading resolves those names through a
//! [`LoadContext`]. Entries that no longer resolve are logged and skipped so
//! that one stale reference never costs the player a whole loadout.
//!
//! Group IDs are stored and restored verbatim. Selector IDs are not stored:
//! every restored selector draws a fresh ID from the session allocator.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::category::CategoryCatalog;
use crate::defs::{ConditionRange, DefOracle, ItemKind, MaterialKind, QualityRange};
use crate::error::{LoadoutError, Result};
use crate::group::ThingGroupSelector;
use crate::ids::{GroupId, IdAllocator};
use crate::loadout::Loadout;
use crate::selector::{GenericThingSelector, SelectorKind, SingleThingSelector, ThingSelector};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadoutRecord {
    pub label: String,
    pub next_group_id: GroupId,
    pub groups: Vec<GroupRecord>,
    pub blacklist: Vec<GroupRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub group_id: GroupId,
    pub allowed_thing: ItemKind,
    pub allowed_stack_count: u32,
    pub selectors: Vec<SelectorRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SelectorRecord {
    Single {
        thing: ItemKind,
        stuff: Option<MaterialKind>,
        quality: QualityRange,
        hit_points: ConditionRange,
        stack_count: u32,
    },
    Generic {
        category: String,
        stack_count: u32,
    },
}

impl LoadoutRecord {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| LoadoutError::Encoding(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| LoadoutError::Encoding(e.to_string()))
    }
}

/// Name resolution used while restoring records.
#[derive(Clone, Copy)]
pub struct LoadContext<'a> {
    pub defs: &'a dyn DefOracle,
    pub categories: &'a CategoryCatalog,
}

impl<'a> LoadContext<'a> {
    pub fn new(defs: &'a dyn DefOracle, categories: &'a CategoryCatalog) -> Self {
        Self { defs, categories }
    }
}

impl SelectorRecord {
    fn from_selector(selector: &ThingSelector) -> Self {
        let stack_count = selector.allowed_stack_count();
        match selector.kind() {
            SelectorKind::Single(single) => Self::Single {
                thing: single.kind().clone(),
                stuff: single.allowed_stuff().cloned(),
                quality: single.allowed_quality(),
                hit_points: single.allowed_hit_points(),
                stack_count,
            },
            SelectorKind::Generic(generic) => Self::Generic {
                category: generic.category().name().to_owned(),
                stack_count,
            },
        }
    }

    fn restore(&self, ctx: &LoadContext<'_>, ids: &mut IdAllocator) -> Result<ThingSelector> {
        match self {
            Self::Single {
                thing,
                stuff,
                quality,
                hit_points,
                stack_count,
            } => {
                let def = ctx
                    .defs
                    .item(thing)
                    .ok_or_else(|| LoadoutError::UnknownItem(thing.clone()))?;
                let mut single = SingleThingSelector::new(def)
                    .with_quality(*quality)
                    .with_hit_points(*hit_points);
                if let Some(stuff) = stuff {
                    if ctx.defs.material(stuff).is_none() {
                        return Err(LoadoutError::UnknownMaterial(stuff.clone()));
                    }
                    single = single.with_stuff(stuff.clone());
                }
                Ok(ThingSelector::new(ids, single, *stack_count))
            }
            Self::Generic {
                category,
                stack_count,
            } => {
                let category = ctx
                    .categories
                    .get(category)
                    .ok_or_else(|| LoadoutError::UnknownCategory(category.clone()))?;
                Ok(ThingSelector::new(
                    ids,
                    GenericThingSelector::new(category),
                    *stack_count,
                ))
            }
        }
    }
}

impl GroupRecord {
    fn from_group(group: &ThingGroupSelector) -> Self {
        Self {
            group_id: group.group_id(),
            allowed_thing: group.allowed_thing().clone(),
            allowed_stack_count: group.allowed_stack_count(),
            selectors: group
                .selectors()
                .iter()
                .map(SelectorRecord::from_selector)
                .collect(),
        }
    }

    /// Rebuilds the group, dropping members that fail to resolve.
    fn restore(&self, ctx: &LoadContext<'_>, ids: &mut IdAllocator) -> ThingGroupSelector {
        let mut group = ThingGroupSelector::new(
            self.group_id,
            self.allowed_thing.clone(),
            self.allowed_stack_count,
        );

        for record in &self.selectors {
            let restored = record
                .restore(ctx, ids)
                .and_then(|selector| group.add_selector(selector));
            if let Err(err) = restored {
                tracing::error!(
                    group = %self.group_id,
                    error = %err,
                    "skipping selector that could not be restored"
                );
            }
        }

        group.rewire_members();
        group
    }
}

impl Loadout {
    /// Flattens the loadout into a save record.
    pub fn to_record(&self) -> LoadoutRecord {
        LoadoutRecord {
            label: self.label().to_owned(),
            next_group_id: self.next_group_id(),
            groups: self.groups().iter().map(GroupRecord::from_group).collect(),
            blacklist: self.blacklist().iter().map(GroupRecord::from_group).collect(),
        }
    }

    /// Restores a loadout. Unresolvable selectors and groups with an unknown
    /// target or an unusable ID are logged and skipped.
    pub fn from_record(
        record: &LoadoutRecord,
        ctx: &LoadContext<'_>,
        ids: &mut IdAllocator,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut restore_all = |records: &[GroupRecord], ids: &mut IdAllocator| {
            records
                .iter()
                .filter(|group| {
                    if ctx.defs.item(&group.allowed_thing).is_none() {
                        tracing::error!(
                            loadout = %record.label,
                            group = %group.group_id,
                            thing = %group.allowed_thing,
                            "skipping group with unknown target"
                        );
                        return false;
                    }
                    if group.group_id.next().is_none() {
                        tracing::error!(
                            loadout = %record.label,
                            group = %group.group_id,
                            "skipping group with out-of-range id"
                        );
                        return false;
                    }
                    if !seen.insert(group.group_id) {
                        tracing::error!(
                            loadout = %record.label,
                            group = %group.group_id,
                            "skipping group with repeated id"
                        );
                        return false;
                    }
                    true
                })
                .map(|group| group.restore(ctx, ids))
                .collect::<Vec<_>>()
        };

        let groups = restore_all(&record.groups, ids);
        let blacklist = restore_all(&record.blacklist, ids);

        tracing::debug!(
            loadout = %record.label,
            groups = groups.len(),
            blacklist = blacklist.len(),
            "loadout restored"
        );
        Loadout::from_parts(record.label.clone(), groups, blacklist, record.next_group_id)
    }
}
