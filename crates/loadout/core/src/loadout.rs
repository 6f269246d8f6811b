//! The loadout aggregate: one character's wishlist and blacklist.
//!
//! A [`Loadout`] owns its groups in insertion order. Order matters for display
//! and for first-fit matching in [`Loadout::allows`]; it does not change which
//! member of a group wins.
//!
//! # Cached aggregates
//!
//! Two consumers read derived state: the weight display and restock planning.
//! Every mutation marks both stale; each consumer clears only its own flag.

use crate::defs::{ConditionRange, MaterialKind, QualityRange};
use crate::error::{LoadoutError, Result};
use crate::group::ThingGroupSelector;
use crate::ids::{GroupId, IdAllocator, SelectorId};
use crate::selector::ThingSelector;
use crate::thing::Thing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DirtyState {
    weight: bool,
    restock: bool,
}

impl DirtyState {
    const STALE: Self = Self {
        weight: true,
        restock: true,
    };

    fn mark(&mut self) {
        *self = Self::STALE;
    }
}

/// The group and member that accepted a thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectorMatch {
    pub group: GroupId,
    pub selector: SelectorId,
}

/// Changes applied by [`Loadout::update_selector`]. `None` leaves a field as is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectorUpdate {
    pub quality: Option<QualityRange>,
    pub stuff: Option<Option<MaterialKind>>,
    pub hit_points: Option<ConditionRange>,
}

impl SelectorUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn quality(mut self, range: QualityRange) -> Self {
        self.quality = Some(range);
        self
    }

    /// `None` lifts the material restriction.
    #[must_use]
    pub fn stuff(mut self, stuff: Option<MaterialKind>) -> Self {
        self.stuff = Some(stuff);
        self
    }

    #[must_use]
    pub fn hit_points(mut self, range: ConditionRange) -> Self {
        self.hit_points = Some(range);
        self
    }
}

#[derive(Debug)]
pub struct Loadout {
    label: String,
    groups: Vec<ThingGroupSelector>,
    blacklist: Vec<ThingGroupSelector>,
    next_group_id: GroupId,
    cached_weight: f32,
    dirty: DirtyState,
}

impl Loadout {
    pub fn new(label: impl Into<String>) -> Self {
        Self::from_parts(label.into(), Vec::new(), Vec::new(), GroupId::FIRST)
    }

    pub(crate) fn from_parts(
        label: String,
        groups: Vec<ThingGroupSelector>,
        blacklist: Vec<ThingGroupSelector>,
        next_group_id: GroupId,
    ) -> Self {
        let mut loadout = Self {
            label,
            groups,
            blacklist,
            next_group_id,
            cached_weight: 0.0,
            dirty: DirtyState::STALE,
        };
        let ids: Vec<_> = loadout.all_groups().map(|g| g.group_id()).collect();
        for id in ids {
            if let Err(err) = loadout.reserve_group_id(id) {
                tracing::error!(loadout = %loadout.label, error = %err, "group id not reserved");
            }
        }
        loadout
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn groups(&self) -> &[ThingGroupSelector] {
        &self.groups
    }

    pub fn blacklist(&self) -> &[ThingGroupSelector] {
        &self.blacklist
    }

    pub fn group(&self, id: GroupId) -> Option<&ThingGroupSelector> {
        self.groups.iter().find(|g| g.group_id() == id)
    }

    /// Mutable access to a group. Marks cached aggregates stale.
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut ThingGroupSelector> {
        let group = self.groups.iter_mut().find(|g| g.group_id() == id)?;
        self.dirty.mark();
        Some(group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn next_group_id(&self) -> GroupId {
        self.next_group_id
    }

    /// Adds `selector` to group `group`.
    ///
    /// - existing group: the selector joins it (kind rules apply)
    /// - unknown explicit ID: a new group is created under that ID
    /// - no ID: a new group is created under a fresh ID
    ///
    /// New groups take the selector's target kind and stack count.
    pub fn add_selector(
        &mut self,
        selector: ThingSelector,
        group: Option<GroupId>,
    ) -> Result<GroupId> {
        let id = match group {
            Some(id) => {
                if let Some(existing) = self.groups.iter_mut().find(|g| g.group_id() == id) {
                    existing.add_selector(selector)?;
                    self.dirty.mark();
                    return Ok(id);
                }
                if self.blacklist.iter().any(|g| g.group_id() == id) {
                    return Err(LoadoutError::GroupIdInUse(id));
                }
                self.reserve_group_id(id)?;
                id
            }
            None => self.allocate_group_id()?,
        };

        tracing::debug!(
            loadout = %self.label,
            group = %id,
            kind = %selector.target_kind(),
            "group created"
        );
        self.groups.push(ThingGroupSelector::with_selector(id, selector));
        self.dirty.mark();
        Ok(id)
    }

    /// Adds a prepared group, keeping its ID.
    pub fn add_group(&mut self, group: ThingGroupSelector) -> Result<GroupId> {
        let id = group.group_id();
        if self.all_groups().any(|g| g.group_id() == id) {
            return Err(LoadoutError::GroupIdInUse(id));
        }
        self.reserve_group_id(id)?;
        self.groups.push(group);
        self.dirty.mark();
        Ok(id)
    }

    /// Removes a group together with all of its members.
    pub fn remove_group(&mut self, id: GroupId) -> Result<ThingGroupSelector> {
        let index = self
            .groups
            .iter()
            .position(|g| g.group_id() == id)
            .ok_or(LoadoutError::UnknownGroup(id))?;
        self.dirty.mark();
        tracing::debug!(loadout = %self.label, group = %id, "group removed");
        Ok(self.groups.remove(index))
    }

    /// Removes one member. The group stays, even when it becomes empty; an
    /// empty group accepts nothing until the caller adds a replacement.
    pub fn remove_selector(
        &mut self,
        group: GroupId,
        selector: SelectorId,
    ) -> Result<ThingSelector> {
        let removed = self.wish_group_mut(group)?.remove_selector(selector)?;
        self.dirty.mark();
        Ok(removed)
    }

    pub fn set_stack_count(&mut self, group: GroupId, count: u32) -> Result<()> {
        self.wish_group_mut(group)?.set_stack_count(count);
        self.dirty.mark();
        Ok(())
    }

    /// Changes quality, material or condition of a single-thing member.
    ///
    /// The member is taken out of its group, updated, and put back at the same
    /// position, so observers see a removal followed by an addition.
    pub fn update_selector(
        &mut self,
        group: GroupId,
        selector: SelectorId,
        update: SelectorUpdate,
    ) -> Result<()> {
        let target = self.wish_group_mut(group)?;
        let index = target.position(selector)?;
        if !target.selectors()[index].is_single() {
            return Err(LoadoutError::NotSingleSelector(selector));
        }

        let mut member = target.remove_selector(selector)?;
        if let Some(single) = member.as_single_mut() {
            if let Some(range) = update.quality {
                single.set_allowed_quality(range);
            }
            if let Some(stuff) = update.stuff {
                single.set_allowed_stuff(stuff);
            }
            if let Some(range) = update.hit_points {
                single.set_allowed_hit_points(range);
            }
        }
        target.insert_selector(index, member)?;

        self.dirty.mark();
        Ok(())
    }

    /// First group, in order, with a member accepting `thing` on top of
    /// `accumulated` units.
    pub fn allows(&self, thing: &Thing, accumulated: i32) -> Option<SelectorMatch> {
        self.groups.iter().find_map(|group| {
            group.allows(thing, accumulated).map(|selector| SelectorMatch {
                group: group.group_id(),
                selector: selector.id(),
            })
        })
    }

    /// Whether an entry with the same (kind, material, quality) as `thing`
    /// exists.
    ///
    /// An entry's key is the key of its sample: the allowed (or default)
    /// material at the lowest allowed quality. This is an identity check, not
    /// a range check, so an unrestricted longsword entry contains a steel
    /// longsword of awful quality but not one of normal quality, although
    /// [`Self::allows`] accepts both.
    pub fn contains(&self, thing: &Thing) -> bool {
        let key = thing.key();
        self.groups
            .iter()
            .flat_map(ThingGroupSelector::selectors)
            .any(|selector| selector.make_sample().key() == key)
    }

    /// Sum of group weights; recomputed only after a mutation.
    pub fn weight(&mut self) -> f32 {
        if self.dirty.weight {
            self.cached_weight = self.groups.iter().map(ThingGroupSelector::weight).sum();
            self.dirty.weight = false;
            tracing::debug!(
                loadout = %self.label,
                weight = self.cached_weight,
                "weight recomputed"
            );
        }
        self.cached_weight
    }

    /// Reads and clears the restock flag.
    pub fn take_restock_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty.restock, false)
    }

    /// Puts `selector` on the blacklist in a group of its own.
    pub fn add_to_blacklist(&mut self, selector: ThingSelector) -> Result<GroupId> {
        let id = self.allocate_group_id()?;
        self.blacklist.push(ThingGroupSelector::with_selector(id, selector));
        self.dirty.mark();
        Ok(id)
    }

    pub fn remove_from_blacklist(&mut self, id: GroupId) -> Result<ThingGroupSelector> {
        let index = self
            .blacklist
            .iter()
            .position(|g| g.group_id() == id)
            .ok_or(LoadoutError::UnknownGroup(id))?;
        self.dirty.mark();
        Ok(self.blacklist.remove(index))
    }

    /// Whether any blacklist group matches `thing`, regardless of counts.
    pub fn is_blacklisted(&self, thing: &Thing) -> bool {
        self.blacklist.iter().any(|g| g.matches(thing).is_some())
    }

    /// Full deep copy: groups keep their IDs, every selector gets a fresh one.
    pub fn duplicate(&self, ids: &mut IdAllocator) -> Self {
        Self::from_parts(
            self.label.clone(),
            self.groups.iter().map(|g| g.duplicate(ids)).collect(),
            self.blacklist.iter().map(|g| g.duplicate(ids)).collect(),
            self.next_group_id,
        )
    }

    fn wish_group_mut(&mut self, id: GroupId) -> Result<&mut ThingGroupSelector> {
        self.groups
            .iter_mut()
            .find(|g| g.group_id() == id)
            .ok_or(LoadoutError::UnknownGroup(id))
    }

    fn all_groups(&self) -> impl Iterator<Item = &ThingGroupSelector> {
        self.groups.iter().chain(self.blacklist.iter())
    }

    fn allocate_group_id(&mut self) -> Result<GroupId> {
        let id = self.next_group_id;
        self.reserve_group_id(id)?;
        Ok(id)
    }

    /// Moves the next free ID past `id`. The last representable ID is never
    /// handed out, so the counter cannot wrap onto IDs in use.
    fn reserve_group_id(&mut self, id: GroupId) -> Result<()> {
        let next = id.next().ok_or(LoadoutError::GroupIdOutOfRange(id))?;
        if next > self.next_group_id {
            self.next_group_id = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CategoryFilter, GenericCategory};
    use crate::defs::{ItemClass, ItemDefinition, Quality};
    use crate::selector::SingleThingSelector;
    use std::sync::Arc;

    fn longsword() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("longsword", ItemClass::Weapon, 2.0)
                .with_stuff("steel")
                .with_quality()
                .with_hit_points(),
        )
    }

    fn meal() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("simple_meal", ItemClass::Meal, 0.5).with_stack_limit(10))
    }

    fn any_meal() -> Arc<GenericCategory> {
        Arc::new(GenericCategory::from_filter(
            "any_meal",
            "any meal",
            meal(),
            3,
            CategoryFilter::Class(ItemClass::Meal),
        ))
    }

    #[test]
    fn group_ids_auto_increment() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");
        let a = loadout
            .add_selector(ThingSelector::single(&mut ids, longsword()), None)
            .unwrap();
        let b = loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal()), None)
            .unwrap();

        assert_eq!(a, GroupId(0));
        assert_eq!(b, GroupId(1));
    }

    #[test]
    fn explicit_group_id_joins_or_creates() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");
        let created = loadout
            .add_selector(ThingSelector::single(&mut ids, longsword()), Some(GroupId(7)))
            .unwrap();
        let joined = loadout
            .add_selector(
                ThingSelector::new(
                    &mut ids,
                    SingleThingSelector::new(longsword()).with_stuff("plasteel"),
                    1,
                ),
                Some(GroupId(7)),
            )
            .unwrap();
        let fresh = loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal()), None)
            .unwrap();

        assert_eq!(created, GroupId(7));
        assert_eq!(joined, GroupId(7));
        assert_eq!(fresh, GroupId(8));
        assert_eq!(loadout.len(), 2);
        assert_eq!(loadout.group(GroupId(7)).map(ThingGroupSelector::len), Some(2));
    }

    #[test]
    fn weight_is_cached_until_mutation() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("cook");
        let group = loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal()), None)
            .unwrap();

        assert!((loadout.weight() - 1.5).abs() < 1e-6);
        loadout.set_stack_count(group, 5).unwrap();
        assert!((loadout.weight() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn dirty_flags_clear_independently() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("cook");
        loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal()), None)
            .unwrap();

        loadout.weight();
        assert!(loadout.take_restock_dirty());
        assert!(!loadout.take_restock_dirty());

        loadout.set_label("chef");
        assert!(!loadout.take_restock_dirty());
        loadout
            .add_selector(ThingSelector::single(&mut ids, longsword()), None)
            .unwrap();
        assert!(loadout.take_restock_dirty());
    }

    #[test]
    fn update_keeps_position_and_identity() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");
        let group = loadout
            .add_selector(ThingSelector::single(&mut ids, longsword()), None)
            .unwrap();
        let second = loadout
            .group_mut(group)
            .unwrap()
            .add_selector(ThingSelector::single(&mut ids, longsword()))
            .unwrap();
        let first = loadout.group(group).unwrap().selectors()[0].id();

        loadout
            .update_selector(
                group,
                first,
                SelectorUpdate::new()
                    .stuff(Some(MaterialKind::new("plasteel")))
                    .quality(QualityRange::at_least(Quality::Good)),
            )
            .unwrap();

        let members = loadout.group(group).unwrap().selectors();
        assert_eq!(members[0].id(), first);
        assert_eq!(members[1].id(), second);
        let single = members[0].as_single().unwrap();
        assert_eq!(single.allowed_stuff(), Some(&MaterialKind::new("plasteel")));
        assert_eq!(single.allowed_quality().min, Quality::Good);
    }

    #[test]
    fn update_rejects_generic_member() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("cook");
        let group = loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal()), None)
            .unwrap();
        let id = loadout.group(group).unwrap().selectors()[0].id();

        let err = loadout
            .update_selector(
                group,
                id,
                SelectorUpdate::new().hit_points(ConditionRange::FULL),
            )
            .unwrap_err();
        assert_eq!(err, LoadoutError::NotSingleSelector(id));
        assert_eq!(loadout.group(group).unwrap().len(), 1);
    }

    #[test]
    fn contains_uses_derived_key() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");
        loadout
            .add_selector(
                ThingSelector::new(
                    &mut ids,
                    SingleThingSelector::new(longsword()).with_stuff("plasteel"),
                    1,
                ),
                None,
            )
            .unwrap();

        let plasteel = Thing::new(longsword())
            .with_stuff("plasteel")
            .with_quality(Quality::Awful)
            .with_condition(0.1);
        assert!(loadout.contains(&plasteel));
        assert!(!loadout.contains(&Thing::new(longsword()).with_quality(Quality::Awful)));
    }

    #[test]
    fn blacklist_matches_without_counts() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("pacifist");
        let mut selector = ThingSelector::single(&mut ids, longsword());
        selector.set_stack_count(0);
        let id = loadout.add_to_blacklist(selector).unwrap();

        assert!(loadout.is_blacklisted(&Thing::new(longsword())));
        assert!(!loadout.is_blacklisted(&Thing::new(meal())));
        assert!((loadout.weight()).abs() < f32::EPSILON);

        loadout.remove_from_blacklist(id).unwrap();
        assert!(!loadout.is_blacklisted(&Thing::new(longsword())));
    }

    #[test]
    fn explicit_id_of_blacklist_group_is_refused() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("pacifist");
        let id = loadout
            .add_to_blacklist(ThingSelector::single(&mut ids, longsword()))
            .unwrap();

        let err = loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal()), Some(id))
            .unwrap_err();
        assert_eq!(err, LoadoutError::GroupIdInUse(id));
    }

    #[test]
    fn unknown_ids_fail_fast() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");
        let group = loadout
            .add_selector(ThingSelector::single(&mut ids, longsword()), None)
            .unwrap();

        assert_eq!(
            loadout.set_stack_count(GroupId(99), 2),
            Err(LoadoutError::UnknownGroup(GroupId(99)))
        );
        assert!(matches!(
            loadout.remove_selector(group, SelectorId(99)),
            Err(LoadoutError::UnknownSelector { .. })
        ));
    }

    #[test]
    fn last_group_id_is_refused() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");

        let err = loadout
            .add_selector(
                ThingSelector::single(&mut ids, longsword()),
                Some(GroupId(u32::MAX)),
            )
            .unwrap_err();
        assert_eq!(err, LoadoutError::GroupIdOutOfRange(GroupId(u32::MAX)));
        assert!(loadout.is_empty());

        let group = ThingGroupSelector::with_selector(
            GroupId(u32::MAX),
            ThingSelector::single(&mut ids, longsword()),
        );
        assert!(matches!(
            loadout.add_group(group),
            Err(LoadoutError::GroupIdOutOfRange(_))
        ));
    }

    #[test]
    fn group_ids_stop_before_wrapping() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");
        let last = loadout
            .add_selector(
                ThingSelector::single(&mut ids, longsword()),
                Some(GroupId(u32::MAX - 1)),
            )
            .unwrap();

        assert_eq!(last, GroupId(u32::MAX - 1));
        assert!(matches!(
            loadout.add_selector(ThingSelector::generic(&mut ids, any_meal()), None),
            Err(LoadoutError::GroupIdOutOfRange(_))
        ));
        assert!(matches!(
            loadout.add_to_blacklist(ThingSelector::single(&mut ids, longsword())),
            Err(LoadoutError::GroupIdOutOfRange(_))
        ));
        assert_eq!(loadout.len(), 1);
        assert!(loadout.blacklist().is_empty());
    }

    #[test]
    fn negative_accumulated_count_is_rejected() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("cook");
        loadout
            .add_selector(ThingSelector::generic(&mut ids, any_meal()), None)
            .unwrap();
        let meal = Thing::new(meal());

        assert!(loadout.allows(&meal, 0).is_some());
        assert!(loadout.allows(&meal, -1).is_none());
        assert!(loadout.allows(&meal, i32::MIN).is_none());
    }

    #[test]
    fn contains_compares_sample_keys() {
        let mut ids = IdAllocator::new();
        let mut loadout = Loadout::new("soldier");
        loadout
            .add_selector(ThingSelector::single(&mut ids, longsword()), None)
            .unwrap();

        let awful = Thing::new(longsword())
            .with_stuff("steel")
            .with_quality(Quality::Awful);
        let normal = Thing::new(longsword()).with_stuff("steel");

        assert!(loadout.contains(&awful));
        assert!(!loadout.contains(&normal));
        assert!(loadout.allows(&normal, 0).is_some());
    }
}
