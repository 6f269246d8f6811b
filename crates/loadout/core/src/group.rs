//! Group selectors: "up to N units of kind K", satisfiable by several more
//! specific variants.
//!
//! A group owns its member selectors outright. All members share the group's
//! stack ceiling, and every single-thing member targets the group's item kind.
//! Members' quality, condition and material change slots belong to the group
//! once they join: the group relays those changes through its own
//! member-changed slot.

use std::sync::{Arc, Mutex};

use crate::defs::{ConditionRange, ItemKind, MaterialKind, QualityRange};
use crate::error::{LoadoutError, Result};
use crate::ids::{GroupId, IdAllocator, SelectorId};
use crate::selector::{CallbackSlot, SharedSlot, ThingSelector};
use crate::thing::Thing;

/// Raised once per [`ThingGroupSelector::set_stack_count`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackCountChanged {
    pub previous: u32,
    pub current: u32,
}

/// What changed on a member selector.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberChange {
    Quality(QualityRange),
    HitPoints(ConditionRange),
    Stuff(Option<MaterialKind>),
}

/// A change on one member, relayed by its group.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberChanged {
    pub group: GroupId,
    pub selector: SelectorId,
    pub change: MemberChange,
}

#[derive(Debug)]
pub struct ThingGroupSelector {
    group_id: GroupId,
    allowed_thing: ItemKind,
    allowed_stack_count: u32,
    selectors: Vec<ThingSelector>,
    stack_count_changed: CallbackSlot<StackCountChanged>,
    selector_added: CallbackSlot<SelectorId>,
    selector_removed: CallbackSlot<SelectorId>,
    member_changed: SharedSlot<MemberChanged>,
}

impl ThingGroupSelector {
    /// Creates an empty group. An empty group accepts nothing.
    pub fn new(group_id: GroupId, allowed_thing: ItemKind, allowed_stack_count: u32) -> Self {
        Self {
            group_id,
            allowed_thing,
            allowed_stack_count,
            selectors: Vec::new(),
            stack_count_changed: CallbackSlot::new(),
            selector_added: CallbackSlot::new(),
            selector_removed: CallbackSlot::new(),
            member_changed: Arc::new(Mutex::new(CallbackSlot::new())),
        }
    }

    /// Creates a group around `selector`, taking its target kind and stack count.
    pub fn with_selector(group_id: GroupId, selector: ThingSelector) -> Self {
        let mut group = Self::new(
            group_id,
            selector.target_kind().clone(),
            selector.allowed_stack_count(),
        );
        group.push_member(0, selector);
        group
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn allowed_thing(&self) -> &ItemKind {
        &self.allowed_thing
    }

    pub fn allowed_stack_count(&self) -> u32 {
        self.allowed_stack_count
    }

    pub fn selectors(&self) -> &[ThingSelector] {
        &self.selectors
    }

    pub fn selector(&self, id: SelectorId) -> Option<&ThingSelector> {
        self.selectors.iter().find(|s| s.id() == id)
    }

    pub fn selector_mut(&mut self, id: SelectorId) -> Option<&mut ThingSelector> {
        self.selectors.iter_mut().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Finds the member that accepts `thing` on top of `accumulated` units.
    ///
    /// Every member is evaluated; when several accept, the most specific one
    /// wins (see [`ThingSelector::cmp_specificity`]).
    pub fn allows(&self, thing: &Thing, accumulated: i32) -> Option<&ThingSelector> {
        if accumulated < 0 {
            tracing::error!(
                group = %self.group_id,
                accumulated,
                "negative accumulated count passed to allows"
            );
            return None;
        }

        self.selectors
            .iter()
            .filter(|s| s.allows(thing, accumulated))
            .max_by(|a, b| a.cmp_specificity(b))
    }

    /// Like [`Self::allows`] but ignoring stack counts.
    pub fn matches(&self, thing: &Thing) -> Option<&ThingSelector> {
        self.selectors
            .iter()
            .filter(|s| s.matches(thing))
            .max_by(|a, b| a.cmp_specificity(b))
    }

    /// Sets the group ceiling, pushes it to every member, then raises one
    /// [`StackCountChanged`] carrying the previous value.
    pub fn set_stack_count(&mut self, count: u32) {
        let previous = self.allowed_stack_count;
        self.allowed_stack_count = count;
        for selector in &mut self.selectors {
            selector.set_stack_count(count);
        }

        tracing::debug!(group = %self.group_id, previous, count, "group stack count set");
        self.stack_count_changed.emit(&StackCountChanged {
            previous,
            current: count,
        });
    }

    /// Adds a member. Single-thing selectors must target the group's kind.
    pub fn add_selector(&mut self, selector: ThingSelector) -> Result<SelectorId> {
        let index = self.selectors.len();
        self.insert_selector(index, selector)
    }

    /// Adds a member at `index` (clamped to the member count).
    pub fn insert_selector(
        &mut self,
        index: usize,
        selector: ThingSelector,
    ) -> Result<SelectorId> {
        if selector.is_single() && *selector.target_kind() != self.allowed_thing {
            return Err(LoadoutError::KindMismatch {
                expected: self.allowed_thing.clone(),
                found: selector.target_kind().clone(),
            });
        }

        let id = self.push_member(index.min(self.selectors.len()), selector);
        tracing::debug!(group = %self.group_id, selector = %id, "selector added");
        self.selector_added.emit(&id);
        Ok(id)
    }

    /// Removes a member and hands it back with its change slots emptied.
    pub fn remove_selector(&mut self, id: SelectorId) -> Result<ThingSelector> {
        let index = self.position(id)?;
        let mut selector = self.selectors.remove(index);
        if let Some(single) = selector.as_single_mut() {
            single.clear_callbacks();
        }

        tracing::debug!(group = %self.group_id, selector = %id, "selector removed");
        self.selector_removed.emit(&id);
        Ok(selector)
    }

    pub(crate) fn position(&self, id: SelectorId) -> Result<usize> {
        self.selectors
            .iter()
            .position(|s| s.id() == id)
            .ok_or(LoadoutError::UnknownSelector {
                group: self.group_id,
                selector: id,
            })
    }

    #[must_use]
    pub fn try_set_stack_count_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&StackCountChanged) + Send + 'static,
    {
        self.stack_count_changed.try_set(callback)
    }

    #[must_use]
    pub fn try_set_selector_added_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&SelectorId) + Send + 'static,
    {
        self.selector_added.try_set(callback)
    }

    #[must_use]
    pub fn try_set_selector_removed_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&SelectorId) + Send + 'static,
    {
        self.selector_removed.try_set(callback)
    }

    /// Subscribes to quality, condition and material changes of any member.
    #[must_use]
    pub fn try_set_member_changed_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&MemberChanged) + Send + 'static,
    {
        match self.member_changed.lock() {
            Ok(mut slot) => slot.try_set(callback),
            Err(_) => false,
        }
    }

    /// Reattaches the member change relay to every member. Callbacks are not
    /// persisted, so this runs after a restore or copy.
    pub fn rewire_members(&mut self) {
        for selector in &mut self.selectors {
            let id = selector.id();
            if let Some(single) = selector.as_single_mut() {
                single.relay_changes_to(&self.member_changed, self.group_id, id);
            }
        }
    }

    /// Average per-unit mass of the members' samples, `0.0` when empty.
    pub fn unit_mass(&self) -> f32 {
        if self.selectors.is_empty() {
            return 0.0;
        }
        let total: f32 = self.selectors.iter().map(ThingSelector::unit_mass).sum();
        total / self.selectors.len() as f32
    }

    pub fn weight(&self) -> f32 {
        self.unit_mass() * self.allowed_stack_count as f32
    }

    /// Deep copy keeping the group ID; members get fresh IDs, callbacks are
    /// not copied.
    pub fn duplicate(&self, ids: &mut IdAllocator) -> Self {
        let mut copy = Self::new(
            self.group_id,
            self.allowed_thing.clone(),
            self.allowed_stack_count,
        );
        copy.selectors = self.selectors.iter().map(|s| s.duplicate(ids)).collect();
        copy.rewire_members();
        copy
    }

    fn push_member(&mut self, index: usize, mut selector: ThingSelector) -> SelectorId {
        let id = selector.id();
        selector.set_stack_count(self.allowed_stack_count);
        if let Some(single) = selector.as_single_mut() {
            single.relay_changes_to(&self.member_changed, self.group_id, id);
        }
        self.selectors.insert(index, selector);
        id
    }
}
