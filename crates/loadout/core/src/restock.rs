//! Restock planning: how far a carried inventory is from a loadout.
//!
//! [`RestockPlan`] is a snapshot. [`RestockTracker`] keeps one around and
//! rebuilds it only when the loadout reports a change (through its restock
//! flag) or the caller reports an inventory change.

use crate::defs::ItemKind;
use crate::ids::GroupId;
use crate::loadout::Loadout;
use crate::thing::Thing;

/// Held versus wanted units for one wishlist group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupMargin {
    pub group: GroupId,
    pub allowed_thing: ItemKind,
    pub held: u32,
    pub wanted: u32,
}

impl GroupMargin {
    /// Positive when carrying more than wanted, negative when short.
    pub fn margin(&self) -> i64 {
        i64::from(self.held) - i64::from(self.wanted)
    }

    pub fn missing(&self) -> u32 {
        self.wanted.saturating_sub(self.held)
    }

    pub fn surplus(&self) -> u32 {
        self.held.saturating_sub(self.wanted)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RestockPlan {
    /// One entry per wishlist group, in loadout order.
    pub groups: Vec<GroupMargin>,
    /// Carried things matched by the blacklist.
    pub to_drop: Vec<Thing>,
    /// Carried things no group wants.
    pub unassigned: Vec<Thing>,
}

impl RestockPlan {
    /// Assigns every carried thing to a group.
    ///
    /// A thing goes to the first group with room for it; when every matching
    /// group is full it goes to the first matching group and counts as
    /// surplus there. Blacklisted things are never assigned.
    pub fn compute(loadout: &Loadout, inventory: &[Thing]) -> Self {
        let mut groups: Vec<GroupMargin> = loadout
            .groups()
            .iter()
            .map(|g| GroupMargin {
                group: g.group_id(),
                allowed_thing: g.allowed_thing().clone(),
                held: 0,
                wanted: g.allowed_stack_count(),
            })
            .collect();
        let mut to_drop = Vec::new();
        let mut unassigned = Vec::new();

        for thing in inventory {
            if loadout.is_blacklisted(thing) {
                to_drop.push(thing.clone());
                continue;
            }

            let slots = loadout.groups();
            let index = slots
                .iter()
                .zip(&groups)
                .position(|(g, margin)| g.allows(thing, accumulated(margin.held)).is_some())
                .or_else(|| slots.iter().position(|g| g.matches(thing).is_some()));

            match index {
                Some(index) => {
                    let margin = &mut groups[index];
                    margin.held = margin.held.saturating_add(thing.quantity);
                }
                None => unassigned.push(thing.clone()),
            }
        }

        Self {
            groups,
            to_drop,
            unassigned,
        }
    }

    pub fn group(&self, id: GroupId) -> Option<&GroupMargin> {
        self.groups.iter().find(|g| g.group == id)
    }

    /// Groups still short of their ceiling.
    pub fn needs(&self) -> impl Iterator<Item = &GroupMargin> {
        self.groups.iter().filter(|g| g.missing() > 0)
    }

    /// Groups holding more than their ceiling.
    pub fn surplus(&self) -> impl Iterator<Item = &GroupMargin> {
        self.groups.iter().filter(|g| g.surplus() > 0)
    }

    pub fn is_satisfied(&self) -> bool {
        self.needs().next().is_none() && self.to_drop.is_empty()
    }
}

/// Caches a [`RestockPlan`] between changes.
#[derive(Debug, Default)]
pub struct RestockTracker {
    plan: Option<RestockPlan>,
    inventory_changed: bool,
}

impl RestockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify_inventory_changed(&mut self) {
        self.inventory_changed = true;
    }

    /// Current plan, rebuilt if the loadout or the inventory changed.
    pub fn plan(&mut self, loadout: &mut Loadout, inventory: &[Thing]) -> &RestockPlan {
        let loadout_changed = loadout.take_restock_dirty();
        if loadout_changed || core::mem::take(&mut self.inventory_changed) {
            self.plan = None;
        }

        self.plan.get_or_insert_with(|| {
            tracing::debug!(loadout = %loadout.label(), "restock plan rebuilt");
            RestockPlan::compute(loadout, inventory)
        })
    }

    /// Whether picking up `thing` moves the inventory towards the loadout.
    ///
    /// Each group is asked in order, with what the character already holds
    /// for that group as the accumulated count.
    pub fn wants(&mut self, loadout: &mut Loadout, thing: &Thing, inventory: &[Thing]) -> bool {
        if loadout.is_blacklisted(thing) {
            return false;
        }

        let plan = self.plan(loadout, inventory);
        loadout.groups().iter().any(|group| {
            let held = plan.group(group.group_id()).map_or(0, |m| m.held);
            group.allows(thing, accumulated(held)).is_some()
        })
    }
}

fn accumulated(held: u32) -> i32 {
    i32::try_from(held).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CategoryFilter, GenericCategory};
    use crate::defs::{ItemClass, ItemDefinition};
    use crate::ids::IdAllocator;
    use crate::selector::ThingSelector;
    use std::sync::Arc;

    fn meal() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("simple_meal", ItemClass::Meal, 0.5).with_stack_limit(10))
    }

    fn beer() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("beer", ItemClass::Drug, 0.3))
    }

    fn meals_loadout(ids: &mut IdAllocator) -> (Loadout, GroupId) {
        let any_meal = Arc::new(GenericCategory::from_filter(
            "any_meal",
            "any meal",
            meal(),
            3,
            CategoryFilter::Class(ItemClass::Meal),
        ));
        let mut loadout = Loadout::new("cook");
        let group = loadout
            .add_selector(ThingSelector::generic(ids, any_meal), None)
            .unwrap();
        loadout
            .add_to_blacklist(ThingSelector::single(ids, beer()))
            .unwrap();
        (loadout, group)
    }

    #[test]
    fn plan_reports_margins() {
        let mut ids = IdAllocator::new();
        let (loadout, group) = meals_loadout(&mut ids);
        let inventory = vec![
            Thing::new(meal()).with_quantity(1),
            Thing::new(beer()),
            Thing::new(Arc::new(ItemDefinition::new("rock", ItemClass::Resource, 5.0))),
        ];

        let plan = RestockPlan::compute(&loadout, &inventory);
        let margin = plan.group(group).unwrap();

        assert_eq!((margin.held, margin.wanted, margin.margin()), (1, 3, -2));
        assert_eq!(plan.needs().count(), 1);
        assert_eq!(plan.to_drop.len(), 1);
        assert_eq!(plan.unassigned.len(), 1);
        assert!(!plan.is_satisfied());
    }

    #[test]
    fn overfull_group_shows_surplus() {
        let mut ids = IdAllocator::new();
        let (loadout, group) = meals_loadout(&mut ids);
        let inventory = vec![
            Thing::new(meal()).with_quantity(3),
            Thing::new(meal()).with_quantity(2),
        ];

        let plan = RestockPlan::compute(&loadout, &inventory);

        assert_eq!(plan.group(group).map(GroupMargin::surplus), Some(2));
        assert!(plan.is_satisfied());
    }

    #[test]
    fn tracker_rebuilds_on_changes() {
        let mut ids = IdAllocator::new();
        let (mut loadout, group) = meals_loadout(&mut ids);
        let mut tracker = RestockTracker::new();
        let mut inventory = vec![Thing::new(meal())];

        assert_eq!(tracker.plan(&mut loadout, &inventory).group(group).unwrap().held, 1);

        inventory.push(Thing::new(meal()));
        assert_eq!(tracker.plan(&mut loadout, &inventory).group(group).unwrap().held, 1);
        tracker.notify_inventory_changed();
        assert_eq!(tracker.plan(&mut loadout, &inventory).group(group).unwrap().held, 2);

        loadout.set_stack_count(group, 5).unwrap();
        assert_eq!(tracker.plan(&mut loadout, &inventory).group(group).unwrap().wanted, 5);
    }

    #[test]
    fn wants_respects_held_count_and_blacklist() {
        let mut ids = IdAllocator::new();
        let (mut loadout, _) = meals_loadout(&mut ids);
        let mut tracker = RestockTracker::new();
        let mut inventory = vec![Thing::new(meal()).with_quantity(2)];

        assert!(tracker.wants(&mut loadout, &Thing::new(meal()), &inventory));
        assert!(!tracker.wants(&mut loadout, &Thing::new(meal()).with_quantity(2), &inventory));
        assert!(!tracker.wants(&mut loadout, &Thing::new(beer()), &inventory));

        inventory[0].quantity = 3;
        tracker.notify_inventory_changed();
        assert!(!tracker.wants(&mut loadout, &Thing::new(meal()), &inventory));
    }
}
