//! Selector matching one item kind, optionally narrowed by material,
//! quality and condition.

use std::sync::Arc;

use super::{CallbackSlot, SharedSlot, emit_shared};
use crate::defs::{ConditionRange, ItemDefinition, ItemKind, MaterialKind, QualityRange};
use crate::group::{MemberChange, MemberChanged};
use crate::ids::{GroupId, SelectorId};
use crate::thing::Thing;

#[derive(Debug)]
pub struct SingleThingSelector {
    allowed_thing: Arc<ItemDefinition>,
    allowed_stuff: Option<MaterialKind>,
    allowed_quality: QualityRange,
    allowed_hit_points: ConditionRange,
    quality_changed: CallbackSlot<QualityRange>,
    hit_points_changed: CallbackSlot<ConditionRange>,
    stuff_changed: CallbackSlot<Option<MaterialKind>>,
}

impl SingleThingSelector {
    /// Accepts `def` in any material, quality and condition.
    pub fn new(def: Arc<ItemDefinition>) -> Self {
        Self {
            allowed_thing: def,
            allowed_stuff: None,
            allowed_quality: QualityRange::ALL,
            allowed_hit_points: ConditionRange::FULL,
            quality_changed: CallbackSlot::new(),
            hit_points_changed: CallbackSlot::new(),
            stuff_changed: CallbackSlot::new(),
        }
    }

    #[must_use]
    pub fn with_stuff(mut self, stuff: impl Into<MaterialKind>) -> Self {
        self.allowed_stuff = Some(stuff.into());
        self
    }

    #[must_use]
    pub fn with_quality(mut self, range: QualityRange) -> Self {
        self.allowed_quality = range;
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self, range: ConditionRange) -> Self {
        self.allowed_hit_points = range;
        self
    }

    pub fn allowed_thing(&self) -> &Arc<ItemDefinition> {
        &self.allowed_thing
    }

    pub fn kind(&self) -> &ItemKind {
        &self.allowed_thing.kind
    }

    pub fn allowed_stuff(&self) -> Option<&MaterialKind> {
        self.allowed_stuff.as_ref()
    }

    pub fn allowed_quality(&self) -> QualityRange {
        self.allowed_quality
    }

    pub fn allowed_hit_points(&self) -> ConditionRange {
        self.allowed_hit_points
    }

    pub fn set_allowed_stuff(&mut self, stuff: Option<MaterialKind>) {
        self.allowed_stuff = stuff;
        self.stuff_changed.emit(&self.allowed_stuff);
    }

    pub fn set_allowed_quality(&mut self, range: QualityRange) {
        self.allowed_quality = range;
        self.quality_changed.emit(&range);
    }

    pub fn set_allowed_hit_points(&mut self, range: ConditionRange) {
        self.allowed_hit_points = range;
        self.hit_points_changed.emit(&range);
    }

    #[must_use]
    pub fn try_set_quality_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&QualityRange) + Send + 'static,
    {
        self.quality_changed.try_set(callback)
    }

    #[must_use]
    pub fn try_set_hit_points_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&ConditionRange) + Send + 'static,
    {
        self.hit_points_changed.try_set(callback)
    }

    #[must_use]
    pub fn try_set_stuff_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&Option<MaterialKind>) + Send + 'static,
    {
        self.stuff_changed.try_set(callback)
    }

    /// Points all three change slots at the owning group's relay. Any callback
    /// registered before the selector joined the group is dropped.
    pub(crate) fn relay_changes_to(
        &mut self,
        relay: &SharedSlot<MemberChanged>,
        group: GroupId,
        selector: SelectorId,
    ) {
        let forward = move |relay: &SharedSlot<MemberChanged>, change: MemberChange| {
            emit_shared(
                relay,
                &MemberChanged {
                    group,
                    selector,
                    change,
                },
            );
        };

        let quality_relay = relay.clone();
        self.quality_changed.replace(move |range| {
            forward(&quality_relay, MemberChange::Quality(*range));
        });
        let hit_points_relay = relay.clone();
        self.hit_points_changed.replace(move |range| {
            forward(&hit_points_relay, MemberChange::HitPoints(*range));
        });
        let stuff_relay = relay.clone();
        self.stuff_changed.replace(move |stuff| {
            forward(&stuff_relay, MemberChange::Stuff(stuff.clone()));
        });
    }

    pub(crate) fn clear_callbacks(&mut self) {
        self.quality_changed.clear();
        self.hit_points_changed.clear();
        self.stuff_changed.clear();
    }

    /// Kind, material, quality and condition all have to agree.
    ///
    /// Things without a quality or definitions without hit points skip the
    /// corresponding check.
    pub fn matches(&self, thing: &Thing) -> bool {
        let kind_ok = thing.def.kind == self.allowed_thing.kind;
        let stuff_ok = self
            .allowed_stuff
            .as_ref()
            .is_none_or(|stuff| thing.stuff.as_ref() == Some(stuff));
        let quality_ok = thing
            .quality
            .is_none_or(|quality| self.allowed_quality.includes(quality));
        let hit_points_ok =
            !thing.def.uses_hit_points || self.allowed_hit_points.includes(thing.condition);

        kind_ok && stuff_ok && quality_ok && hit_points_ok
    }

    /// Value equality: same allowed thing and same material restriction.
    pub fn same_entry(&self, other: &SingleThingSelector) -> bool {
        self.allowed_thing.kind == other.allowed_thing.kind
            && self.allowed_stuff == other.allowed_stuff
    }

    /// One unit at the lowest allowed quality, full condition, in the allowed
    /// material (or the definition's default).
    pub fn make_sample(&self) -> Thing {
        let def = &self.allowed_thing;
        Thing {
            stuff: self
                .allowed_stuff
                .clone()
                .or_else(|| def.default_stuff.clone()),
            quality: def.has_quality.then_some(self.allowed_quality.min),
            condition: self.allowed_hit_points.max,
            quantity: 1,
            def: def.clone(),
        }
    }

    /// Copies the restrictions; callback slots start empty.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            allowed_thing: self.allowed_thing.clone(),
            allowed_stuff: self.allowed_stuff.clone(),
            allowed_quality: self.allowed_quality,
            allowed_hit_points: self.allowed_hit_points,
            quality_changed: CallbackSlot::new(),
            hit_points_changed: CallbackSlot::new(),
            stuff_changed: CallbackSlot::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{ItemClass, Quality};
    use std::sync::Mutex;

    fn longsword() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("longsword", ItemClass::Weapon, 2.0)
                .with_stuff("steel")
                .with_quality()
                .with_hit_points(),
        )
    }

    #[test]
    fn unrestricted_material_accepts_any_material() {
        let selector = SingleThingSelector::new(longsword());
        for stuff in ["steel", "plasteel", "wood"] {
            assert!(selector.matches(&Thing::new(longsword()).with_stuff(stuff)));
        }
    }

    #[test]
    fn material_restriction_is_enforced() {
        let selector = SingleThingSelector::new(longsword()).with_stuff("plasteel");
        assert!(selector.matches(&Thing::new(longsword()).with_stuff("plasteel")));
        assert!(!selector.matches(&Thing::new(longsword())));
    }

    #[test]
    fn quality_and_condition_bounds() {
        let selector = SingleThingSelector::new(longsword())
            .with_quality(QualityRange::at_least(Quality::Good))
            .with_hit_points(ConditionRange::new(0.5, 1.0));

        let good = Thing::new(longsword()).with_quality(Quality::Good);
        assert!(selector.matches(&good));
        assert!(!selector.matches(&good.clone().with_condition(0.3)));
        assert!(!selector.matches(&good.with_quality(Quality::Normal)));
    }

    #[test]
    fn other_kinds_never_match() {
        let mace = Arc::new(ItemDefinition::new("mace", ItemClass::Weapon, 2.0));
        let selector = SingleThingSelector::new(longsword());
        assert!(!selector.matches(&Thing::new(mace)));
    }

    #[test]
    fn sample_uses_lowest_allowed_quality() {
        let selector = SingleThingSelector::new(longsword())
            .with_stuff("plasteel")
            .with_quality(QualityRange::new(Quality::Good, Quality::Masterwork));
        let sample = selector.make_sample();

        assert_eq!(sample.quality, Some(Quality::Good));
        assert_eq!(sample.stuff, Some(MaterialKind::new("plasteel")));
        assert_eq!(sample.quantity, 1);
        assert!(selector.matches(&sample));
    }

    #[test]
    fn setters_raise_callbacks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut selector = SingleThingSelector::new(longsword());

        let sink = seen.clone();
        assert!(selector.try_set_quality_callback(move |range| {
            sink.lock().unwrap().push(range.min);
        }));
        selector.set_allowed_quality(QualityRange::at_least(Quality::Excellent));

        assert_eq!(*seen.lock().unwrap(), vec![Quality::Excellent]);
    }

    #[test]
    fn same_entry_compares_thing_and_stuff() {
        let a = SingleThingSelector::new(longsword()).with_stuff("steel");
        let b = SingleThingSelector::new(longsword())
            .with_stuff("steel")
            .with_quality(QualityRange::at_least(Quality::Good));
        let c = SingleThingSelector::new(longsword());

        assert!(a.same_entry(&b));
        assert!(!a.same_entry(&c));
    }
}
