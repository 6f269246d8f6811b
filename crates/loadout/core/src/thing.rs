//! Concrete item stacks and their loadout key.

use std::sync::Arc;

use crate::defs::{ItemDefinition, ItemKind, MaterialKind, Quality};

/// One physical stack of items carried or lying around.
#[derive(Clone, Debug, PartialEq)]
pub struct Thing {
    pub def: Arc<ItemDefinition>,
    pub stuff: Option<MaterialKind>,
    pub quality: Option<Quality>,
    /// Fraction of hit points remaining, `1.0` for pristine items.
    pub condition: f32,
    pub quantity: u32,
}

impl Thing {
    /// Creates a pristine single unit in the definition's default material.
    pub fn new(def: Arc<ItemDefinition>) -> Self {
        let quality = def.has_quality.then_some(Quality::Normal);
        Self {
            stuff: def.default_stuff.clone(),
            quality,
            condition: 1.0,
            quantity: 1,
            def,
        }
    }

    #[must_use]
    pub fn with_stuff(mut self, stuff: impl Into<MaterialKind>) -> Self {
        self.stuff = Some(stuff.into());
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: f32) -> Self {
        self.condition = condition.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn kind(&self) -> &ItemKind {
        &self.def.kind
    }

    pub fn unit_mass(&self) -> f32 {
        self.def.mass
    }

    pub fn mass(&self) -> f32 {
        self.def.mass * self.quantity as f32
    }

    pub fn key(&self) -> ThingKey {
        ThingKey {
            kind: self.def.kind.clone(),
            stuff: self.stuff.clone(),
            quality: self.quality,
        }
    }
}

/// Identity of a loadout entry: two things are the same entry iff their kind,
/// material and quality agree. Condition and stack size are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThingKey {
    pub kind: ItemKind,
    pub stuff: Option<MaterialKind>,
    pub quality: Option<Quality>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::ItemClass;

    fn longsword() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("longsword", ItemClass::Weapon, 2.0)
                .with_stuff("steel")
                .with_quality()
                .with_hit_points(),
        )
    }

    #[test]
    fn new_thing_uses_definition_defaults() {
        let thing = Thing::new(longsword());
        assert_eq!(thing.stuff, Some(MaterialKind::new("steel")));
        assert_eq!(thing.quality, Some(Quality::Normal));
        assert_eq!(thing.quantity, 1);
    }

    #[test]
    fn key_ignores_condition_and_quantity() {
        let worn = Thing::new(longsword()).with_condition(0.2).with_quantity(1);
        let fresh = Thing::new(longsword()).with_condition(1.0).with_quantity(3);
        assert_eq!(worn.key(), fresh.key());

        let plasteel = Thing::new(longsword()).with_stuff("plasteel");
        assert_ne!(worn.key(), plasteel.key());
    }

    #[test]
    fn mass_scales_with_quantity() {
        let def = Arc::new(ItemDefinition::new("simple_meal", ItemClass::Meal, 0.5));
        assert_eq!(Thing::new(def).with_quantity(4).mass(), 2.0);
    }
}
