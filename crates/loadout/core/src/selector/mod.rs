//! Thing selectors: rules deciding whether a concrete thing fills a slot.
//!
//! # Design: Base + Kind Pattern
//!
//! - [`ThingSelector`] holds what every selector shares: identity, the stack
//!   ceiling and the stack-count-changed callback
//! - [`SelectorKind`] holds the variant-specific predicate
//!   ([`SingleThingSelector`] or [`GenericThingSelector`])
//!
//! # Identity
//!
//! Selectors compare by [`SelectorId`], never by value. Two selectors for the
//! same item kind are different entities; use
//! [`SingleThingSelector::same_entry`] for value comparison.

mod callback;
mod generic;
mod single;

pub use callback::{Callback, CallbackSlot};
pub use generic::GenericThingSelector;
pub use single::SingleThingSelector;

pub(crate) use callback::{SharedSlot, emit_shared};

use core::cmp::{Ordering, Reverse};
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::category::GenericCategory;
use crate::config::LoadoutConfig;
use crate::defs::{ItemDefinition, ItemKind};
use crate::ids::{IdAllocator, SelectorId};
use crate::thing::Thing;

/// Variant-specific matching rule.
#[derive(Debug)]
pub enum SelectorKind {
    Single(SingleThingSelector),
    Generic(GenericThingSelector),
}

impl From<SingleThingSelector> for SelectorKind {
    fn from(selector: SingleThingSelector) -> Self {
        Self::Single(selector)
    }
}

impl From<GenericThingSelector> for SelectorKind {
    fn from(selector: GenericThingSelector) -> Self {
        Self::Generic(selector)
    }
}

#[derive(Debug)]
pub struct ThingSelector {
    id: SelectorId,
    allowed_stack_count: u32,
    stack_count_changed: CallbackSlot<u32>,
    kind: SelectorKind,
}

impl ThingSelector {
    pub fn new(
        ids: &mut IdAllocator,
        kind: impl Into<SelectorKind>,
        allowed_stack_count: u32,
    ) -> Self {
        Self {
            id: ids.next_selector(),
            allowed_stack_count,
            stack_count_changed: CallbackSlot::new(),
            kind: kind.into(),
        }
    }

    /// Unrestricted selector for `def` with the default stack count.
    pub fn single(ids: &mut IdAllocator, def: Arc<ItemDefinition>) -> Self {
        Self::new(
            ids,
            SingleThingSelector::new(def),
            LoadoutConfig::DEFAULT_STACK_COUNT,
        )
    }

    /// Selector for `category` with the category's default count.
    pub fn generic(ids: &mut IdAllocator, category: Arc<GenericCategory>) -> Self {
        let count = category.default_count();
        Self::new(ids, GenericThingSelector::new(category), count)
    }

    pub fn id(&self) -> SelectorId {
        self.id
    }

    pub fn allowed_stack_count(&self) -> u32 {
        self.allowed_stack_count
    }

    pub fn kind(&self) -> &SelectorKind {
        &self.kind
    }

    pub fn as_single(&self) -> Option<&SingleThingSelector> {
        match &self.kind {
            SelectorKind::Single(single) => Some(single),
            SelectorKind::Generic(_) => None,
        }
    }

    pub fn as_single_mut(&mut self) -> Option<&mut SingleThingSelector> {
        match &mut self.kind {
            SelectorKind::Single(single) => Some(single),
            SelectorKind::Generic(_) => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericThingSelector> {
        match &self.kind {
            SelectorKind::Generic(generic) => Some(generic),
            SelectorKind::Single(_) => None,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self.kind, SelectorKind::Single(_))
    }

    /// The item kind this selector is built around: the allowed thing, or the
    /// representative of a generic category.
    pub fn target_kind(&self) -> &ItemKind {
        match &self.kind {
            SelectorKind::Single(single) => single.kind(),
            SelectorKind::Generic(generic) => &generic.category().representative().kind,
        }
    }

    /// Variant predicate only, ignoring stack counts.
    pub fn matches(&self, thing: &Thing) -> bool {
        match &self.kind {
            SelectorKind::Single(single) => single.matches(thing),
            SelectorKind::Generic(generic) => generic.matches(thing),
        }
    }

    /// Whether `thing` may be added on top of `accumulated` units already
    /// counted against this selector.
    ///
    /// A negative `accumulated` is a caller bug: it is logged and rejected.
    pub fn allows(&self, thing: &Thing, accumulated: i32) -> bool {
        if accumulated < 0 {
            tracing::error!(
                selector = %self.id,
                accumulated,
                "negative accumulated count passed to allows"
            );
            return false;
        }

        self.matches(thing)
            && u64::from(accumulated.unsigned_abs()) + u64::from(thing.quantity)
                <= u64::from(self.allowed_stack_count)
    }

    /// Replaces the ceiling and notifies the registered callback with the new
    /// value.
    pub fn set_stack_count(&mut self, count: u32) {
        self.allowed_stack_count = count;
        self.stack_count_changed.emit(&count);
    }

    #[must_use]
    pub fn try_set_stack_count_callback<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&u32) + Send + 'static,
    {
        self.stack_count_changed.try_set(callback)
    }

    pub fn make_sample(&self) -> Thing {
        match &self.kind {
            SelectorKind::Single(single) => single.make_sample(),
            SelectorKind::Generic(generic) => generic.make_sample(),
        }
    }

    pub fn unit_mass(&self) -> f32 {
        self.make_sample().unit_mass()
    }

    /// Ranking used to pick between several accepting selectors; greater is
    /// more specific.
    pub fn specificity(&self) -> Specificity {
        match &self.kind {
            SelectorKind::Single(single) => Specificity {
                single: true,
                material_restricted: single.allowed_stuff().is_some(),
                quality_span: Reverse(single.allowed_quality().span()),
                hit_point_span: Reverse(per_mille(single.allowed_hit_points().span())),
            },
            SelectorKind::Generic(_) => Specificity {
                single: false,
                material_restricted: false,
                quality_span: Reverse(u8::MAX),
                hit_point_span: Reverse(u16::MAX),
            },
        }
    }

    /// Total order over selectors: specificity first, then the older (lower)
    /// ID wins.
    pub fn cmp_specificity(&self, other: &ThingSelector) -> Ordering {
        self.specificity()
            .cmp(&other.specificity())
            .then_with(|| other.id.cmp(&self.id))
    }

    /// Deep copy with a fresh ID and empty callback slots.
    pub fn duplicate(&self, ids: &mut IdAllocator) -> Self {
        let kind = match &self.kind {
            SelectorKind::Single(single) => SelectorKind::Single(single.duplicate()),
            SelectorKind::Generic(generic) => SelectorKind::Generic(generic.clone()),
        };
        Self::new(ids, kind, self.allowed_stack_count)
    }
}

impl PartialEq for ThingSelector {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ThingSelector {}

impl Hash for ThingSelector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Specificity key, compared field by field in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub single: bool,
    pub material_restricted: bool,
    pub quality_span: Reverse<u8>,
    pub hit_point_span: Reverse<u16>,
}

fn per_mille(span: f32) -> u16 {
    (span.clamp(0.0, 1.0) * 1000.0).round() as u16
}
