//! Identifiers and the session-scoped ID allocator.

use core::fmt;

/// Identity of a [`crate::ThingSelector`].
///
/// Issued by an [`IdAllocator`]; a given allocator never issues the same value
/// twice. Equality of selectors is equality of their IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorId(pub u64);

/// Identity of a [`crate::ThingGroupSelector`] within its loadout.
///
/// Group IDs are persisted and restored verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(pub u32);

/// Identity of a [`crate::Loadout`] within a [`crate::LoadoutManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutId(pub u32);

impl fmt::Display for SelectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

impl fmt::Display for LoadoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loadout-{}", self.0)
    }
}

impl GroupId {
    pub const FIRST: Self = Self(0);

    /// The following ID, or `None` for the last representable one.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

/// Monotonic allocator for selector and loadout IDs.
///
/// One allocator is owned by each session ([`crate::LoadoutManager`]); tests
/// create their own so they never share counters.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_selector: u64,
    next_loadout: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_selector(&mut self) -> SelectorId {
        let id = SelectorId(self.next_selector);
        self.next_selector += 1;
        id
    }

    pub fn next_loadout(&mut self) -> LoadoutId {
        let id = LoadoutId(self.next_loadout);
        self.next_loadout += 1;
        id
    }

    /// Number of selector IDs issued so far.
    pub fn selectors_issued(&self) -> u64 {
        self.next_selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_ids_are_never_reused() {
        let mut ids = IdAllocator::new();
        let a = ids.next_selector();
        let b = ids.next_selector();
        let c = ids.next_selector();

        assert!(a < b && b < c);
        assert_eq!(ids.selectors_issued(), 3);
    }

    #[test]
    fn allocators_are_isolated() {
        let mut first = IdAllocator::new();
        let mut second = IdAllocator::new();
        first.next_selector();

        assert_eq!(second.next_selector(), SelectorId(0));
        assert_eq!(first.next_selector(), SelectorId(1));
    }

    #[test]
    fn last_group_id_has_no_successor() {
        assert_eq!(GroupId(4).next(), Some(GroupId(5)));
        assert_eq!(GroupId(u32::MAX).next(), None);
    }
}
