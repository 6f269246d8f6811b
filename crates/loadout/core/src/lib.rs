//! Loadout matching rules shared by the content loaders and the CLI.
//!
//! `loadout-core` decides which concrete thing satisfies which loadout slot.
//! A [`Loadout`] is an ordered list of [`ThingGroupSelector`]s (the wishlist)
//! plus a blacklist; each group holds one or more [`ThingSelector`]s sharing a
//! stack ceiling. The crate performs no I/O: definitions come in through
//! [`DefOracle`] and [`CategoryCatalog`], and persistence goes through the
//! plain records in [`scribe`].
pub mod category;
pub mod config;
pub mod defs;
pub mod error;
pub mod group;
pub mod ids;
pub mod loadout;
pub mod manager;
pub mod restock;
#[cfg(feature = "serde")]
pub mod scribe;
pub mod selector;
pub mod thing;
pub use category::{CategoryCatalog, CategoryFilter, GenericCategory};
pub use config::LoadoutConfig;
pub use defs::{
    ConditionRange, DefDatabase, DefOracle, ItemClass, ItemDefinition, ItemKind,
    MaterialDefinition, MaterialKind, Quality, QualityRange,
};
pub use error::{CoreError, ErrorSeverity, LoadoutError, Result};
pub use group::{MemberChange, MemberChanged, StackCountChanged, ThingGroupSelector};
pub use ids::{GroupId, IdAllocator, LoadoutId, SelectorId};
pub use loadout::{Loadout, SelectorMatch, SelectorUpdate};
pub use manager::LoadoutManager;
pub use restock::{GroupMargin, RestockPlan, RestockTracker};
#[cfg(feature = "serde")]
pub use scribe::{GroupRecord, LoadContext, LoadoutRecord, SelectorRecord};
pub use selector::{
    CallbackSlot, GenericThingSelector, SelectorKind, SingleThingSelector, Specificity,
    ThingSelector,
};
pub use thing::{Thing, ThingKey};
