//! Data-driven content for the loadout rules engine.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Item and material definitions (data-driven via RON)
//! - Generic categories (data-driven via RON)
//! - Selector defaults (data-driven via TOML)
//!
//! The same files ship inside the crate and are available through
//! [`builtin`] without touching the filesystem.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CategoryLoader, CategorySpec, ConfigLoader, Content, ContentFactory, ItemCatalog, ItemLoader,
};
