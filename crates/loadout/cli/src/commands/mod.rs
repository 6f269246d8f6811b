//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and
//! execution logic against a shared [`Context`].

mod check;
mod copy;
mod import;
mod inspect;
mod list;
mod remove;

pub use check::Check;
pub use copy::CopyLoadout;
pub use import::Import;
pub use inspect::Inspect;
pub use list::List;
pub use remove::Remove;

use anyhow::{Context as _, Result};
use loadout_content::{Content, ContentFactory, builtin};
use loadout_core::{LoadoutManager, LoadoutRecord};

use crate::config::CliConfig;
use crate::repository::FileLoadoutRepository;

/// Content and storage shared by every command.
pub struct Context {
    pub repo: FileLoadoutRepository,
    pub content: Content,
}

impl Context {
    pub fn open(config: &CliConfig) -> Result<Self> {
        let content = match &config.content_dir {
            Some(dir) => ContentFactory::new(dir).load_all()?,
            None => builtin::load().context("Failed to load built-in content")?,
        };
        let repo = FileLoadoutRepository::new(&config.data_dir).with_context(|| {
            format!("Failed to open data directory: {}", config.data_dir.display())
        })?;

        Ok(Self { repo, content })
    }

    /// A manager configured from content, for commands that build loadouts.
    pub fn manager(&self) -> LoadoutManager {
        LoadoutManager::new(self.content.config.clone())
    }

    pub fn load_record(&self, name: &str) -> Result<LoadoutRecord> {
        self.repo
            .require(name)
            .with_context(|| format!("Failed to load loadout `{name}`"))
    }
}
