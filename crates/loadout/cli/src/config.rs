//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use crate::dirs;

#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Where saved loadouts live.
    pub data_dir: PathBuf,
    /// Content directory; the built-in content is used when unset.
    pub content_dir: Option<PathBuf>,
    /// Also write logs to a file under the platform log directory.
    pub log_to_file: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir(),
            content_dir: None,
            log_to_file: false,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LOADOUT_DATA_DIR` - Directory for saved loadouts (default: platform-specific)
    /// - `LOADOUT_CONTENT_DIR` - Directory with items.ron/categories.ron (default: built-in)
    /// - `LOADOUT_LOG_TO_FILE` - Also log to a file (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("LOADOUT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.content_dir = env::var_os("LOADOUT_CONTENT_DIR").map(PathBuf::from);

        if let Some(enable) = read_env::<bool>("LOADOUT_LOG_TO_FILE") {
            config.log_to_file = enable;
        } else if env::var("LOADOUT_LOG_TO_FILE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.log_to_file = true;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
