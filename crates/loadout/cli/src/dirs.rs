//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for cache and data directories.

use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "loadout")
}

/// Get the platform-specific log directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/loadout/logs`
/// - Linux: `~/.cache/loadout/logs` (or `$XDG_CACHE_HOME/loadout/logs`)
/// - Windows: `%LOCALAPPDATA%\loadout\logs`
/// - Fallback: `/tmp/loadout/logs`
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/loadout"))
        .join("logs")
}

/// Get the platform-specific directory for saved loadouts
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/loadout/loadouts`
/// - Linux: `~/.local/share/loadout/loadouts` (or `$XDG_DATA_HOME/loadout/loadouts`)
/// - Windows: `%APPDATA%\loadout\loadouts`
/// - Fallback: `./save_data/loadouts`
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("loadouts")
}
