//! Centralized path helpers for config and cache directories.

use std::path::PathBuf;

use crate::core::app;

/// Env var that overrides the config directory (used by integration tests and portable setups).
pub const CONFIG_DIR_ENV: &str = "TABBY_PANEL_CONFIG_DIR";

/// Project directories (config, cache) from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Config directory (~/.config/tabby-panel/), or `TABBY_PANEL_CONFIG_DIR` when set.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Cache directory (~/.cache/tabby-panel/). Holds the TUI log file.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}
