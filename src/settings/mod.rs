//! Settings module - persisted user settings
//!
//! Manages `~/.objj/settings.toml`: the Cappuccino source path remembered
//! after a successful generation, the documentation lookup target, and an
//! optional completion library directory.
//!
//! # Example
//!
//! ```no_run
//! use objj::settings;
//!
//! let mut config = settings::load()?;
//! config.lookup_target = Some("ingredients".to_string());
//! settings::save(&config)?;
//! println!("Tables live in {}", config.resolved_lib_dir().display());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use std::path::Path;

pub use internal::{Settings, SettingKey};

/// Load settings from `~/.objj/settings.toml`
///
/// Returns default settings if the file doesn't exist.
pub fn load() -> Result<Settings> {
    internal::load(&crate::paths::settings_path())
}

/// Save settings to `~/.objj/settings.toml`
///
/// Creates the objj home directory if it doesn't exist.
pub fn save(settings: &Settings) -> Result<()> {
    internal::save(&crate::paths::settings_path(), settings)
}

/// Load settings from an explicit file
pub fn load_from(path: &Path) -> Result<Settings> {
    internal::load(path)
}

/// Save settings to an explicit file
pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    internal::save(path, settings)
}
