//! Single source of truth for ALL objj filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O, no validation,
//! no business logic. One file shows the entire filesystem layout.
//!
//! # User-Level Paths (~/.objj/)
//!
//! ```text
//! ~/.objj/                       # overridable with OBJJ_HOME
//! ├── settings.toml              # cappuccino_source, lookup_target, lib_dir
//! └── lib/                       # Generated completion tables (rebuildable)
//!     ├── classes.completions
//!     ├── constants.completions
//!     ├── functions.completions
//!     ├── instance_methods.completions
//!     └── class_methods/
//!         └── CPView.completions # one file per class
//! ```
//!
//! # Cappuccino Source Layout
//!
//! ```text
//! <cappuccino_source>/
//! ├── AppKit/
//! └── Foundation/
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the objj home directory.
pub const HOME_ENV_VAR: &str = "OBJJ_HOME";

/// Extension shared by every completion table file.
pub const COMPLETIONS_EXTENSION: &str = "completions";

// =============================================================================
// User Level (~/.objj/)
// =============================================================================

/// User's objj home directory: `$OBJJ_HOME` or `~/.objj/`
pub fn objj_home() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV_VAR) {
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".objj")
}

/// Settings file: `~/.objj/settings.toml`
pub fn settings_path() -> PathBuf {
    objj_home().join("settings.toml")
}

/// Default completion library: `~/.objj/lib/`
pub fn default_lib_dir() -> PathBuf {
    objj_home().join("lib")
}

// =============================================================================
// Completion Library (<lib_dir>/)
// =============================================================================

/// Completion table paths inside a library directory
pub mod completions {
    use super::*;

    /// Per-class tables: `<lib_dir>/class_methods/`
    pub fn class_methods_dir(lib_dir: &Path) -> PathBuf {
        lib_dir.join("class_methods")
    }

    /// Table for one category: `<lib_dir>/<category>.completions`
    pub fn category_path(lib_dir: &Path, category: &str) -> PathBuf {
        lib_dir.join(format!("{}.{}", category, COMPLETIONS_EXTENSION))
    }

    /// Table for one class: `<lib_dir>/class_methods/<Class>.completions`
    pub fn class_path(lib_dir: &Path, class_name: &str) -> PathBuf {
        class_methods_dir(lib_dir).join(format!("{}.{}", class_name, COMPLETIONS_EXTENSION))
    }
}

// =============================================================================
// Cappuccino Source (<cappuccino_source>/)
// =============================================================================

/// Framework directories a Cappuccino checkout must contain, in scan order
pub mod source {
    use super::*;

    /// Framework subdirectory names, scanned in this order.
    pub const FRAMEWORKS: [&str; 2] = ["AppKit", "Foundation"];

    /// Subtree name never scanned for sources.
    pub const RESOURCES_DIR: &str = "Resources";

    /// Framework directories under a source root, in scan order
    pub fn framework_dirs(source_root: &Path) -> Vec<PathBuf> {
        FRAMEWORKS.iter().map(|name| source_root.join(name)).collect()
    }
}
