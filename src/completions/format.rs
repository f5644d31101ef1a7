//! On-disk completion table format.
//!
//! Tables are plain TOML data read back with serde - never executed:
//!
//! ```toml
//! superclass = "CPObject"   # class-method tables only
//!
//! [[completions]]
//! label = "defaultValue"
//! template = "defaultValue"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One (display label, insertion template) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub label: String,
    pub template: String,
}

impl Completion {
    pub fn new(label: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            template: template.into(),
        }
    }

    /// Completion whose label is also the inserted text
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            template: text,
        }
    }
}

/// Contents of one `.completions` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionFile {
    /// Superclass name for class-method tables; empty string for root classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub completions: Vec<Completion>,
}

impl CompletionFile {
    /// Category table (no superclass entry)
    pub fn category(completions: Vec<Completion>) -> Self {
        Self {
            superclass: None,
            completions,
        }
    }

    /// Class-method table; `superclass` is recorded even when empty
    pub fn class(superclass: &str, completions: Vec<Completion>) -> Self {
        Self {
            superclass: Some(superclass.to_string()),
            completions,
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a table file
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read completions: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse completions: {}", path.display()))
    }

    /// Write a table file, replacing whatever was there
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write completions: {}", path.display()))
    }
}

/// Sort by label, case-insensitively. Stable for labels equal ignoring case.
pub fn sort_completions(completions: &mut [Completion]) {
    completions.sort_by_key(|c| c.label.to_lowercase());
}
