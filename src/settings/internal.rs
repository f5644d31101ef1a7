//! Internal implementation for settings module
//!
//! Handles settings.toml load/save and key-based editing for `objj config`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// User settings stored in settings.toml
/// All keys are optional; a missing file means all defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of a Cappuccino checkout (contains AppKit/ and Foundation/)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cappuccino_source: Option<String>,
    /// Documentation browser used by `objj lookup` (e.g. "ingredients")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_target: Option<String>,
    /// Where completion tables are written and read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib_dir: Option<PathBuf>,
}

impl Settings {
    /// Cappuccino source path with `~` and environment variables expanded
    pub fn expanded_source(&self) -> Option<PathBuf> {
        self.cappuccino_source.as_deref().map(expand_path)
    }

    /// Completion library directory, falling back to `~/.objj/lib`
    pub fn resolved_lib_dir(&self) -> PathBuf {
        match &self.lib_dir {
            Some(dir) => expand_path(&dir.to_string_lossy()),
            None => crate::paths::default_lib_dir(),
        }
    }

    /// Set a key from its string form
    pub fn set(&mut self, key: SettingKey, value: &str) {
        match key {
            SettingKey::CappuccinoSource => self.cappuccino_source = Some(value.to_string()),
            SettingKey::LookupTarget => self.lookup_target = Some(value.to_string()),
            SettingKey::LibDir => self.lib_dir = Some(PathBuf::from(value)),
        }
    }

    /// Clear a key back to its default
    pub fn unset(&mut self, key: SettingKey) {
        match key {
            SettingKey::CappuccinoSource => self.cappuccino_source = None,
            SettingKey::LookupTarget => self.lookup_target = None,
            SettingKey::LibDir => self.lib_dir = None,
        }
    }
}

/// Keys editable through `objj config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    CappuccinoSource,
    LookupTarget,
    LibDir,
}

impl FromStr for SettingKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cappuccino_source" => Ok(Self::CappuccinoSource),
            "lookup_target" => Ok(Self::LookupTarget),
            "lib_dir" => Ok(Self::LibDir),
            other => bail!(
                "Unknown setting '{}' (expected cappuccino_source, lookup_target or lib_dir)",
                other
            ),
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

// =============================================================================
// Load/Save
// =============================================================================

/// Load settings from a settings.toml path
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;

    toml::from_str(&contents).with_context(|| format!("Failed to parse settings: {}", path.display()))
}

/// Save settings to a settings.toml path
pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(settings)?;
    fs::write(path, contents).with_context(|| format!("Failed to write settings: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_default() {
        let tmp = TempDir::new().unwrap();
        let settings = load(&tmp.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/settings.toml");

        let mut settings = Settings::default();
        settings.set(SettingKey::CappuccinoSource, "/src/cappuccino");
        settings.set(SettingKey::LookupTarget, "ingredients");

        save(&path, &settings).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.cappuccino_source.as_deref(), Some("/src/cappuccino"));
        assert_eq!(loaded.lookup_target.as_deref(), Some("ingredients"));
        assert!(loaded.lib_dir.is_none());
    }

    #[test]
    fn test_unset_key_is_not_serialized() {
        let mut settings = Settings::default();
        settings.set(SettingKey::LibDir, "/tmp/lib");
        settings.unset(SettingKey::LibDir);

        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(!toml_str.contains("lib_dir"));
    }

    #[test]
    fn test_parse_setting_key() {
        assert_eq!(
            "lookup_target".parse::<SettingKey>().unwrap(),
            SettingKey::LookupTarget
        );
        assert!("colour".parse::<SettingKey>().is_err());
    }

    #[test]
    fn test_resolved_lib_dir_uses_explicit_dir() {
        let settings = Settings {
            lib_dir: Some(PathBuf::from("/opt/objj/lib")),
            ..Default::default()
        };
        assert_eq!(settings.resolved_lib_dir(), PathBuf::from("/opt/objj/lib"));
    }

    #[test]
    fn test_malformed_settings_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        fs::write(&path, "cappuccino_source = [").unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse settings"));
    }
}
