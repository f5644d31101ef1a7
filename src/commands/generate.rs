//! `objj generate` - build completion tables from a Cappuccino checkout

use anyhow::{bail, Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use objj::completions::{self, GenerateStats};
use objj::{paths, settings};

pub fn execute(source: Option<PathBuf>, lib_dir: Option<PathBuf>) -> Result<()> {
    let settings_path = paths::settings_path();
    let config = settings::load_from(&settings_path)?;

    let source_root = resolve_source(source, &config)?;
    let lib_dir = lib_dir.unwrap_or_else(|| config.resolved_lib_dir());

    println!("🔍 Scanning {}...", source_root.display());
    let stats = run(&source_root, &lib_dir, &settings_path)?;

    println!("\n📊 Completion Summary:");
    println!("  • Files scanned: {}", stats.files_scanned);
    if stats.files_skipped > 0 {
        println!("  • Files skipped: {}", stats.files_skipped.to_string().yellow());
    }
    println!("  • Classes: {}", stats.classes);
    println!("  • Class methods: {}", stats.class_methods);
    println!("  • Instance methods: {}", stats.instance_methods);
    println!("  • Functions: {}", stats.functions);
    println!("  • Constants: {}", stats.constants);
    println!("  • Tables written: {} → {}", stats.files_written, lib_dir.display());
    if stats.stale_tables_removed > 0 {
        println!("  • Stale tables removed: {}", stats.stale_tables_removed);
    }
    println!("  • Time elapsed: {:?}", stats.time_elapsed);

    println!("\n{}", "✅ Cappuccino completions successfully generated.".green());
    Ok(())
}

/// Source root from the argument, else the remembered setting
fn resolve_source(source: Option<PathBuf>, config: &settings::Settings) -> Result<PathBuf> {
    match source.or_else(|| config.expanded_source()) {
        Some(path) => Ok(path),
        None => bail!(
            "No Cappuccino source path given. Pass one, or run 'objj config set cappuccino_source <path>'."
        ),
    }
}

/// Generate tables, then remember the canonical source root in `settings_path`
/// so the next run needs no argument.
fn run(source_root: &Path, lib_dir: &Path, settings_path: &Path) -> Result<GenerateStats> {
    let stats = completions::generate(source_root, lib_dir)?;

    let canonical = fs::canonicalize(source_root)
        .with_context(|| format!("Failed to resolve source path: {}", source_root.display()))?;

    let mut config = settings::load_from(settings_path)?;
    let remembered = config
        .expanded_source()
        .and_then(|path| fs::canonicalize(path).ok());

    if remembered.as_deref() != Some(canonical.as_path()) {
        config.cappuccino_source = Some(canonical.to_string_lossy().to_string());
        settings::save_to(settings_path, &config)?;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use objj::Settings;
    use tempfile::TempDir;

    fn cappuccino_tree(root: &Path) -> Result<()> {
        fs::create_dir_all(root.join("AppKit"))?;
        fs::create_dir_all(root.join("Foundation"))?;
        fs::write(
            root.join("Foundation/CPObject.j"),
            "@implementation CPObject\n+ (id)alloc\n@end\n",
        )?;
        Ok(())
    }

    #[test]
    fn test_successful_run_remembers_canonical_source() -> Result<()> {
        let tmp = TempDir::new()?;
        let source = tmp.path().join("cappuccino");
        cappuccino_tree(&source)?;
        let settings_path = tmp.path().join("home/settings.toml");

        // Relative-looking path with a `.` component
        let stats = run(&source.join("."), &tmp.path().join("lib"), &settings_path)?;
        assert_eq!(stats.classes, 1);

        let saved = settings::load_from(&settings_path)?;
        let expected = fs::canonicalize(&source)?;
        assert_eq!(
            saved.cappuccino_source.as_deref(),
            Some(expected.to_string_lossy().as_ref())
        );
        Ok(())
    }

    #[test]
    fn test_equivalent_remembered_source_is_left_alone() -> Result<()> {
        let tmp = TempDir::new()?;
        let source = tmp.path().join("cappuccino");
        cappuccino_tree(&source)?;
        let settings_path = tmp.path().join("settings.toml");

        let remembered = format!("{}/", source.display());
        let config = Settings {
            cappuccino_source: Some(remembered.clone()),
            ..Settings::default()
        };
        settings::save_to(&settings_path, &config)?;

        run(&source, &tmp.path().join("lib"), &settings_path)?;

        let saved = settings::load_from(&settings_path)?;
        assert_eq!(saved.cappuccino_source, Some(remembered));
        Ok(())
    }

    #[test]
    fn test_failed_run_saves_nothing() -> Result<()> {
        let tmp = TempDir::new()?;
        let settings_path = tmp.path().join("settings.toml");

        assert!(run(&tmp.path().join("missing"), &tmp.path().join("lib"), &settings_path).is_err());
        assert!(!settings_path.exists());
        Ok(())
    }

    #[test]
    fn test_missing_source_without_setting_is_an_error() {
        let err = resolve_source(None, &Settings::default()).unwrap_err();
        assert!(err.to_string().starts_with("No Cappuccino source path given."));
    }
}
