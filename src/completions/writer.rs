//! Completion table writer.
//!
//! Writes every category table plus one table per class. Files are
//! overwritten unconditionally and written one at a time; a failure part way
//! leaves the tables already written in place.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use super::format::CompletionFile;
use super::tables::SymbolTables;
use super::Category;
use crate::diagnostics::log_debug;
use crate::paths;

/// What a write pass produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteStats {
    pub files_written: usize,
    pub stale_files_removed: usize,
}

/// Write all tables under `lib_dir`.
///
/// Order: instance methods, class methods, classes, functions, constants.
pub fn write_all(tables: &SymbolTables, lib_dir: &Path) -> Result<WriteStats> {
    fs::create_dir_all(lib_dir)
        .with_context(|| format!("Failed to create library directory: {}", lib_dir.display()))?;

    let mut stats = WriteStats::default();

    write_category(lib_dir, Category::InstanceMethods, tables)?;
    stats.files_written += 1;

    stats.files_written += write_class_methods(tables, lib_dir)?;
    stats.stale_files_removed = remove_stale_class_tables(tables, lib_dir)?;

    for category in [Category::Classes, Category::Functions, Category::Constants] {
        write_category(lib_dir, category, tables)?;
        stats.files_written += 1;
    }

    Ok(stats)
}

fn write_category(lib_dir: &Path, category: Category, tables: &SymbolTables) -> Result<()> {
    let completions = match category {
        Category::Classes => tables.classes(),
        Category::Functions => tables.functions(),
        Category::Constants => tables.constants(),
        Category::InstanceMethods => tables.instance_methods(),
    };

    let path = paths::completions::category_path(lib_dir, category.file_stem());
    log_debug(
        "completions::writer",
        &format!("{} entries -> {}", completions.len(), path.display()),
    );
    CompletionFile::category(completions).write(&path)
}

/// One file per known class, even when it declares no class methods, so the
/// superclass chain stays walkable.
fn write_class_methods(tables: &SymbolTables, lib_dir: &Path) -> Result<usize> {
    let dir = paths::completions::class_methods_dir(lib_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create class methods directory: {}", dir.display()))?;

    let mut written = 0;
    for class_name in tables.class_names() {
        let table = tables.class_table(class_name);
        let path = paths::completions::class_path(lib_dir, class_name);
        CompletionFile::class(&table.superclass, table.completions).write(&path)?;
        written += 1;
    }

    Ok(written)
}

/// Remove class tables left over from classes that no longer exist.
fn remove_stale_class_tables(tables: &SymbolTables, lib_dir: &Path) -> Result<usize> {
    let dir = paths::completions::class_methods_dir(lib_dir);
    let current: BTreeSet<&str> = tables.class_names().collect();
    let mut removed = 0;

    let entries = fs::read_dir(&dir)
        .with_context(|| format!("Failed to list class tables: {}", dir.display()))?;

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(paths::COMPLETIONS_EXTENSION) {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if !current.contains(stem) {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale table: {}", path.display()))?;
            log_debug("completions::writer", &format!("removed stale {}", path.display()));
            removed += 1;
        }
    }

    Ok(removed)
}
