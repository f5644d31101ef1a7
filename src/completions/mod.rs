//! Cappuccino completion tables.
//!
//! Generation is a straight pipeline, one layer per module:
//!
//! 1. `scanner`   - find `CP*.j`/`CG*.j`/`CA*.j` files under AppKit and Foundation
//! 2. `extractor` - regex out classes, methods, functions, constants
//! 3. `signature` - strip selectors to keys, build placeholder snippets
//! 4. `tables`    - merge everything into ordered symbol tables
//! 5. `writer`    - serialize one TOML table per category and per class
//!
//! `query` reads the tables back for completion requests.
//!
//! # Example
//!
//! ```no_run
//! use objj::completions::{self, CompletionIndex, QueryContext};
//! use std::path::Path;
//!
//! let lib = Path::new("/tmp/objj-lib");
//! let stats = completions::generate(Path::new("/src/cappuccino"), lib)?;
//! println!("{} classes", stats.classes);
//!
//! let index = CompletionIndex::open(lib);
//! for completion in index.query(&QueryContext::message_to("CPView"), "") {
//!     println!("{} -> {}", completion.label, completion.template);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod extractor;
pub mod format;
pub mod query;
pub mod scanner;
pub mod signature;
pub mod tables;
pub mod writer;

use anyhow::{bail, Result};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::diagnostics::log_debug;
use crate::paths;

pub use format::{Completion, CompletionFile};
pub use query::{CompletionIndex, QueryContext};
pub use tables::SymbolTables;

/// Category tables written next to the per-class tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Classes,
    Functions,
    Constants,
    InstanceMethods,
}

impl Category {
    /// File name without extension
    pub fn file_stem(self) -> &'static str {
        match self {
            Category::Classes => "classes",
            Category::Functions => "functions",
            Category::Constants => "constants",
            Category::InstanceMethods => "instance_methods",
        }
    }

    /// Appended to labels in prefixed completion results
    pub fn label_suffix(self) -> &'static str {
        match self {
            Category::Classes => " [c]",
            Category::Constants => " [k]",
            Category::InstanceMethods => " [m]",
            // Function labels already end in `()`
            Category::Functions => "",
        }
    }
}

/// Summary of one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub classes: usize,
    pub class_methods: usize,
    pub instance_methods: usize,
    pub functions: usize,
    pub constants: usize,
    pub files_written: usize,
    pub stale_tables_removed: usize,
    pub time_elapsed: Duration,
}

/// Check that `source_root` is a Cappuccino checkout.
///
/// Runs before anything is written.
pub fn validate_source_root(source_root: &Path) -> Result<()> {
    if !source_root.is_dir() {
        bail!(
            "'{}' is not a valid path to a directory.",
            source_root.display()
        );
    }

    if paths::source::framework_dirs(source_root)
        .iter()
        .any(|dir| !dir.is_dir())
    {
        bail!(
            "'{}' does not appear to be a Cappuccino source directory.",
            source_root.display()
        );
    }

    Ok(())
}

/// Scan and extract every framework under `source_root` into symbol tables.
pub fn collect(source_root: &Path) -> Result<(SymbolTables, GenerateStats)> {
    validate_source_root(source_root)?;

    let mut tables = SymbolTables::new();
    let mut stats = GenerateStats::default();

    for framework in paths::source::framework_dirs(source_root) {
        let files = scanner::find_sources(&framework)?;
        log_debug(
            "completions",
            &format!("{} sources in {}", files.len(), framework.display()),
        );

        for path in files {
            match scanner::SourceFile::read(&path) {
                Some(source) => {
                    let declarations = extractor::extract(&source.text);
                    log_debug(
                        "completions",
                        &format!(
                            "{}: {} classes, {} functions, {} constants",
                            source.path.display(),
                            declarations.classes.len(),
                            declarations.functions.len(),
                            declarations.constants.len()
                        ),
                    );
                    tables.merge(declarations);
                    stats.files_scanned += 1;
                }
                None => stats.files_skipped += 1,
            }
        }
    }

    stats.classes = tables.class_count();
    stats.class_methods = tables.class_method_count();
    stats.instance_methods = tables.instance_method_count();
    stats.functions = tables.function_count();
    stats.constants = tables.constant_count();

    Ok((tables, stats))
}

/// Generate all completion tables from a Cappuccino checkout into `lib_dir`.
///
/// Fully replaces previously generated tables. Aborts without writing when
/// the source root is not a Cappuccino checkout.
pub fn generate(source_root: &Path, lib_dir: &Path) -> Result<GenerateStats> {
    let start = Instant::now();

    let (tables, mut stats) = collect(source_root)?;
    let written = writer::write_all(&tables, lib_dir)?;

    stats.files_written = written.files_written;
    stats.stale_tables_removed = written.stale_files_removed;
    stats.time_elapsed = start.elapsed();
    Ok(stats)
}
