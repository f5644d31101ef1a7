//! Source discovery for Cappuccino frameworks.

use anyhow::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

use crate::diagnostics::log_debug;
use crate::paths::source::RESOURCES_DIR;

/// Framework source file names: `CPView.j`, `CGGeometry.j`, `CALayer.j`
fn source_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:CP|CG|CA)\w+\.j$").expect("Invalid source name regex"))
}

/// A source file read for extraction
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    /// Read a file; `None` if it can't be read as UTF-8 text
    pub fn read(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Some(Self {
                path: path.to_path_buf(),
                text,
            }),
            Err(e) => {
                log_debug(
                    "completions::scanner",
                    &format!("skipping {}: {}", path.display(), e),
                );
                None
            }
        }
    }
}

/// Whether a file name looks like a framework source file
pub fn is_source_name(file_name: &str) -> bool {
    source_name_regex().is_match(file_name)
}

/// Find framework source files under `root`, sorted by path.
///
/// `Resources` subtrees are never entered. Unreadable directory entries are
/// skipped.
pub fn find_sources(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == RESOURCES_DIR))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(name) = entry.file_name().to_str() {
            if is_source_name(name) {
                files.push(entry.path().to_owned());
            }
        }
    }

    files.sort();
    Ok(files)
}
