//! Completion lookup over generated tables.
//!
//! Read failures never abort a query: a table that can't be read or parsed
//! is logged and contributes nothing.

use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::format::{Completion, CompletionFile};
use super::Category;
use crate::diagnostics::log_debug;
use crate::paths;

/// Class names are a two-letter prefix plus a name.
const MIN_CLASS_NAME_LEN: usize = 3;

/// Receivers that can name a class table: a single word, no path separators
fn class_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+$").expect("Invalid class name regex"))
}

/// Where the cursor is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    /// Cursor is inside a `[...]` message send
    pub bracketed: bool,
    /// First word after the opening `[`, if any
    pub receiver: Option<String>,
}

impl QueryContext {
    /// Context outside of any message send
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Context inside `[receiver ...]`
    pub fn message_to(receiver: impl Into<String>) -> Self {
        Self {
            bracketed: true,
            receiver: Some(receiver.into()),
        }
    }
}

/// Read-only view of a completion library directory
#[derive(Debug, Clone)]
pub struct CompletionIndex {
    lib_dir: PathBuf,
}

impl CompletionIndex {
    pub fn open(lib_dir: impl Into<PathBuf>) -> Self {
        Self {
            lib_dir: lib_dir.into(),
        }
    }

    /// Whether a class-methods table exists for `name`
    pub fn is_class_name(&self, name: &str) -> bool {
        name.len() >= MIN_CLASS_NAME_LEN
            && class_name_regex().is_match(name)
            && paths::completions::class_path(&self.lib_dir, name).exists()
    }

    /// Completions for a cursor context.
    ///
    /// A known class receiver yields its class methods and those of every
    /// superclass, nearest first, with labels already seen dropped. Anything
    /// else yields instance methods (inside brackets only), then classes,
    /// functions and constants.
    pub fn query(&self, context: &QueryContext, prefix: &str) -> Vec<Completion> {
        if context.bracketed {
            if let Some(receiver) = context.receiver.as_deref() {
                if self.is_class_name(receiver) {
                    return filter_prefix(self.class_method_chain(receiver), prefix);
                }
            }
        }

        let mut completions = Vec::new();

        if context.bracketed {
            self.append_category(Category::InstanceMethods, prefix, &mut completions);
        }

        for category in [Category::Classes, Category::Functions, Category::Constants] {
            self.append_category(category, prefix, &mut completions);
        }

        completions
    }

    /// Class methods of `class_name` and its superclasses.
    pub fn class_method_chain(&self, class_name: &str) -> Vec<Completion> {
        let mut completions: Vec<Completion> = Vec::new();
        let mut seen_labels = HashSet::new();
        let mut visited = HashSet::new();
        let mut current = class_name.to_string();

        loop {
            if !visited.insert(current.clone()) {
                log_debug(
                    "completions::query",
                    &format!("superclass cycle at {}", current),
                );
                break;
            }

            let (superclass, class_completions) = self.read_class_methods(&current);

            for completion in class_completions {
                if seen_labels.insert(completion.label.clone()) {
                    completions.push(completion);
                }
            }

            if superclass.is_empty() {
                break;
            }
            current = superclass;
        }

        completions
    }

    /// `(superclass, completions)` for one class; empty on any failure
    fn read_class_methods(&self, class_name: &str) -> (String, Vec<Completion>) {
        if !self.is_class_name(class_name) {
            return (String::new(), Vec::new());
        }

        let path = paths::completions::class_path(&self.lib_dir, class_name);
        match CompletionFile::read(&path) {
            Ok(file) => (file.superclass.unwrap_or_default(), file.completions),
            Err(e) => {
                eprintln!("⚠️  {:#}", e);
                (String::new(), Vec::new())
            }
        }
    }

    /// Entries of one category table; empty on any failure
    pub fn read_category(&self, category: Category) -> Vec<Completion> {
        let path = paths::completions::category_path(&self.lib_dir, category.file_stem());
        if !path.exists() {
            log_debug(
                "completions::query",
                &format!("no table at {}", path.display()),
            );
            return Vec::new();
        }

        match CompletionFile::read(&path) {
            Ok(file) => file.completions,
            Err(e) => {
                eprintln!("⚠️  {:#}", e);
                Vec::new()
            }
        }
    }

    /// Without a prefix a divider heads each non-empty category; with one,
    /// labels carry the category suffix and are filtered by the prefix.
    fn append_category(&self, category: Category, prefix: &str, completions: &mut Vec<Completion>) {
        let entries = self.read_category(category);
        if entries.is_empty() {
            return;
        }

        if prefix.is_empty() {
            completions.push(Completion::new(divider(category), " "));
            completions.extend(entries);
        } else {
            completions.extend(filter_prefix(entries, prefix).into_iter().map(|c| Completion {
                label: format!("{}{}", c.label, category.label_suffix()),
                template: c.template,
            }));
        }
    }
}

/// `-------- classes -------`
pub fn divider(category: Category) -> String {
    format!("-------- {} -------", category.file_stem())
}

fn filter_prefix(completions: Vec<Completion>, prefix: &str) -> Vec<Completion> {
    if prefix.is_empty() {
        return completions;
    }
    let prefix = prefix.to_lowercase();
    completions
        .into_iter()
        .filter(|c| c.label.to_lowercase().starts_with(&prefix))
        .collect()
}
