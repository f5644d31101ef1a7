//! In-memory symbol tables accumulated over one generation run.
//!
//! Maps are ordered so that the completion lists built from them, and so the
//! files written from those lists, are identical across runs.

use std::collections::{BTreeMap, BTreeSet};

use super::extractor::{MethodKind, SourceDeclarations};
use super::format::{sort_completions, Completion};
use super::signature::MethodSignature;

/// Class methods and superclass for one class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassTable {
    /// Empty when the class has no recorded superclass
    pub superclass: String,
    pub completions: Vec<Completion>,
}

#[derive(Debug, Default)]
pub struct SymbolTables {
    class_names: BTreeSet<String>,
    inheritance: BTreeMap<String, String>,
    /// Class name -> stripped signature -> signature; last write wins per key
    class_methods: BTreeMap<String, BTreeMap<String, MethodSignature>>,
    /// Keyed by stripped signature across ALL classes; last write wins
    instance_methods: BTreeMap<String, MethodSignature>,
    /// Keyed by function name; last write wins
    functions: BTreeMap<String, String>,
    constants: BTreeSet<String>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's declarations.
    ///
    /// Categories contribute methods but never an inheritance edge.
    pub fn merge(&mut self, declarations: SourceDeclarations) {
        for class in declarations.classes {
            self.class_names.insert(class.name.clone());

            if class.category.is_none() {
                if let Some(superclass) = class.superclass {
                    self.inheritance.insert(class.name.clone(), superclass);
                }
            }

            for method in class.methods {
                match method.kind {
                    MethodKind::Class => {
                        self.class_methods
                            .entry(class.name.clone())
                            .or_default()
                            .insert(method.signature.key.clone(), method.signature);
                    }
                    MethodKind::Instance => {
                        self.instance_methods
                            .insert(method.signature.key.clone(), method.signature);
                    }
                }
            }
        }

        for function in declarations.functions {
            self.functions.insert(function.name.clone(), function.template());
        }

        for constant in declarations.constants {
            self.constants.insert(constant.name);
        }
    }

    /// Known class names in byte order
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.class_names.iter().map(String::as_str)
    }

    pub fn superclass_of(&self, class_name: &str) -> Option<&str> {
        self.inheritance.get(class_name).map(String::as_str)
    }

    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }

    pub fn instance_method_count(&self) -> usize {
        self.instance_methods.len()
    }

    pub fn class_method_count(&self) -> usize {
        self.class_methods.values().map(BTreeMap::len).sum()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    pub fn classes(&self) -> Vec<Completion> {
        sorted(self.class_names.iter().map(Completion::plain).collect())
    }

    pub fn instance_methods(&self) -> Vec<Completion> {
        sorted(
            self.instance_methods
                .iter()
                .map(|(key, signature)| Completion::new(key, signature.template()))
                .collect(),
        )
    }

    pub fn functions(&self) -> Vec<Completion> {
        sorted(
            self.functions
                .iter()
                .map(|(name, template)| Completion::new(format!("{}()", name), template))
                .collect(),
        )
    }

    pub fn constants(&self) -> Vec<Completion> {
        sorted(self.constants.iter().map(Completion::plain).collect())
    }

    /// Class-method table for a class, one entry per stripped signature
    pub fn class_table(&self, class_name: &str) -> ClassTable {
        let completions = self
            .class_methods
            .get(class_name)
            .map(|methods| {
                methods
                    .values()
                    .map(|signature| Completion::new(&signature.key, signature.template()))
                    .collect()
            })
            .unwrap_or_default();

        ClassTable {
            superclass: self.superclass_of(class_name).unwrap_or("").to_string(),
            completions: sorted(completions),
        }
    }
}

fn sorted(mut completions: Vec<Completion>) -> Vec<Completion> {
    sort_completions(&mut completions);
    completions
}
