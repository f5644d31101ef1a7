//! Declaration extraction from Objective-J source text.
//!
//! Pure text in, declarations out. Regex based, in the same spirit as the
//! conventional-commit parser: no AST, no preprocessing, line-anchored
//! patterns compiled once.

use regex::Regex;
use std::sync::OnceLock;

use super::signature::{placeholder, MethodSignature};

/// Prefix marking private classes and methods.
const PRIVATE_PREFIX: char = '_';

/// `@implementation Name [(Category) | : Superclass [<Protocols>]] body @end`
///
/// Groups: name, category (optional), superclass (optional), body
fn implementation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ms)^@implementation\s+(\w+)(?:\s*(?:\((\w+)\)|:\s*(\w+)(?:\s*<.+?>)?))?(.*?)^@end",
        )
        .expect("Invalid implementation regex")
    })
}

/// `- (type)selector rest-of-line` / `+ (type)selector rest-of-line`
///
/// Groups: kind, first selector component, remainder
fn method_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^([-+])\s*\(\w+\)(\w+)(.*)$").expect("Invalid method regex")
    })
}

/// `function CPName(args)` or `_function(CPName(args)`
fn function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^(?:function |_function\()(C[AGP]\w+)\((.*?)\)")
            .expect("Invalid function regex")
    })
}

/// Top-level `Name = value;`
fn constant_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^([A-Z]\w+)\s*=\s*.+;").expect("Invalid constant regex"))
}

fn argument_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*").expect("Invalid argument separator regex"))
}

/// Class (`+`) or instance (`-`) method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Class,
    Instance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub kind: MethodKind,
    pub signature: MethodSignature,
}

/// One `@implementation ... @end` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub name: String,
    /// Present only for `@implementation Name : Superclass`
    pub superclass: Option<String>,
    /// Present only for `@implementation Name (Category)`
    pub category: Option<String>,
    pub methods: Vec<MethodDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<String>,
}

impl FunctionDeclaration {
    /// `Name(${1:a}, ${2:b})`
    pub fn template(&self) -> String {
        let args = self
            .parameters
            .iter()
            .enumerate()
            .map(|(index, name)| placeholder(index + 1, name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, args)
    }

    /// Display label: `Name()`
    pub fn label(&self) -> String {
        format!("{}()", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDeclaration {
    pub name: String,
}

/// Everything extracted from one source file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDeclarations {
    pub classes: Vec<ClassDeclaration>,
    pub functions: Vec<FunctionDeclaration>,
    pub constants: Vec<ConstantDeclaration>,
}

/// Extract all declarations from a file's text.
pub fn extract(source: &str) -> SourceDeclarations {
    SourceDeclarations {
        classes: extract_classes(source),
        functions: extract_functions(source),
        constants: extract_constants(source),
    }
}

/// Extract `@implementation` blocks, skipping private (`_`) classes.
pub fn extract_classes(source: &str) -> Vec<ClassDeclaration> {
    implementation_regex()
        .captures_iter(source)
        .filter(|cap| !cap[1].starts_with(PRIVATE_PREFIX))
        .map(|cap| {
            let category = cap.get(2).map(|m| m.as_str().to_string());
            let superclass = cap.get(3).map(|m| m.as_str().to_string());
            let body = cap.get(4).map(|m| m.as_str()).unwrap_or("");

            ClassDeclaration {
                name: cap[1].to_string(),
                superclass,
                category,
                methods: extract_methods(body),
            }
        })
        .collect()
}

/// Extract method declarations from an implementation body.
///
/// Lines whose selector starts with `_` are private and skipped.
pub fn extract_methods(body: &str) -> Vec<MethodDeclaration> {
    method_regex()
        .captures_iter(body)
        .filter(|cap| !cap[2].starts_with(PRIVATE_PREFIX))
        .map(|cap| {
            let kind = if &cap[1] == "+" {
                MethodKind::Class
            } else {
                MethodKind::Instance
            };
            let raw = format!("{}{}", &cap[2], &cap[3]);

            MethodDeclaration {
                kind,
                signature: MethodSignature::parse(&raw),
            }
        })
        .collect()
}

/// Extract free functions declared at the start of a line.
pub fn extract_functions(source: &str) -> Vec<FunctionDeclaration> {
    function_regex()
        .captures_iter(source)
        .map(|cap| {
            let args = cap[2].trim();
            let parameters = if args.is_empty() {
                Vec::new()
            } else {
                argument_separator_regex()
                    .split(args)
                    .map(str::to_string)
                    .collect()
            };

            FunctionDeclaration {
                name: cap[1].to_string(),
                parameters,
            }
        })
        .collect()
}

/// Extract top-level constant assignments (name only).
pub fn extract_constants(source: &str) -> Vec<ConstantDeclaration> {
    constant_regex()
        .captures_iter(source)
        .map(|cap| ConstantDeclaration {
            name: cap[1].to_string(),
        })
        .collect()
}
