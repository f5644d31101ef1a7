//! Documentation lookup for the symbol under the cursor.
//!
//! The caller says what kind of syntax the cursor is in; this module works
//! out the search term, maps Cappuccino names to their Cocoa equivalents
//! (`CPView` -> `NSView`, `CPCib` -> `NSNib`) and hands the term to a
//! documentation browser.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::io::Write;
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::diagnostics::log_debug;

/// `@implementation Name [: Superclass]`
fn implementation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*@implementation\s+(\w+)(?:\s*:\s*(\w+))?")
            .expect("Invalid implementation declaration regex")
    })
}

/// First selector part of a method definition line, then every later keyword.
fn selector_part_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^[-+]\s*\(\w+\)(\w+:?))|(\w+:)").expect("Invalid selector part regex")
    })
}

fn cappuccino_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bCP(\w)").expect("Invalid Cappuccino prefix regex"))
}

/// Syntax the cursor is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolScope {
    /// `@implementation CPFoo : CPBar` line
    ImplementationDeclaration,
    /// Function call or message send
    Call,
    /// `- (type)selector:...` definition line
    MethodDefinition,
    /// A Cappuccino class name
    SupportClass,
    /// Anything else
    Other,
}

impl FromStr for SymbolScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "implementation" => Ok(Self::ImplementationDeclaration),
            "call" => Ok(Self::Call),
            "method" => Ok(Self::MethodDefinition),
            "class" => Ok(Self::SupportClass),
            "other" => Ok(Self::Other),
            other => bail!(
                "Unknown scope '{}' (expected implementation, call, method, class or other)",
                other
            ),
        }
    }
}

/// Documentation browsers symbols can be looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    Ingredients,
}

impl FromStr for LookupTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ingredients" => Ok(Self::Ingredients),
            other => bail!("Unknown lookup target '{}' (expected ingredients)", other),
        }
    }
}

impl LookupTarget {
    /// AppleScript that searches for `term` in the target
    pub fn script(self, term: &str) -> String {
        let quoted = term.replace('\\', "\\\\").replace('"', "\\\"");
        match self {
            LookupTarget::Ingredients => format!(
                "tell application \"Ingredients\"\n    search front window query \"{}\"\n    activate\nend tell\n",
                quoted
            ),
        }
    }
}

/// Raw search text for the cursor context, before Cocoa renaming.
///
/// `line` is the full cursor line; `word` is the word under the cursor.
pub fn search_text(scope: SymbolScope, line: &str, word: &str) -> Result<String> {
    let text = match scope {
        SymbolScope::ImplementationDeclaration => {
            let Some(cap) = implementation_regex().captures(line) else {
                bail!("This is not a well-formed class declaration.");
            };
            let class_name = &cap[1];
            let superclass = cap.get(2).map(|m| m.as_str());

            if class_name.starts_with("CP") {
                class_name.to_string()
            } else if let Some(superclass) = superclass.filter(|s| s.starts_with("CP")) {
                superclass.to_string()
            } else {
                bail!("Neither class is a Cappuccino class, no documentation is available.");
            }
        }
        SymbolScope::MethodDefinition => selector_part_regex()
            .captures_iter(line)
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
            .map(|m| m.as_str())
            .collect(),
        SymbolScope::Call | SymbolScope::SupportClass => word.trim().to_string(),
        SymbolScope::Other => String::new(),
    };

    if text.is_empty() {
        bail!("You are not within a method definition or invocation.");
    }
    Ok(text)
}

/// Map Cappuccino names to Cocoa documentation names.
pub fn documentation_term(text: &str) -> String {
    cappuccino_prefix_regex()
        .replace_all(text, "NS$1")
        .replace("Cib", "Nib")
}

/// Search term for the cursor context, ready to send to a target.
pub fn resolve(scope: SymbolScope, line: &str, word: &str) -> Result<String> {
    Ok(documentation_term(&search_text(scope, line, word)?))
}

/// Run the target's search for `term`.
pub fn open_in(target: LookupTarget, term: &str) -> Result<()> {
    let osascript = which::which("osascript")
        .context("Symbol lookup needs osascript (macOS only)")?;
    let script = target.script(term);
    log_debug("lookup", &format!("{} <<< {}", osascript.display(), script.trim_end()));

    let mut child = Command::new(&osascript)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start {}", osascript.display()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(script.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        bail!("osascript exited with {}", status);
    }
    Ok(())
}
