//! Method signature normalization.
//!
//! A raw signature is everything after the return type on a method line,
//! e.g. `setValue:(id)aValue forKey:(CPString)aKey`. Normalizing it yields
//! the stripped key `setValue:forKey:` used for deduplication, and the
//! keyword/parameter pairs used to build an editable snippet.

use regex::Regex;
use std::sync::OnceLock;

/// `keyword:` followed by `(type)name`, with an optional `<Protocol>` on the type.
fn parameter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\w+:)(\(\w+(?: ?<\w+>)?\)\w+)").expect("Invalid parameter regex")
    })
}

/// Bare keyword labels.
fn keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+:").expect("Invalid keyword regex"))
}

/// One keyword of a multi-part selector with its parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Keyword label including the colon: `setValue:`
    pub keyword: String,
    /// Parameter type and name as written: `(id)aValue`
    pub declaration: String,
}

/// A normalized method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Keywords only (`setValue:forKey:`) or the bare selector (`init`)
    pub key: String,
    /// Keyword/parameter pairs; `None` for selectors without arguments
    pub parameters: Option<Vec<Parameter>>,
}

impl MethodSignature {
    /// Normalize a raw signature string.
    ///
    /// A selector without arguments is kept verbatim apart from trailing
    /// whitespace, so `init {` (brace on the declaration line) stays
    /// `init {`. Keyed selectors keep only their `word:` parts.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_end();

        if !raw.contains(':') {
            return Self {
                key: raw.to_string(),
                parameters: None,
            };
        }

        let key = keyword_regex()
            .find_iter(raw)
            .map(|m| m.as_str())
            .collect::<String>();

        let parameters = parameter_regex()
            .captures_iter(raw)
            .map(|cap| Parameter {
                keyword: cap[1].to_string(),
                declaration: cap[2].to_string(),
            })
            .collect();

        Self {
            key,
            parameters: Some(parameters),
        }
    }

    /// Snippet inserted on completion.
    ///
    /// Every parameter becomes its own placeholder, numbered left to right
    /// from 1, defaulting to the `(type)name` text as written. Falls back to the
    /// key when no parameter could be parsed.
    pub fn template(&self) -> String {
        match &self.parameters {
            Some(parameters) if !parameters.is_empty() => parameters
                .iter()
                .enumerate()
                .map(|(index, p)| format!("{}{}", p.keyword, placeholder(index + 1, &p.declaration)))
                .collect::<Vec<_>>()
                .join(" "),
            _ => self.key.clone(),
        }
    }
}

/// `${index:default}`
pub fn placeholder(index: usize, default: &str) -> String {
    format!("${{{}:{}}}", index, default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_argument_selector_passes_through() {
        let sig = MethodSignature::parse("defaultValue");
        assert_eq!(sig.key, "defaultValue");
        assert!(sig.parameters.is_none());
        assert_eq!(sig.template(), "defaultValue");
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let sig = MethodSignature::parse("init\r");
        assert_eq!(sig.key, "init");
    }

    #[test]
    fn test_no_argument_selector_keeps_rest_of_line() {
        let sig = MethodSignature::parse("init {");
        assert_eq!(sig.key, "init {");
        assert_eq!(sig.template(), "init {");
    }

    #[test]
    fn test_single_keyword() {
        let sig = MethodSignature::parse("setValue:(id)aValue");
        assert_eq!(sig.key, "setValue:");
        assert_eq!(sig.template(), "setValue:${1:(id)aValue}");
    }

    #[test]
    fn test_multi_keyword_numbers_left_to_right() {
        let sig = MethodSignature::parse("setValue:(id)aValue forKey:(CPString)aKey");
        assert_eq!(sig.key, "setValue:forKey:");

        let params = sig.parameters.as_ref().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].keyword, "forKey:");
        assert_eq!(params[1].declaration, "(CPString)aKey");

        assert_eq!(
            sig.template(),
            "setValue:${1:(id)aValue} forKey:${2:(CPString)aKey}"
        );
    }

    #[test]
    fn test_protocol_qualified_type() {
        let sig = MethodSignature::parse("setDelegate:(id <CPWindowDelegate>)aDelegate");
        assert_eq!(sig.key, "setDelegate:");
        assert_eq!(
            sig.template(),
            "setDelegate:${1:(id <CPWindowDelegate>)aDelegate}"
        );
    }

    #[test]
    fn test_unparseable_parameters_fall_back_to_key() {
        // Pointer types are not part of the parameter grammar
        let sig = MethodSignature::parse("getBytes:(void*)buffer");
        assert_eq!(sig.key, "getBytes:");
        assert_eq!(sig.parameters.as_ref().map(Vec::len), Some(0));
        assert_eq!(sig.template(), "getBytes:");
    }
}
