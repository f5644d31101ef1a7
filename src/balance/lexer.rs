//! Priority-ordered lexer for a single Objective-J line.
//!
//! Each rule splits only the text no earlier rule claimed, so `return` wins
//! over identifiers, strings win over selectors, and so on down to the
//! catch-all `unknown`.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Return,
    Nil,
    Control,
    AtString,
    Selector,
    Identifier,
    Bind,
    PostOp,
    At,
    Star,
    Close,
    Open,
    Operator,
    Terminator,
    Whitespace,
    Unknown,
}

impl TokenKind {
    /// Tokens the receiver parser never sees
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Terminator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset in the lexed text
    pub start: usize,
}

fn rules() -> &'static [(TokenKind, Regex)] {
    static RULES: OnceLock<Vec<(TokenKind, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (TokenKind::Return, r"\breturn\b"),
            (TokenKind::Nil, r"\bnil\b"),
            (TokenKind::Control, r"\b(?:if|while|for|do)\s*\("),
            (TokenKind::AtString, r#""(?:\\.|[^"\\])*""#),
            (TokenKind::Selector, r"\b[A-Za-z_0-9]+:"),
            (TokenKind::Identifier, r"\b[A-Za-z_0-9]+\b"),
            (TokenKind::Bind, r"->|\."),
            (TokenKind::PostOp, r"\+\+|--"),
            (TokenKind::At, r"@"),
            (TokenKind::Star, r"\*"),
            (TokenKind::Close, r"[)\]}]"),
            (TokenKind::Open, r"[(\[{]"),
            (TokenKind::Operator, r"[&'()*+/=%!:,?;<>|~^]"),
            (TokenKind::Terminator, r";\n*|\n+"),
            (TokenKind::Whitespace, r"\s+"),
            (TokenKind::Unknown, r"."),
        ]
        .into_iter()
        .map(|(kind, pattern)| {
            (
                kind,
                Regex::new(pattern).expect("Invalid objective-j token regex"),
            )
        })
        .collect()
    })
}

enum Segment<'a> {
    Unclaimed { start: usize, end: usize },
    Claimed(Token<'a>),
}

/// Lex `input` into tokens, trivia included, in source order.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut segments = vec![Segment::Unclaimed {
        start: 0,
        end: input.len(),
    }];

    for (kind, regex) in rules() {
        let mut next = Vec::with_capacity(segments.len());

        for segment in segments {
            let (start, end) = match segment {
                Segment::Unclaimed { start, end } => (start, end),
                claimed => {
                    next.push(claimed);
                    continue;
                }
            };

            let text = &input[start..end];
            let mut last = 0;
            for m in regex.find_iter(text) {
                if m.start() > last {
                    next.push(Segment::Unclaimed {
                        start: start + last,
                        end: start + m.start(),
                    });
                }
                next.push(Segment::Claimed(Token {
                    kind: *kind,
                    text: &input[start + m.start()..start + m.end()],
                    start: start + m.start(),
                }));
                last = m.end();
            }
            if last < text.len() {
                next.push(Segment::Unclaimed {
                    start: start + last,
                    end,
                });
            }
        }

        segments = next;
    }

    segments
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Claimed(token) => Some(token),
            Segment::Unclaimed { .. } => None,
        })
        .collect()
}

/// Lex `input`, dropping whitespace and terminators.
pub fn significant_tokens(input: &str) -> Vec<Token<'_>> {
    lex(input)
        .into_iter()
        .filter(|token| !token.kind.is_trivia())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, &str)> {
        significant_tokens(input)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_message_send() {
        assert_eq!(
            kinds("[self setValue:x]"),
            vec![
                (TokenKind::Open, "["),
                (TokenKind::Identifier, "self"),
                (TokenKind::Selector, "setValue:"),
                (TokenKind::Identifier, "x"),
                (TokenKind::Close, "]"),
            ]
        );
    }

    #[test]
    fn test_keywords_take_priority() {
        assert_eq!(
            kinds("return nil"),
            vec![(TokenKind::Return, "return"), (TokenKind::Nil, "nil")]
        );
        assert_eq!(
            kinds("if (x)"),
            vec![
                (TokenKind::Control, "if ("),
                (TokenKind::Identifier, "x"),
                (TokenKind::Close, ")"),
            ]
        );
    }

    #[test]
    fn test_strings_hide_selectors() {
        assert_eq!(
            kinds(r#"x = "a:b""#),
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::Operator, "="),
                (TokenKind::AtString, r#""a:b""#),
            ]
        );
    }

    #[test]
    fn test_offsets_are_byte_positions() {
        let tokens = significant_tokens("a.b++ * c");
        let starts: Vec<_> = tokens.iter().map(|t| (t.kind, t.start)).collect();
        assert_eq!(
            starts,
            vec![
                (TokenKind::Identifier, 0),
                (TokenKind::Bind, 1),
                (TokenKind::Identifier, 2),
                (TokenKind::PostOp, 3),
                (TokenKind::Star, 6),
                (TokenKind::Identifier, 8),
            ]
        );
    }

    #[test]
    fn test_minus_is_not_an_operator() {
        assert_eq!(
            kinds("a - b"),
            vec![
                (TokenKind::Identifier, "a"),
                (TokenKind::Unknown, "-"),
                (TokenKind::Identifier, "b"),
            ]
        );
    }
}
