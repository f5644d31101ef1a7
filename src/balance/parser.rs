//! Finds where the receiver of a message send begins.
//!
//! Works backwards from the cursor over the significant tokens before it,
//! skipping balanced bracket groups, until it hits something that cannot
//! be part of a receiver expression.

use super::lexer::{Token, TokenKind};

/// Token kinds that can end a receiver expression.
const ENDINGS: [TokenKind; 4] = [
    TokenKind::Close,
    TokenKind::PostOp,
    TokenKind::AtString,
    TokenKind::Identifier,
];

/// Token kinds a receiver expression cannot extend past.
const OPENINGS: [TokenKind; 5] = [
    TokenKind::Operator,
    TokenKind::Selector,
    TokenKind::Open,
    TokenKind::Return,
    TokenKind::Control,
];

/// Where the receiver starts and whether a selector follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverPosition {
    /// Byte offset of the receiver's first token
    pub start: Option<usize>,
    /// A message (selector or bare method name) was already typed
    pub has_message: bool,
}

pub struct ReceiverParser<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> ReceiverParser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens }
    }

    /// Tokens not consumed by `locate`
    pub fn remaining(&self) -> &[Token<'a>] {
        &self.tokens
    }

    pub fn locate(&mut self) -> ReceiverPosition {
        let Some(last) = self.tokens.pop() else {
            return ReceiverPosition {
                start: None,
                has_message: false,
            };
        };

        // `receiver method` - an identifier following a complete expression
        let follows_expression = self
            .tokens
            .last()
            .is_some_and(|previous| ENDINGS.contains(&previous.kind));

        if last.kind == TokenKind::Identifier && follows_expression {
            return ReceiverPosition {
                start: self.find_object_start(),
                has_message: true,
            };
        }

        self.tokens.push(last);
        let has_message = self.skip_selectors();
        ReceiverPosition {
            start: self.find_object_start(),
            has_message,
        }
    }

    /// If the tail is `receiver key:arg ...`, leave only the receiver's tokens.
    fn skip_selectors(&mut self) -> bool {
        let saved = self.tokens.clone();

        if selector_loop(&mut self.tokens).is_some() {
            let mut internal = self.tokens.clone();
            while !internal.is_empty() {
                if selector_loop(&mut internal).is_none() {
                    return true;
                }
            }
        }

        self.tokens = saved;
        false
    }

    fn find_object_start(&mut self) -> Option<usize> {
        let mut start = None;

        loop {
            match self.tokens.last() {
                Some(next) if !OPENINGS.contains(&next.kind) => {}
                _ => break,
            }
            let Some(token) = self.tokens.pop() else {
                break;
            };

            match token.kind {
                TokenKind::Close => {
                    if let Some(open) = match_bracket(token.text, &mut self.tokens) {
                        start = Some(open);
                    }
                }
                TokenKind::Star => {
                    // `*` is a dereference only at the start of an expression
                    if self.star_is_prefix() {
                        start = Some(token.start);
                    } else {
                        return start;
                    }
                }
                TokenKind::Nil => start = None,
                _ => start = Some(token.start),
            }
        }

        start
    }

    fn star_is_prefix(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(previous) => {
                previous.kind == TokenKind::Star || OPENINGS.contains(&previous.kind)
            }
        }
    }
}

/// Pop back to the nearest selector outside any bracket group.
fn selector_loop<'a>(tokens: &mut Vec<Token<'a>>) -> Option<Token<'a>> {
    while let Some(token) = tokens.pop() {
        match token.kind {
            TokenKind::Selector => return Some(token),
            TokenKind::Close => {
                match_bracket(token.text, tokens)?;
            }
            TokenKind::Open => return None,
            _ => {}
        }
    }
    None
}

/// Pop back to the bracket opening `close`; returns its offset.
fn match_bracket(close: &str, tokens: &mut Vec<Token<'_>>) -> Option<usize> {
    let open = match close {
        "]" => "[",
        ")" => "(",
        "}" => "{",
        _ => return None,
    };
    let mut depth = 1;

    while let Some(token) = tokens.pop() {
        if token.text == close {
            depth += 1;
        } else if token.text == open {
            depth -= 1;
        }
        if depth == 0 {
            return Some(token.start);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::lexer::significant_tokens;

    fn locate(input: &str) -> (ReceiverPosition, usize) {
        let mut parser = ReceiverParser::new(significant_tokens(input));
        let position = parser.locate();
        (position, parser.remaining().len())
    }

    #[test]
    fn test_receiver_and_method() {
        let (position, _) = locate("x = foo bar");
        assert_eq!(position.start, Some(4));
        assert!(position.has_message);
    }

    #[test]
    fn test_receiver_only() {
        let (position, remaining) = locate("foo");
        assert_eq!(position.start, Some(0));
        assert!(!position.has_message);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_keyword_message_skips_arguments() {
        let (position, _) = locate("x = foo bar:baz");
        assert_eq!(position.start, Some(4));
        assert!(position.has_message);
    }

    #[test]
    fn test_bracket_group_receiver() {
        let (position, _) = locate("[[CPView alloc] init");
        // The inner message send is the receiver; it starts at its `[`
        assert_eq!(position.start, Some(1));
        assert!(position.has_message);
    }

    #[test]
    fn test_nil_is_not_a_receiver() {
        let (position, _) = locate("nil");
        assert_eq!(position.start, None);
    }

    #[test]
    fn test_empty() {
        let (position, _) = locate("");
        assert_eq!(position.start, None);
        assert!(!position.has_message);
    }
}
