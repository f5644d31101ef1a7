//! Bracket balancing for Objective-J message sends.
//!
//! Given the current line and the cursor column, produce the snippet that
//! replaces the line: either a plain `]` at the cursor, or the receiver
//! expression before the cursor wrapped in `[...]`. `$0` marks where the
//! cursor lands; text copied from the line is snippet-escaped.
//!
//! ```
//! use objj::balance::balance_line;
//!
//! assert_eq!(balance_line("view setFrame:aFrame", 20), "[view setFrame:aFrame]$0");
//! assert_eq!(balance_line("[view frame", 11), "[view frame]$0");
//! ```

pub mod lexer;
pub mod parser;

use regex::Regex;
use std::sync::OnceLock;

use parser::ReceiverParser;

/// Brackets outside of string literals.
fn bracket_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""(?:\\.|[^"\\])*"|\[|\]"#).expect("Invalid bracket regex")
    })
}

/// `[` count minus `]` count, ignoring brackets inside strings.
pub fn bracket_depth(line: &str) -> i64 {
    bracket_regex()
        .find_iter(line)
        .map(|m| match m.as_str() {
            "[" => 1,
            "]" => -1,
            _ => 0,
        })
        .sum()
}

/// Escape `$`, `` ` `` and `\` so text is inserted literally.
pub fn escape_snippet(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '$' | '`' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Snippet replacing `line` when `]` is typed with the cursor at `column`
/// (in characters, clamped to the line length).
pub fn balance_line(line: &str, column: usize) -> String {
    if column == 0 {
        return format!("]$0{}", escape_snippet(line));
    }

    let split = line
        .char_indices()
        .nth(column)
        .map(|(index, _)| index)
        .unwrap_or(line.len());
    let (head, rest) = line.split_at(split);

    // The character just before the cursor
    let Some((caret, caret_char)) = head.char_indices().next_back() else {
        return close_at_cursor(head, rest);
    };

    if bracket_depth(line) != 0 {
        return close_at_cursor(head, rest);
    }

    let tokens = lexer::significant_tokens(head);
    if tokens.is_empty() {
        return close_at_cursor(head, rest);
    }

    let mut parser = ReceiverParser::new(tokens);
    let position = parser.locate();

    // Typing over an existing `]` that closes nothing we'd wrap
    if let Some(after_close) = rest.strip_prefix(']') {
        let nothing_to_wrap = position.start.is_none()
            || parser
                .remaining()
                .last()
                .map_or(true, |token| token.text == "[");
        if nothing_to_wrap {
            return format!("{}]$0{}", escape_snippet(head), escape_snippet(after_close));
        }
    }

    match position.start {
        Some(start) if start < caret => {
            let close = if position.has_message {
                "]$0"
            } else if caret_char.is_whitespace() {
                "$0]"
            } else {
                " $0]"
            };
            format!(
                "{}[{}{}{}",
                escape_snippet(&line[..start]),
                escape_snippet(&head[start..]),
                close,
                escape_snippet(rest)
            )
        }
        _ => close_at_cursor(head, rest),
    }
}

fn close_at_cursor(head: &str, rest: &str) -> String {
    format!("{}]$0{}", escape_snippet(head), escape_snippet(rest))
}
