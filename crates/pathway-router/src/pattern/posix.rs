//! POSIX-style class shorthands.
//!
//! A constraint body may use `:alpha:`, `:digit:`, `:alnum:`, `:xdigit:` and
//! `:ascii:` either on their own (`:alpha:+`) or inside a bracket expression
//! next to other class members (`[:digit::alpha:-_\+\.]+`). They are expanded
//! textually before the expression reaches the regex engine.

use crate::error::{Result, RouterError};

/// Shorthand name and the class members it stands for.
const CLASSES: &[(&str, &str)] = &[
    ("alpha", r"\p{L}"),
    ("digit", r"\p{Nd}"),
    ("alnum", r"\p{L}\p{Nd}"),
    ("xdigit", "0-9a-fA-F"),
    ("ascii", r"\x00-\x7F"),
];

fn class_items(name: &str) -> Option<&'static str> {
    CLASSES
        .iter()
        .find(|(class, _)| *class == name)
        .map(|(_, items)| *items)
}

/// Expands every known `:name:` shorthand in `body`.
///
/// Outside a bracket expression the shorthand becomes a full class
/// (`[\p{L}]`); inside one its members are spliced in place. A `-` right
/// after a spliced shorthand is escaped so it cannot form a range.
pub fn expand(pattern: &str, body: &str) -> Result<String> {
    let mut out = String::with_capacity(body.len() * 2);
    let mut depth = 0usize;
    let mut rest = body;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = rest.chars().next() {
                    out.push(escaped);
                    rest = &rest[escaped.len_utf8()..];
                }
            }
            '[' => {
                depth += 1;
                out.push(c);
                // `^` and a leading `]` are part of the class, not syntax.
                if let Some(tail) = rest.strip_prefix('^') {
                    out.push('^');
                    rest = tail;
                }
                if let Some(tail) = rest.strip_prefix(']') {
                    out.push(']');
                    rest = tail;
                }
            }
            ']' if depth > 0 => {
                depth -= 1;
                out.push(c);
            }
            ':' => match shorthand_at(rest) {
                Some((items, consumed)) => {
                    rest = &rest[consumed..];
                    if depth == 0 {
                        out.push('[');
                        out.push_str(items);
                        out.push(']');
                    } else {
                        out.push_str(items);
                        if let Some(tail) = rest.strip_prefix('-') {
                            out.push_str(r"\-");
                            rest = tail;
                        }
                    }
                }
                None => out.push(c),
            },
            _ => out.push(c),
        }
    }

    if depth > 0 {
        return Err(RouterError::compilation(
            pattern,
            format!("unclosed '[' in constraint '{body}'"),
        ));
    }

    Ok(out)
}

/// Matches `name:` at the start of `rest` (the opening `:` is already
/// consumed). Returns the class members and the bytes consumed.
fn shorthand_at(rest: &str) -> Option<(&'static str, usize)> {
    let end = rest.find(':')?;
    let name = &rest[..end];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    class_items(name).map(|items| (items, end + 1))
}
