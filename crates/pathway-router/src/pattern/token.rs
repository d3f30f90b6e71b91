//! Pattern tokenizer.
//!
//! Splits a raw pattern into literal text and `{name}` / `{name: body}`
//! placeholders. Placeholder bodies may contain their own `{m,n}`
//! quantifiers, so the closing brace is found by depth counting.

use crate::error::{Result, RouterError};

/// A piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text copied into the expression as written.
    Literal(String),
    /// A named placeholder with an optional constraint body.
    Parameter {
        /// Parameter name.
        name: String,
        /// Regex body, `None` for a bare `{name}`.
        constraint: Option<String>,
    },
}

impl Token {
    /// Returns the parameter name, if this is a placeholder.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            Self::Parameter { name, .. } => Some(name),
            Self::Literal(_) => None,
        }
    }
}

/// Scans a pattern into tokens.
struct Tokenizer<'a> {
    /// The pattern being scanned.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// Literal text not yet emitted.
    literal: String,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            literal: String::new(),
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.tokens
                .push(Token::Literal(std::mem::take(&mut self.literal)));
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.advance() {
            match c {
                '\\' => {
                    self.literal.push(c);
                    if let Some(escaped) = self.advance() {
                        self.literal.push(escaped);
                    }
                }
                '{' => self.scan_brace_group()?,
                _ => self.literal.push(c),
            }
        }
        self.flush_literal();
        Ok(self.tokens)
    }

    /// Scans from just after an opening `{` up to its balanced `}`.
    fn scan_brace_group(&mut self) -> Result<()> {
        let open = self.pos - 1;
        let content_start = self.pos;
        let mut depth = 1usize;

        let content_end = loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('{') => depth += 1,
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        break self.pos - 1;
                    }
                }
                Some(_) => {}
                None => {
                    return Err(RouterError::compilation(
                        self.input,
                        format!("unclosed '{{' at byte {open}"),
                    ));
                }
            }
        };

        let input = self.input;
        let content = &input[content_start..content_end];
        if is_quantifier(content) {
            self.literal.push('{');
            self.literal.push_str(content);
            self.literal.push('}');
            return Ok(());
        }

        let token = self.parameter(content)?;
        self.flush_literal();
        self.tokens.push(token);
        Ok(())
    }

    fn parameter(&self, content: &str) -> Result<Token> {
        let (name, constraint) = match content.split_once(':') {
            Some((name, body)) => (name.trim(), Some(body.trim())),
            None => (content.trim(), None),
        };

        if name.is_empty() {
            return Err(RouterError::compilation(
                self.input,
                format!("empty parameter name in '{{{content}}}'"),
            ));
        }
        if !is_identifier(name) {
            return Err(RouterError::compilation(
                self.input,
                format!("invalid parameter name '{name}'"),
            ));
        }
        if self
            .tokens
            .iter()
            .any(|t| t.parameter_name() == Some(name))
        {
            return Err(RouterError::compilation(
                self.input,
                format!("duplicate parameter name '{name}'"),
            ));
        }

        Ok(Token::Parameter {
            name: name.to_string(),
            constraint: constraint
                .filter(|body| !body.is_empty())
                .map(str::to_string),
        })
    }
}

/// Tokenizes a route pattern.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>> {
    Tokenizer::new(pattern).run()
}

/// `n`, `n,` or `n,m`: brace content that is a regex repetition, not a name.
fn is_quantifier(content: &str) -> bool {
    let (min, max) = content.split_once(',').unwrap_or((content, ""));
    !min.is_empty()
        && min.chars().all(|c| c.is_ascii_digit())
        && max.chars().all(|c| c.is_ascii_digit())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, constraint: Option<&str>) -> Token {
        Token::Parameter {
            name: name.to_string(),
            constraint: constraint.map(str::to_string),
        }
    }

    #[test]
    fn test_literal_only() {
        let tokens = tokenize("/customers/\\d+").unwrap();
        assert_eq!(tokens, vec![Token::Literal("/customers/\\d+".to_string())]);
    }

    #[test]
    fn test_bare_and_constrained_parameters() {
        let tokens = tokenize("/contact/{id: [0-9]+}/something/{else}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("/contact/".to_string()),
                param("id", Some("[0-9]+")),
                Token::Literal("/something/".to_string()),
                param("else", None),
            ]
        );
    }

    #[test]
    fn test_nested_quantifier_braces() {
        let tokens = tokenize("/year/{year: [0-9]{4}}/{slug}").unwrap();
        assert_eq!(tokens[1], param("year", Some("[0-9]{4}")));
        assert_eq!(tokens[3], param("slug", None));
    }

    #[test]
    fn test_quantifier_in_literal_text() {
        let tokens = tokenize("/code/[A-Z]{2,3}/{id}").unwrap();
        assert_eq!(tokens[0], Token::Literal("/code/[A-Z]{2,3}/".to_string()));
        assert_eq!(tokens[1], param("id", None));
    }

    #[test]
    fn test_escaped_brace_is_literal() {
        let tokens = tokenize("/raw/\\{x\\}").unwrap();
        assert_eq!(tokens, vec![Token::Literal("/raw/\\{x\\}".to_string())]);
    }

    #[test]
    fn test_posix_body_keeps_colons() {
        let tokens = tokenize("/user/{login: :alpha:+}").unwrap();
        assert_eq!(tokens[1], param("login", Some(":alpha:+")));
    }

    #[test]
    fn test_empty_constraint_uses_default() {
        let tokens = tokenize("/a/{id:  }").unwrap();
        assert_eq!(tokens[1], param("id", None));
    }

    #[test]
    fn test_unclosed_brace() {
        let err = tokenize("/contact/{id").unwrap_err();
        assert!(err.to_string().contains("unclosed '{'"));
    }

    #[test]
    fn test_empty_name() {
        assert!(tokenize("/contact/{}").is_err());
        assert!(tokenize("/contact/{: [0-9]+}").is_err());
    }

    #[test]
    fn test_invalid_name() {
        let err = tokenize("/contact/{my-id}").unwrap_err();
        assert!(err.to_string().contains("invalid parameter name 'my-id'"));
    }

    #[test]
    fn test_duplicate_name() {
        let err = tokenize("/{id}/{id}").unwrap_err();
        assert!(err.to_string().contains("duplicate parameter name 'id'"));
    }
}
