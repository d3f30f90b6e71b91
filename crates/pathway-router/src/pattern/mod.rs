//! Path pattern compilation and matching.
//!
//! A pattern is literal regex text with `{name}` or `{name: body}`
//! placeholders:
//!
//! - `/contact/{id}` - `id` matches one or more characters other than `/`
//! - `/contact/{id: [0-9]+}` - `id` must satisfy the body
//! - `/user/{login: :alpha:+}` - POSIX shorthands, see [`posix`]
//! - `/public/{path: .*}` - a splat parameter spanning several segments
//! - `/customers/\d+` - a pattern without placeholders is a plain regex
//!
//! The compiled expression must cover the whole path: the pattern is wrapped
//! in a non-capturing group anchored at both ends, so a top-level `|` cannot
//! escape the anchors. At the end it accepts the empty remainder or a single
//! trailing `/`, unless the pattern already ends with `$`.

pub mod posix;
pub mod token;

use tracing::{debug, warn};

use crate::error::{Result, RouterError};
use crate::params::{PathParams, UriParams};

pub use token::Token;

/// Body used for a placeholder without a constraint.
pub const DEFAULT_PARAMETER_BODY: &str = "[^/]+";

/// The engine a pattern was compiled with.
#[derive(Debug, Clone)]
enum Matcher {
    /// Linear-time engine, used whenever it accepts the expression.
    Linear(regex::Regex),
    /// Backtracking engine for look-around and backreferences.
    Backtracking(fancy_regex::Regex),
}

/// A compiled path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Parsed tokens.
    tokens: Vec<Token>,
    /// The assembled regular expression.
    expression: String,
    /// Compiled matcher.
    matcher: Matcher,
    /// Parameter names in order.
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compiles a pattern that tolerates one trailing `/`.
    ///
    /// # Example
    ///
    /// ```
    /// use pathway_router::PathPattern;
    ///
    /// let pattern = PathPattern::new("/posts/{id: [0-9]+}/comments/{comment_id}").unwrap();
    /// let params = pattern.match_path("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// assert!(pattern.match_path("/posts/abc/comments/456").is_none());
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        Self::compile(pattern, true)
    }

    /// Compiles a pattern. With `optional_trailing_slash` off, a path must
    /// end exactly where the pattern does.
    pub fn compile(pattern: &str, optional_trailing_slash: bool) -> Result<Self> {
        if pattern.is_empty() {
            return Err(RouterError::InvalidPattern);
        }

        let tokens = token::tokenize(pattern)?;
        let mut expression = String::with_capacity(pattern.len());
        let mut param_names = Vec::new();

        for token in &tokens {
            match token {
                Token::Literal(text) => expression.push_str(text),
                Token::Parameter { name, constraint } => {
                    let body = match constraint {
                        Some(body) => posix::expand(pattern, body)?,
                        None => DEFAULT_PARAMETER_BODY.to_string(),
                    };
                    expression.push_str("(?P<");
                    expression.push_str(name);
                    expression.push('>');
                    expression.push_str(&body);
                    expression.push(')');
                    param_names.push(name.clone());
                }
            }
        }

        let expression = anchor(&expression, optional_trailing_slash);

        let matcher = match regex::Regex::new(&expression) {
            Ok(re) => Matcher::Linear(re),
            Err(linear_err) => match fancy_regex::Regex::new(&expression) {
                Ok(re) => {
                    debug!(pattern, "using backtracking engine");
                    Matcher::Backtracking(re)
                }
                Err(_) => {
                    return Err(RouterError::compilation(pattern, linear_err.to_string()));
                }
            },
        };

        debug!(pattern, expression = %expression, "compiled pattern");

        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
            expression,
            matcher,
            param_names,
        })
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns the declared parameters that took part in the match. Groups
    /// written as plain regex in the pattern are never reported.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        match &self.matcher {
            Matcher::Linear(re) => {
                let caps = re.captures(path)?;
                Some(self.collect(|name| caps.name(name).map(|m| m.as_str())))
            }
            Matcher::Backtracking(re) => match re.captures(path) {
                Ok(caps) => {
                    let caps = caps?;
                    Some(self.collect(|name| caps.name(name).map(|m| m.as_str())))
                }
                Err(err) => {
                    warn!(pattern = %self.pattern, path, error = %err, "match aborted");
                    None
                }
            },
        }
    }

    fn collect<'t>(&self, capture: impl Fn(&str) -> Option<&'t str>) -> PathParams {
        let mut params = PathParams::new();
        for name in &self.param_names {
            if let Some(value) = capture(name) {
                params.insert(name.clone(), value);
            }
        }
        params
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the assembled regular expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the parsed tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the parameter names.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Renders this pattern with the given values. See [`crate::uri::render`].
    pub fn reverse(&self, params: &UriParams) -> Result<String> {
        crate::uri::render_tokens(&self.pattern, &self.tokens, params)
    }
}

/// Wraps `body` so the whole path must match, whatever alternations it holds.
///
/// A leading `^` and a trailing unescaped `$` written in the pattern are
/// dropped and re-applied outside the group; an explicit `$` also turns off
/// the optional trailing `/`.
fn anchor(body: &str, optional_trailing_slash: bool) -> String {
    let body = body.strip_prefix('^').unwrap_or(body);
    let (body, explicit_end) = match body.strip_suffix('$') {
        Some(rest) if rest.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0 => {
            (rest, true)
        }
        _ => (body, false),
    };

    let tail = if optional_trailing_slash && !explicit_end {
        "/?$"
    } else {
        "$"
    };
    format!("^(?:{body}){tail}")
}
