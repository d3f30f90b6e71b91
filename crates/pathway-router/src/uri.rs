//! Reverse routing: rendering a URI from a pattern and parameter values.

use crate::error::{Result, RouterError};
use crate::params::UriParams;
use crate::pattern::token::{self, Token};

/// Renders `pattern` with `params`.
///
/// Each placeholder is replaced by its value as-is, without percent-encoding,
/// so a value may carry `/` to fill a splat parameter. Values no placeholder
/// consumed are appended as a form-encoded query string in insertion order.
/// A placeholder without a value is an error.
///
/// Literal text is regex text, and only backslash-escaped punctuation is
/// unescaped when rendering. Any other regex syntax between placeholders,
/// such as an optional `(\.(json|xml))?` suffix, is copied into the URI as
/// written, so patterns meant for reverse routing should keep their literal
/// parts plain.
///
/// ```
/// use pathway_router::{uri, UriParams};
///
/// let params = UriParams::new()
///     .with("email", "test@test.com")
///     .with("id", 5)
///     .with("name", "Decebal Suiu");
/// let uri = uri::render("/user/{email}/{id: .*}", &params).unwrap();
/// assert_eq!(uri, "/user/test@test.com/5?name=Decebal+Suiu");
/// ```
pub fn render(pattern: &str, params: &UriParams) -> Result<String> {
    if pattern.is_empty() {
        return Err(RouterError::InvalidPattern);
    }
    let tokens = token::tokenize(pattern)?;
    render_tokens(pattern, &tokens, params)
}

pub(crate) fn render_tokens(pattern: &str, tokens: &[Token], params: &UriParams) -> Result<String> {
    let mut uri = String::with_capacity(pattern.len());
    let mut consumed: Vec<&str> = Vec::new();

    for token in tokens {
        match token {
            Token::Literal(text) => push_unescaped(&mut uri, text),
            Token::Parameter { name, .. } => {
                let value =
                    params
                        .get(name)
                        .ok_or_else(|| RouterError::UnresolvedParameter {
                            pattern: pattern.to_string(),
                            name: name.clone(),
                        })?;
                uri.push_str(value);
                consumed.push(name);
            }
        }
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut has_query = false;
    for (key, value) in params.iter().filter(|(key, _)| !consumed.contains(key)) {
        query.append_pair(key, value);
        has_query = true;
    }
    if has_query {
        uri.push('?');
        uri.push_str(&query.finish());
    }

    Ok(uri)
}

/// Copies literal pattern text, dropping the backslash from escaped
/// punctuation (`\.` renders as `.`).
fn push_unescaped(out: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek().is_some_and(char::is_ascii_punctuation) {
            continue;
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_raw_values() {
        let params = UriParams::new().with("repo", "test/myrepo").with("id", 5);
        let uri = render("/repository/{repo: .*}/ticket/{id: .*}", &params).unwrap();
        assert_eq!(uri, "/repository/test/myrepo/ticket/5");
    }

    #[test]
    fn test_extra_params_become_query() {
        let params = UriParams::new()
            .with("email", "test@test.com")
            .with("id", 5)
            .with("query", "recent_changes");
        let uri = render("/user/{email}/{id: .*}", &params).unwrap();
        assert_eq!(uri, "/user/test@test.com/5?query=recent_changes");
    }

    #[test]
    fn test_query_order_and_encoding() {
        let params = UriParams::new()
            .with("q", "a b&c")
            .with("id", 1)
            .with("mail", "x@y.z");
        let uri = render("/item/{id}", &params).unwrap();
        assert_eq!(uri, "/item/1?q=a+b%26c&mail=x%40y.z");
    }

    #[test]
    fn test_no_params() {
        assert_eq!(render("/contact", &UriParams::new()).unwrap(), "/contact");
    }

    #[test]
    fn test_escaped_literal_rendered_plain() {
        let params = UriParams::new().with("id", 7);
        assert_eq!(render(r"/feed/{id}\.xml", &params).unwrap(), "/feed/7.xml");
    }

    #[test]
    fn test_regex_syntax_in_literal_is_copied() {
        let params = UriParams::new().with("id", 5);
        let uri = render(r"/api/contact/{id: [0-9]+}(\.(json|xml|yaml))?", &params).unwrap();
        assert_eq!(uri, "/api/contact/5(.(json|xml|yaml))?");
    }

    #[test]
    fn test_missing_value() {
        let err = render("/user/{email}", &UriParams::new()).unwrap_err();
        assert_eq!(
            err,
            RouterError::UnresolvedParameter {
                pattern: "/user/{email}".to_string(),
                name: "email".to_string(),
            }
        );
    }
}
