//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

use crate::error::RouterError;

/// HTTP request methods, plus the `All` wildcard used at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// HEAD method
    Head,
    /// OPTIONS method
    Options,
    /// Matches every method.
    All,
}

impl Method {
    /// Every method except the `All` wildcard.
    pub const ALL_CONCRETE: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Returns the method as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::All => "ALL",
        }
    }

    /// Returns true if a route registered under `self` serves a request made
    /// with `requested`.
    #[must_use]
    pub fn accepts(self, requested: Self) -> bool {
        self == Self::All || self == requested
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(RouterError::InvalidMethod(
                "Unspecified request method".to_string(),
            ));
        }

        match token.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "ALL" => Ok(Self::All),
            _ => Err(RouterError::InvalidMethod(format!(
                "Unknown request method '{token}'"
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
