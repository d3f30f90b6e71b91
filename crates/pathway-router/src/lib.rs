//! # pathway-router
//!
//! URI template compilation, route matching and reverse routing.
//!
//! This crate provides:
//! - Path patterns with `{name}` and `{name: regex}` placeholders
//! - POSIX-style class shorthands such as `:alpha:` and `:digit:`
//! - Raw regular expression routes, including look-ahead exclusions
//! - HTTP method-based lookup with an `ALL` wildcard
//! - Reverse routing with query strings for leftover parameters
//! - Named routes and route groups with prefixes
//!
//! The router never inspects or calls handlers. It only stores them and
//! returns them with every [`RouteMatch`].
//!
//! ## Quick Start
//!
//! ```
//! use pathway_router::{Method, Router};
//!
//! let router = Router::new();
//! router.get("/", "home").unwrap();
//! router.get("/users/{id: :digit:+}", "user").unwrap();
//! router.all("/public/{path: .*}", "assets").unwrap();
//!
//! let matches = router.find_routes("/users/123", Method::Get);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].path_parameters().get("id"), Some("123"));
//!
//! let matches = router.find_routes("/public/css/app.css", Method::Head);
//! assert_eq!(matches[0].path_parameters().get("path"), Some("css/app.css"));
//! ```
//!
//! ## Every match, not just the first
//!
//! [`Router::find_routes`] reports all matching routes in registration
//! order, so a catch-all filter and a specific route can both apply:
//!
//! ```
//! use pathway_router::{Method, Router};
//!
//! let router = Router::new();
//! router.all("^(?!/(webjars|public)/).*", "filter").unwrap();
//! router.get("/contact/{id}", "contact").unwrap();
//!
//! let handlers: Vec<_> = router
//!     .find_routes("/contact/3", Method::Get)
//!     .iter()
//!     .map(|m| *m.route().handler())
//!     .collect();
//! assert_eq!(handlers, ["filter", "contact"]);
//! ```
//!
//! ## Reverse Routing
//!
//! ```
//! use pathway_router::{Router, UriParams};
//!
//! let router: Router<()> = Router::new();
//! let params = UriParams::new()
//!     .with("email", "test@test.com")
//!     .with("id", 5)
//!     .with("query", "recent_changes");
//! let uri = router.uri_for("/user/{email}/{id: .*}", &params).unwrap();
//! assert_eq!(uri, "/user/test@test.com/5?query=recent_changes");
//! ```

mod config;
mod error;
mod method;
mod params;
pub mod pattern;
mod route;
mod router;
pub mod uri;

pub use config::RouterConfig;
pub use error::{Result, RouterError};
pub use method::Method;
pub use params::{PathParams, UriParams};
pub use pattern::PathPattern;
pub use route::{RegisteredRoute, Route, RouteGroup, RouteMatch};
pub use router::Router;
