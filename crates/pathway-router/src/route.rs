//! Route definitions, registered routes and match results.

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::params::PathParams;
use crate::pattern::PathPattern;

/// A route as written by the caller, not yet validated.
///
/// The handler is opaque to the router: it is stored, handed back with
/// matches, and never invoked.
#[derive(Debug, Clone)]
pub struct Route<H> {
    /// Method token, e.g. `"GET"` or `"ALL"`.
    method: String,
    /// Uri pattern.
    uri_pattern: String,
    /// Request handler.
    handler: H,
    /// Optional route name for reverse URL lookup.
    name: Option<String>,
}

impl<H> Route<H> {
    /// Creates a new route.
    pub fn new(method: impl Into<String>, uri_pattern: impl Into<String>, handler: H) -> Self {
        Self {
            method: method.into(),
            uri_pattern: uri_pattern.into(),
            handler,
            name: None,
        }
    }

    /// Sets the route name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The method token as given.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The uri pattern as given.
    #[must_use]
    pub fn uri_pattern(&self) -> &str {
        &self.uri_pattern
    }

    /// Validates the method and pattern and compiles the pattern.
    pub(crate) fn register(self, config: &RouterConfig) -> Result<RegisteredRoute<H>> {
        if self.uri_pattern.is_empty() {
            return Err(RouterError::InvalidPattern);
        }
        let method: Method = self.method.parse()?;
        let pattern = PathPattern::compile(&self.uri_pattern, config.optional_trailing_slash)?;

        Ok(RegisteredRoute {
            method,
            pattern,
            handler: self.handler,
            name: self.name,
        })
    }
}

/// A validated route held by a [`Router`](crate::Router).
///
/// Identity is the allocation: two routes with the same method and pattern
/// are still distinct, and removal compares `Arc` pointers.
#[derive(Debug)]
pub struct RegisteredRoute<H> {
    method: Method,
    pattern: PathPattern,
    handler: H,
    name: Option<String>,
}

impl<H> RegisteredRoute<H> {
    /// HTTP method, possibly [`Method::All`].
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// The original uri pattern.
    #[must_use]
    pub fn uri_pattern(&self) -> &str {
        self.pattern.pattern()
    }

    /// The compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The handler given at registration.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// The route name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A route that matched a request path, with its extracted parameters.
#[derive(Debug)]
pub struct RouteMatch<H> {
    route: Arc<RegisteredRoute<H>>,
    path_parameters: PathParams,
}

impl<H> RouteMatch<H> {
    pub(crate) const fn new(route: Arc<RegisteredRoute<H>>, path_parameters: PathParams) -> Self {
        Self {
            route,
            path_parameters,
        }
    }

    /// The matched route.
    #[must_use]
    pub const fn route(&self) -> &Arc<RegisteredRoute<H>> {
        &self.route
    }

    /// Parameters captured from the path, in pattern order.
    #[must_use]
    pub const fn path_parameters(&self) -> &PathParams {
        &self.path_parameters
    }

    /// Splits the match into route and parameters.
    #[must_use]
    pub fn into_parts(self) -> (Arc<RegisteredRoute<H>>, PathParams) {
        (self.route, self.path_parameters)
    }
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            path_parameters: self.path_parameters.clone(),
        }
    }
}

/// A group of routes with a common prefix.
#[derive(Debug, Clone)]
pub struct RouteGroup<H> {
    /// URL prefix for all routes in this group.
    prefix: String,
    /// Routes in this group.
    routes: Vec<Route<H>>,
}

impl<H> RouteGroup<H> {
    /// Creates a new route group with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            routes: Vec::new(),
        }
    }

    /// Adds a route with any method token.
    #[must_use]
    pub fn route(mut self, method: impl Into<String>, path: &str, handler: H) -> Self {
        let full_path = format!("{}{}", self.prefix, path);
        self.routes.push(Route::new(method, full_path, handler));
        self
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get(self, path: &str, handler: H) -> Self {
        self.route(Method::Get.as_str(), path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post(self, path: &str, handler: H) -> Self {
        self.route(Method::Post.as_str(), path, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put(self, path: &str, handler: H) -> Self {
        self.route(Method::Put.as_str(), path, handler)
    }

    /// Adds a PATCH route.
    #[must_use]
    pub fn patch(self, path: &str, handler: H) -> Self {
        self.route(Method::Patch.as_str(), path, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete(self, path: &str, handler: H) -> Self {
        self.route(Method::Delete.as_str(), path, handler)
    }

    /// Adds a route answering every method.
    #[must_use]
    pub fn all(self, path: &str, handler: H) -> Self {
        self.route(Method::All.as_str(), path, handler)
    }

    /// The group prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the routes in this group, prefix applied.
    #[must_use]
    pub fn into_routes(self) -> Vec<Route<H>> {
        self.routes
    }
}
