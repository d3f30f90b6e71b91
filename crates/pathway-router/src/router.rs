//! The route registry.
//!
//! Routes live in an immutable [`RouteTable`] snapshot behind a read-write
//! lock. Lookups clone the current snapshot's `Arc` and release the lock
//! before matching; writes build a new table and swap it in whole, so a
//! lookup never sees a half-applied add or remove.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::params::UriParams;
use crate::route::{RegisteredRoute, Route, RouteGroup, RouteMatch};
use crate::uri;

type RouteRef<H> = Arc<RegisteredRoute<H>>;

/// One immutable view of the registered routes.
struct RouteTable<H> {
    /// Every route in registration order.
    routes: Vec<RouteRef<H>>,
    /// Routes grouped by the method they were registered under.
    by_method: HashMap<Method, Vec<RouteRef<H>>>,
    /// Lookup candidates per requested method: its own routes and the
    /// `All` routes, interleaved in registration order.
    candidates: HashMap<Method, Vec<RouteRef<H>>>,
}

impl<H> RouteTable<H> {
    fn new(routes: Vec<RouteRef<H>>) -> Self {
        let mut by_method: HashMap<Method, Vec<RouteRef<H>>> = HashMap::new();
        let mut candidates: HashMap<Method, Vec<RouteRef<H>>> = HashMap::new();

        for route in &routes {
            let method = route.method();
            by_method.entry(method).or_default().push(Arc::clone(route));

            if method == Method::All {
                for requested in Method::ALL_CONCRETE.into_iter().chain([Method::All]) {
                    candidates
                        .entry(requested)
                        .or_default()
                        .push(Arc::clone(route));
                }
            } else {
                candidates.entry(method).or_default().push(Arc::clone(route));
            }
        }

        Self {
            routes,
            by_method,
            candidates,
        }
    }
}

/// Registry of routes with lookup and reverse routing.
///
/// `H` is the handler type. The router stores it and hands it back with
/// matches; dispatching is up to the caller.
///
/// ```
/// use pathway_router::{Method, Router, UriParams};
///
/// let router = Router::new();
/// router.get("/contact/{id: [0-9]+}", "show_contact").unwrap();
///
/// let matches = router.find_routes("/contact/3", Method::Get);
/// assert_eq!(matches.len(), 1);
/// assert_eq!(*matches[0].route().handler(), "show_contact");
/// assert_eq!(matches[0].path_parameters().get("id"), Some("3"));
///
/// let uri = router
///     .uri_for("/contact/{id: [0-9]+}", &UriParams::new().with("id", 3))
///     .unwrap();
/// assert_eq!(uri, "/contact/3");
/// ```
pub struct Router<H> {
    config: RouterConfig,
    table: RwLock<Arc<RouteTable<H>>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Creates a new empty router with the given configuration.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            table: RwLock::new(Arc::new(RouteTable::new(Vec::new()))),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn snapshot(&self) -> Arc<RouteTable<H>> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&table)
    }

    /// Applies `change` to a copy of the route list and swaps the result in.
    fn update<R>(&self, change: impl FnOnce(&mut Vec<RouteRef<H>>) -> R) -> R {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        let mut routes = table.routes.clone();
        let result = change(&mut routes);
        *table = Arc::new(RouteTable::new(routes));
        result
    }

    /// Validates, compiles and appends a route.
    ///
    /// Fails without touching the registry if the method is empty or unknown,
    /// the pattern is empty, or the pattern does not compile.
    pub fn add_route(&self, route: Route<H>) -> Result<RouteRef<H>> {
        let registered = Arc::new(route.register(&self.config)?);
        debug!(
            method = %registered.method(),
            pattern = registered.uri_pattern(),
            "adding route"
        );
        self.update(|routes| routes.push(Arc::clone(&registered)));
        Ok(registered)
    }

    /// Adds a route with any method token.
    pub fn add(
        &self,
        method: impl Into<String>,
        uri_pattern: impl Into<String>,
        handler: H,
    ) -> Result<RouteRef<H>> {
        self.add_route(Route::new(method, uri_pattern, handler))
    }

    /// Adds a GET route.
    pub fn get(&self, uri_pattern: &str, handler: H) -> Result<RouteRef<H>> {
        self.add(Method::Get.as_str(), uri_pattern, handler)
    }

    /// Adds a POST route.
    pub fn post(&self, uri_pattern: &str, handler: H) -> Result<RouteRef<H>> {
        self.add(Method::Post.as_str(), uri_pattern, handler)
    }

    /// Adds a PUT route.
    pub fn put(&self, uri_pattern: &str, handler: H) -> Result<RouteRef<H>> {
        self.add(Method::Put.as_str(), uri_pattern, handler)
    }

    /// Adds a PATCH route.
    pub fn patch(&self, uri_pattern: &str, handler: H) -> Result<RouteRef<H>> {
        self.add(Method::Patch.as_str(), uri_pattern, handler)
    }

    /// Adds a DELETE route.
    pub fn delete(&self, uri_pattern: &str, handler: H) -> Result<RouteRef<H>> {
        self.add(Method::Delete.as_str(), uri_pattern, handler)
    }

    /// Adds a route answering every method.
    pub fn all(&self, uri_pattern: &str, handler: H) -> Result<RouteRef<H>> {
        self.add(Method::All.as_str(), uri_pattern, handler)
    }

    /// Adds every route of a group, or none of them if one is invalid.
    pub fn add_group(&self, group: RouteGroup<H>) -> Result<Vec<RouteRef<H>>> {
        let registered = group
            .into_routes()
            .into_iter()
            .map(|route| route.register(&self.config).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = registered.len(), "adding route group");
        self.update(|routes| routes.extend(registered.iter().map(Arc::clone)));
        Ok(registered)
    }

    /// Removes a route by identity. Returns false if it was not registered.
    pub fn remove_route(&self, route: &RouteRef<H>) -> bool {
        let removed = self.update(|routes| {
            let before = routes.len();
            routes.retain(|r| !Arc::ptr_eq(r, route));
            routes.len() != before
        });
        if removed {
            debug!(
                method = %route.method(),
                pattern = route.uri_pattern(),
                "removed route"
            );
        }
        removed
    }

    /// Removes every route.
    pub fn clear(&self) {
        self.update(Vec::clear);
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> Vec<RouteRef<H>> {
        self.snapshot().routes.clone()
    }

    /// Routes registered under exactly `method`, in registration order.
    #[must_use]
    pub fn routes_for(&self, method: Method) -> Vec<RouteRef<H>> {
        self.snapshot()
            .by_method
            .get(&method)
            .cloned()
            .unwrap_or_default()
    }

    /// The first route registered under `name`.
    #[must_use]
    pub fn route_by_name(&self, name: &str) -> Option<RouteRef<H>> {
        self.snapshot()
            .routes
            .iter()
            .find(|r| r.name() == Some(name))
            .cloned()
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().routes.len()
    }

    /// Returns true if no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().routes.is_empty()
    }

    /// Finds every route matching `path` for `method`, in registration order.
    ///
    /// Routes registered under [`Method::All`] take part in every lookup. The
    /// path is matched as given, without percent-decoding.
    #[must_use]
    pub fn find_routes(&self, path: &str, method: Method) -> Vec<RouteMatch<H>> {
        let table = self.snapshot();
        let Some(candidates) = table.candidates.get(&method) else {
            debug!(%method, path, "no routes for method");
            return Vec::new();
        };

        let matches: Vec<RouteMatch<H>> = candidates
            .iter()
            .filter_map(|route| {
                let params = route.pattern().match_path(path);
                trace!(
                    pattern = route.uri_pattern(),
                    path,
                    matched = params.is_some(),
                    "evaluated route"
                );
                params.map(|params| RouteMatch::new(Arc::clone(route), params))
            })
            .collect();

        debug!(%method, path, count = matches.len(), "found routes");
        matches
    }

    /// Renders `pattern` with `params`, prefixed with the context path.
    ///
    /// See [`uri::render`] for the substitution rules.
    pub fn uri_for(&self, pattern: &str, params: &UriParams) -> Result<String> {
        let rendered = uri::render(pattern, params)?;
        Ok(self.with_context_path(&rendered))
    }

    /// Renders the pattern of the route registered under `name`.
    pub fn uri_for_name(&self, name: &str, params: &UriParams) -> Result<String> {
        let route = self
            .route_by_name(name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;
        let rendered = route.pattern().reverse(params)?;
        Ok(self.with_context_path(&rendered))
    }

    fn with_context_path(&self, uri: &str) -> String {
        let mut prefixed = self.config.normalized_context_path();
        prefixed.push_str(uri);
        prefixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_routing() {
        let router = Router::new();
        router.get("/", "home").unwrap();
        router.get("/users/{id}", "user").unwrap();

        let matches = router.find_routes("/users/123", Method::Get);
        assert_eq!(matches.len(), 1);
        assert_eq!(*matches[0].route().handler(), "user");
        assert_eq!(matches[0].path_parameters().get("id"), Some("123"));
    }

    #[test]
    fn test_not_found_is_empty() {
        let router = Router::new();
        router.get("/", "home").unwrap();
        assert!(router.find_routes("/nonexistent", Method::Get).is_empty());
    }

    #[test]
    fn test_wrong_method_is_empty() {
        let router = Router::new();
        router.get("/", "home").unwrap();
        assert!(router.find_routes("/", Method::Post).is_empty());
    }

    #[test]
    fn test_failed_add_leaves_registry_untouched() {
        let router = Router::new();
        router.get("/a", 1).unwrap();
        assert!(router.get("/b/{id", 2).is_err());
        assert!(router.add("", "/c", 3).is_err());
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_all_routes_interleave_in_order() {
        let router = Router::new();
        router.get("/.*", "first").unwrap();
        router.all("/.*", "second").unwrap();
        router.get("/.*", "third").unwrap();
        router.post("/.*", "other").unwrap();

        let handlers: Vec<_> = router
            .find_routes("/x", Method::Get)
            .iter()
            .map(|m| *m.route().handler())
            .collect();
        assert_eq!(handlers, vec!["first", "second", "third"]);

        assert_eq!(router.routes_for(Method::Get).len(), 2);
        assert_eq!(router.routes_for(Method::All).len(), 1);
    }

    #[test]
    fn test_snapshot_not_aliased() {
        let router = Router::new();
        let route = router.get("/a", 1).unwrap();
        let before = router.routes();
        router.get("/b", 2).unwrap();
        router.remove_route(&route);

        assert_eq!(before.len(), 1);
        assert!(Arc::ptr_eq(&before[0], &route));
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_remove_by_identity() {
        let router = Router::new();
        let first = router.get("/same", 1).unwrap();
        let second = router.get("/same", 2).unwrap();

        assert!(router.remove_route(&first));
        assert!(!router.remove_route(&first));

        let routes = router.routes();
        assert_eq!(routes.len(), 1);
        assert!(Arc::ptr_eq(&routes[0], &second));
    }

    #[test]
    fn test_named_route() {
        let router = Router::new();
        router
            .add_route(Route::new("GET", "/users/{id}", "user").named("user_detail"))
            .unwrap();

        let params = UriParams::new().with("id", 42);
        let url = router.uri_for_name("user_detail", &params).unwrap();
        assert_eq!(url, "/users/42");

        let err = router.uri_for_name("missing", &params).unwrap_err();
        assert_eq!(err, RouterError::RouteNotFound("missing".to_string()));
    }

    #[test]
    fn test_route_group() {
        let router = Router::new();
        let api_group = RouteGroup::new("/api/v1")
            .get("/users", "list")
            .get("/users/{id}", "show");
        router.add_group(api_group).unwrap();

        let matches = router.find_routes("/api/v1/users/123", Method::Get);
        assert_eq!(matches.len(), 1);
        assert_eq!(*matches[0].route().handler(), "show");
    }

    #[test]
    fn test_route_group_is_atomic() {
        let router = Router::new();
        let group = RouteGroup::new("/api")
            .get("/ok", 1)
            .get("/broken/{", 2);
        assert!(router.add_group(group).is_err());
        assert!(router.is_empty());
    }

    #[test]
    fn test_context_path() {
        let router: Router<()> =
            Router::with_config(RouterConfig::new().with_context_path("/app/"));
        let uri = router
            .uri_for("/users/{id}", &UriParams::new().with("id", 1))
            .unwrap();
        assert_eq!(uri, "/app/users/1");
    }

    #[test]
    fn test_strict_trailing_slash_config() {
        let router = Router::with_config(RouterConfig::new().with_optional_trailing_slash(false));
        router.get("/users", ()).unwrap();
        assert_eq!(router.find_routes("/users", Method::Get).len(), 1);
        assert!(router.find_routes("/users/", Method::Get).is_empty());
    }

    #[test]
    fn test_clear() {
        let router = Router::new();
        router.get("/a", ()).unwrap();
        router.clear();
        assert!(router.is_empty());
        assert!(router.find_routes("/a", Method::Get).is_empty());
    }
}
