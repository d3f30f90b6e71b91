#![allow(dead_code)]

use pathway_router::{Method, PathParams, Router};

/// Handler stand-in; the router never looks inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyRouteHandler;

pub fn router() -> Router<EmptyRouteHandler> {
    Router::new()
}

pub fn router_with(method: Method, pattern: &str) -> Router<EmptyRouteHandler> {
    let router = router();
    router
        .add(method.as_str(), pattern, EmptyRouteHandler)
        .unwrap_or_else(|e| panic!("Failed to add route: {pattern}\nError: {e}"));
    router
}

pub fn count(router: &Router<EmptyRouteHandler>, path: &str, method: Method) -> usize {
    router.find_routes(path, method).len()
}

/// Parameters of the single route matching `path`.
pub fn single_match(router: &Router<EmptyRouteHandler>, path: &str, method: Method) -> PathParams {
    let matches = router.find_routes(path, method);
    assert_eq!(
        matches.len(),
        1,
        "Expected exactly one match for {method} {path}, got {}",
        matches.len()
    );
    matches[0].path_parameters().clone()
}
