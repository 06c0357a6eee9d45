use super::captures::Captures;
use super::endpoint::{Action, Endpoint};
use super::error::RouterError;
use super::Router;

use crate::matcher::match_path;
use crate::request::{sanitize_url, RequestContext, RouteMethod};
use crate::table::{Collapsed, Route, RouteTable};

use std::path::Path;

use tracing::{debug, trace};

/// Per-dispatch state shared by every level of group recursion.
#[derive(Debug, Default)]
pub(super) struct DispatchState {
    pub(super) completed: bool,
    path: Option<String>,
}

impl DispatchState {
    pub(super) fn new() -> Self {
        Self::default()
    }
}

impl Router {
    pub(super) fn dispatch_table(
        &self,
        table: &RouteTable,
        request: &RequestContext,
        state: &mut DispatchState,
    ) -> Result<(), RouterError> {
        for (key, block) in table.blocks() {
            let method: RouteMethod = key.parse()?;
            trace!(method = key, routes = block.len(), "entering method block");
            self.dispatch_routes(block.collapse(method, ""), request, state)?;
            if state.completed {
                return Ok(());
            }
        }
        Ok(())
    }

    fn dispatch_routes(
        &self,
        collapsed: Collapsed<'_>,
        request: &RequestContext,
        state: &mut DispatchState,
    ) -> Result<(), RouterError> {
        let method = &collapsed.method;
        for route in &collapsed.routes {
            match route.endpoint {
                Endpoint::Group(_) => {
                    trace!(mount = %route.pattern, "expanding route group");
                    if let Some(inner) = route.expand(method.clone()) {
                        self.dispatch_routes(inner, request, state)?;
                    }
                }
                Endpoint::Action(action) => {
                    if method.accepts(request.method()) {
                        self.attempt(route, action, request, state)?;
                    }
                }
            }
            if state.completed {
                return Ok(());
            }
        }
        Ok(())
    }

    fn attempt(
        &self,
        route: &Route<'_>,
        action: &Action,
        request: &RequestContext,
        state: &mut DispatchState,
    ) -> Result<(), RouterError> {
        if state.path.is_none() {
            state.path = Some(self.normalize_path(request)?);
        }
        let path = state.path.as_deref().unwrap_or("");

        let captures = match match_path(&route.pattern, path) {
            Some(captures) => captures,
            None => {
                trace!(pattern = %route.pattern, path, "route skipped");
                return Ok(());
            }
        };
        debug!(pattern = %route.pattern, path, params = captures.len(), "route matched");

        self.middleware.run(route.middleware.iter().copied())?;
        self.execute(action, &captures)?;
        state.completed = true;
        Ok(())
    }

    pub(super) fn run_fallback(&self, action: &Action) -> Result<(), RouterError> {
        self.execute(action, &Captures::new())
    }

    fn execute(&self, action: &Action, captures: &Captures<'_>) -> Result<(), RouterError> {
        match action {
            Action::Invoke(f) => {
                f(captures);
                Ok(())
            }
            Action::Static(path) => self.serve(path, captures),
        }
    }

    fn serve(&self, path: &Path, captures: &Captures<'_>) -> Result<(), RouterError> {
        let full = self.resource_dir.join(path);
        if !full.is_file() {
            return Err(RouterError::StaticResourceNotFound(full));
        }
        match self.renderer.render(&full, &captures.to_vars()) {
            Ok(()) => Ok(()),
            Err(source) => Err(RouterError::Render { path: full, source }),
        }
    }

    /// The request path as routes see it: sanitized, without query string,
    /// base url or (if configured) trailing slash.
    pub(super) fn normalize_path(&self, request: &RequestContext) -> Result<String, RouterError> {
        let mut url = sanitize_url(request.uri())?;
        if let Some(pos) = url.find('?') {
            url.truncate(pos);
        }

        let base = self.base_url.resolve(request.uri());
        if base != "/" {
            url = url.replacen(&base, "", 1);
        }

        if self.remove_trailing_slash && url.ends_with('/') {
            url.pop();
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    fn normalize(router: &Router, uri: &str) -> String {
        router
            .normalize_path(&RequestContext::new(Method::GET, uri))
            .unwrap()
    }

    #[test]
    fn query_is_dropped() {
        let router = Router::new();
        assert_eq!(normalize(&router, "/hello/world?foo=bar"), "/hello/world");
        assert_eq!(normalize(&router, "/?"), "/");
    }

    #[test]
    fn base_url_is_removed_once() {
        let router = Router::new().with_base_url("app");
        assert_eq!(normalize(&router, "/app/hello"), "/hello");
        assert_eq!(normalize(&router, "/app/app/hello"), "/app/hello");
        assert_eq!(normalize(&router, "/other"), "/other");
    }

    #[test]
    fn environment_directory() {
        let router = Router::new()
            .with_base_url("my-project")
            .with_environments(&["PRJCT-\\d+"])
            .unwrap();
        assert_eq!(normalize(&router, "/my-project/PRJCT-1234/hello"), "/hello");
        assert_eq!(normalize(&router, "/my-project/hello"), "/hello");
    }

    #[test]
    fn trailing_slash_policy() {
        assert_eq!(normalize(&Router::new(), "/test/"), "/test/");

        let router = Router::new().remove_trailing_slash();
        assert_eq!(normalize(&router, "/test/"), "/test");
        assert_eq!(normalize(&router, "/test//"), "/test/");
        assert_eq!(normalize(&router, "/"), "");
    }

    #[test]
    fn unsanitizable() {
        let err = Router::new()
            .normalize_path(&RequestContext::new(Method::GET, "ü"))
            .unwrap_err();
        assert!(matches!(err, RouterError::Sanitization(_)));
    }
}
