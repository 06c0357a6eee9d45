use super::core::DispatchState;
use super::endpoint::Action;
use super::error::RouterError;
use super::Router;

use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::request::{BaseUrl, RequestContext};
use crate::resource::{Render, ServeFile};
use crate::table::RouteTable;

#[cfg(feature = "toml-config")]
use crate::config::RouterConfig;

use std::path::PathBuf;

use tracing::debug;

impl Router {
    /// A router without base url, serving static resources relative to the
    /// working directory.
    pub fn new() -> Self {
        Self {
            base_url: BaseUrl::default(),
            remove_trailing_slash: false,
            resource_dir: PathBuf::from("."),
            middleware: MiddlewareRegistry::new(),
            renderer: Box::new(ServeFile),
        }
    }

    #[cfg(feature = "toml-config")]
    pub fn from_config(config: &RouterConfig) -> Result<Self, RouterError> {
        let mut router = Self::new()
            .with_base_url(config.base_url.as_str())
            .with_environments(&config.environments)?;
        if config.remove_trailing_slash {
            router = router.remove_trailing_slash();
        }
        if let Some(ref dir) = config.resource_dir {
            router = router.with_resource_dir(dir);
        }
        Ok(router)
    }

    /// Set to `project` when the app is deployed under `example.com/project`.
    pub fn with_base_url(mut self, prefix: &str) -> Self {
        self.base_url = BaseUrl::new(prefix);
        self
    }

    /// Regexes of environment directories that follow the base url and are
    /// not part of any route.
    pub fn with_environments<I, S>(mut self, patterns: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base_url = self.base_url.with_environments(patterns)?;
        Ok(self)
    }

    /// Strips one trailing slash from every request path before matching.
    pub fn remove_trailing_slash(mut self) -> Self {
        self.remove_trailing_slash = true;
        self
    }

    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    pub fn with_renderer(mut self, renderer: impl Render + Send + Sync + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_middleware<M>(mut self, name: &str, middleware: M) -> Result<Self, RouterError>
    where
        M: Middleware + Send + Sync + 'static,
    {
        self.middleware.register(name, middleware)?;
        Ok(self)
    }

    pub fn with_middleware_factory<F, M>(mut self, name: &str, f: F) -> Result<Self, RouterError>
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Middleware + Send + Sync + 'static,
    {
        self.middleware.register_factory(name, f)?;
        Ok(self)
    }

    pub fn middleware_mut(&mut self) -> &mut MiddlewareRegistry {
        &mut self.middleware
    }

    /// Dispatches `request` to the first matching route of `table`.
    ///
    /// If nothing matches, `fallback` runs instead; without a fallback the
    /// dispatch fails with [`RouterError::NoRouteMatched`].
    pub fn route(
        &self,
        table: &RouteTable,
        request: &RequestContext,
        fallback: Option<&Action>,
    ) -> Result<(), RouterError> {
        let mut state = DispatchState::new();
        self.dispatch_table(table, request, &mut state)?;
        if state.completed {
            return Ok(());
        }

        match fallback {
            Some(action) => {
                debug!(uri = request.uri(), "no route matched, running fallback");
                self.run_fallback(action)
            }
            None => {
                debug!(uri = request.uri(), "no route matched");
                Err(RouterError::NoRouteMatched)
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
