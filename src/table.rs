mod table_macro;

use crate::middleware::parse_annotation;
use crate::request::RouteMethod;
use crate::router::Endpoint;

use std::borrow::Cow;

use smallvec::SmallVec;

pub type Middlewares<'t> = SmallVec<[&'t str; 4]>;

/// An ordered list of `(key, endpoint)` pairs, mounted under a prefix.
///
/// A key is a pattern optionally followed by a middleware annotation,
/// e.g. `"/admin/$page|auth,admin"`.
#[derive(Debug, Default)]
pub struct RouteGroup {
    routes: Vec<(Box<str>, Endpoint)>,
}

impl RouteGroup {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Inserts `endpoint` under `key`. An existing entry with the same key
    /// is replaced in place and keeps its position.
    pub fn insert(&mut self, key: &str, endpoint: impl Into<Endpoint>) -> &mut Self {
        let endpoint = endpoint.into();
        match self.routes.iter_mut().find(|(k, _)| &**k == key) {
            Some(entry) => entry.1 = endpoint,
            None => self.routes.push((key.into(), endpoint)),
        }
        self
    }

    pub fn insert_group(&mut self, key: &str, group: RouteGroup) -> &mut Self {
        self.insert(key, group)
    }

    pub fn nest(&mut self, key: &str, f: impl FnOnce(&mut RouteGroup)) -> &mut Self {
        let mut group = Self::new();
        f(&mut group);
        self.insert_group(key, group)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Endpoint)> + '_ {
        self.routes.iter().map(|(k, e)| (&**k, e))
    }

    /// Flattens this group under `mount`, one level deep.
    ///
    /// Nested groups come back unexpanded, carrying the concatenated prefix
    /// and the inherited middleware, so that they are only collapsed when a
    /// dispatch actually reaches them.
    pub fn collapse<'t>(&'t self, method: RouteMethod, mount: &'t str) -> Collapsed<'t> {
        let (prefix, middleware) = parse_annotation(mount);
        self.collapse_under(method, prefix, &middleware)
    }

    pub(crate) fn collapse_under<'t>(
        &'t self,
        method: RouteMethod,
        prefix: &str,
        inherited: &[&'t str],
    ) -> Collapsed<'t> {
        let routes = self
            .routes
            .iter()
            .map(|(key, endpoint)| {
                let (pattern, own) = parse_annotation(key);
                let pattern = if prefix.is_empty() {
                    Cow::Borrowed(pattern)
                } else {
                    Cow::Owned(format!("{}{}", prefix, pattern))
                };
                let mut middleware: Middlewares<'t> = inherited.iter().copied().collect();
                middleware.extend(own);
                Route {
                    pattern,
                    middleware,
                    endpoint,
                }
            })
            .collect();
        Collapsed { method, routes }
    }
}

/// A route with its group prefixes and inherited middleware applied.
#[derive(Debug, Clone)]
pub struct Route<'t> {
    pub pattern: Cow<'t, str>,
    pub middleware: Middlewares<'t>,
    pub endpoint: &'t Endpoint,
}

impl<'t> Route<'t> {
    /// Expands a nested group endpoint under this route's pattern and
    /// middleware. `None` for action endpoints.
    pub fn expand(&self, method: RouteMethod) -> Option<Collapsed<'t>> {
        match self.endpoint {
            Endpoint::Group(group) => {
                Some(group.collapse_under(method, &self.pattern, &self.middleware))
            }
            Endpoint::Action(_) => None,
        }
    }
}

/// The result of collapsing one group: a flat route list under one method.
#[derive(Debug)]
pub struct Collapsed<'t> {
    pub method: RouteMethod,
    pub routes: Vec<Route<'t>>,
}

/// Method blocks in declaration order.
#[derive(Debug, Default)]
pub struct RouteTable {
    blocks: Vec<(Box<str>, RouteGroup)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// The block for `method`, appended at the end if not declared yet.
    ///
    /// The key is kept verbatim; it is validated when a dispatch reaches it.
    pub fn method(&mut self, method: &str) -> &mut RouteGroup {
        let pos = match self.blocks.iter().position(|(m, _)| &**m == method) {
            Some(pos) => pos,
            None => {
                self.blocks.push((method.into(), RouteGroup::new()));
                self.blocks.len() - 1
            }
        };
        &mut self.blocks[pos].1
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&str, &RouteGroup)> + '_ {
        self.blocks.iter().map(|(m, g)| (&**m, g))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|(_, g)| g.is_empty())
    }
}
