use super::captures::Captures;
use crate::table::RouteGroup;

use std::fmt;
use std::path::PathBuf;

type BoxInvoke = Box<dyn Fn(&Captures<'_>) + Send + Sync>;

/// The unit of work executed on a successful match.
pub enum Action {
    /// Called with the captured parameters.
    Invoke(BoxInvoke),
    /// A file resolved against the router's resource directory.
    Static(PathBuf),
}

impl Action {
    pub fn invoke<F>(f: F) -> Self
    where
        F: Fn(&Captures<'_>) + Send + Sync + 'static,
    {
        Self::Invoke(Box::new(f))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::Static(path.into())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoke(_) => f.write_str("Invoke(..)"),
            Self::Static(p) => f.debug_tuple("Static").field(p).finish(),
        }
    }
}

#[derive(Debug)]
pub enum Endpoint {
    Action(Action),
    Group(RouteGroup),
}

impl From<Action> for Endpoint {
    fn from(x: Action) -> Self {
        Self::Action(x)
    }
}

impl From<RouteGroup> for Endpoint {
    fn from(x: RouteGroup) -> Self {
        Self::Group(x)
    }
}

impl Endpoint {
    #[inline]
    pub fn is_group(&self) -> bool {
        match self {
            Self::Action(_) => false,
            Self::Group(_) => true,
        }
    }
}
