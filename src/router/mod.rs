mod captures;
mod core;
mod endpoint;
mod error;
mod imp;

pub use self::captures::{Captures, Vars};
pub use self::endpoint::{Action, Endpoint};
pub use self::error::RouterError;

use crate::middleware::MiddlewareRegistry;
use crate::request::BaseUrl;
use crate::resource::BoxRender;

use std::fmt;
use std::path::PathBuf;

/// Matches one request against a route table and runs the first matching
/// action.
pub struct Router {
    base_url: BaseUrl,
    remove_trailing_slash: bool,
    resource_dir: PathBuf,
    middleware: MiddlewareRegistry,
    renderer: BoxRender,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("base_url", &self.base_url)
            .field("remove_trailing_slash", &self.remove_trailing_slash)
            .field("resource_dir", &self.resource_dir)
            .field("middleware", &self.middleware)
            .finish()
    }
}
