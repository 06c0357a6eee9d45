//! A declarative, first-match HTTP request router.
//!
//! A [`RouteTable`] maps method keys (`"GET"`, `"POST"`, ..., `"ANY"`) to
//! ordered lists of `pattern => action` entries. Patterns are `/`-separated;
//! a segment starting with `$` captures the request segment at that
//! position. An entry can also be a [`RouteGroup`], whose keys are mounted
//! under the entry's pattern, and any key may carry a middleware annotation
//! such as `"/admin|auth,admin"`.
//!
//! ```
//! use route_table::{route_table, Action, Method, RequestContext, Router};
//!
//! let table = route_table! {
//!     "GET" => {
//!         "/hello/$name" => Action::invoke(|caps| println!("hello {}", caps[0].1)),
//!     },
//! };
//!
//! let request = RequestContext::new(Method::GET, "/hello/world");
//! Router::new().route(&table, &request, None).unwrap();
//! ```

#![deny(unsafe_code)]

pub mod matcher;
pub mod middleware;
pub mod request;
pub mod resource;
pub mod table;

#[cfg(feature = "toml-config")]
pub mod config;

mod router;

pub use crate::middleware::{Middleware, MiddlewareRegistry};
pub use crate::request::{Method, RequestContext, RouteMethod};
pub use crate::router::{Action, Captures, Endpoint, Router, RouterError, Vars};
pub use crate::table::{RouteGroup, RouteTable};

#[cfg(feature = "toml-config")]
pub use crate::config::RouterConfig;
