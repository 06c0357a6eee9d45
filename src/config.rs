//! Router settings loadable from TOML.
//!
//! ```toml
//! base_url = "my-project"
//! environments = ['PRJCT-\d+']
//! remove_trailing_slash = true
//! resource_dir = "public"
//! ```

use crate::router::RouterError;

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Deployment prefix, e.g. `project` for `example.com/project`.
    pub base_url: String,
    /// Regexes of environment directories following the prefix.
    pub environments: Vec<String>,
    pub remove_trailing_slash: bool,
    /// Base directory of static resources; the working directory if unset.
    pub resource_dir: Option<PathBuf>,
}

impl RouterConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, RouterError> {
        toml::from_str(s).map_err(|e| RouterError::Config(Box::new(e)))
    }
}
