use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid request method: {0:?}")]
    InvalidMethod(String),

    #[error("URL sanitization failed: {0:?}")]
    Sanitization(String),

    #[error("route nor fallback found")]
    NoRouteMatched,

    #[error("middleware is not registered: {0:?}")]
    UnregisteredMiddleware(String),

    #[error("invalid middleware {name:?}: {reason}")]
    InvalidMiddleware { name: String, reason: &'static str },

    #[error("middleware failed: {name}")]
    MiddlewareFailed { name: String },

    #[error("file not found: {}", .0.display())]
    StaticResourceNotFound(PathBuf),

    #[error("failed to render {}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid environment pattern")]
    EnvironmentPattern(#[from] regex::Error),

    #[error("invalid router config")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RouterError {
    /// Name of the middleware that rejected the request, if this is a
    /// [`RouterError::MiddlewareFailed`].
    pub fn failing_middleware(&self) -> Option<&str> {
        match self {
            Self::MiddlewareFailed { name } => Some(name),
            _ => None,
        }
    }
}
