use crate::router::RouterError;

use std::fmt;
use std::str::FromStr;

pub use http::Method;
use regex::Regex;

/// The method key of a route table block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMethod {
    /// Matches every request method.
    Any,
    Http(Method),
}

impl RouteMethod {
    pub fn accepts(&self, method: &Method) -> bool {
        match self {
            Self::Any => true,
            Self::Http(m) => m == method,
        }
    }
}

impl FromStr for RouteMethod {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s {
            "ANY" => return Ok(Self::Any),
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "TRACE" => Method::TRACE,
            "CONNECT" => Method::CONNECT,
            _ => return Err(RouterError::InvalidMethod(s.to_owned())),
        };
        Ok(Self::Http(method))
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("ANY"),
            Self::Http(m) => f.write_str(m.as_str()),
        }
    }
}

/// The request being dispatched.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: String,
}

impl RequestContext {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The raw request URI, query string included.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl<B> From<&http::Request<B>> for RequestContext {
    fn from(req: &http::Request<B>) -> Self {
        let uri = match req.uri().path_and_query() {
            Some(pq) => pq.as_str().to_owned(),
            None => req.uri().path().to_owned(),
        };
        Self::new(req.method().clone(), uri)
    }
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=".contains(c)
}

/// Removes every character that may not appear in a URL.
pub fn sanitize_url(raw: &str) -> Result<String, RouterError> {
    let url: String = raw.chars().filter(|&c| is_url_char(c)).collect();
    if url.is_empty() {
        return Err(RouterError::Sanitization(raw.to_owned()));
    }
    Ok(url)
}

/// The URL prefix the router ignores when matching.
///
/// `environments` are alternative regexes for a deployment specific
/// directory (for example `PRJCT-\d+`) that sits right after the prefix.
#[derive(Debug, Clone, Default)]
pub struct BaseUrl {
    prefix: String,
    environments: Option<Regex>,
}

impl BaseUrl {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            environments: None,
        }
    }

    pub fn with_environments<I, S>(mut self, patterns: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<S> = patterns.into_iter().collect();
        self.environments = if alternatives.is_empty() {
            None
        } else {
            let joined = alternatives
                .iter()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<&str>>()
                .join("|");
            Some(Regex::new(&joined)?)
        };
        Ok(self)
    }

    /// Computes the effective base path for a raw request URI.
    pub fn resolve(&self, uri: &str) -> String {
        let mut base = format!("/{}", self.prefix);
        if let Some(m) = self.environments.as_ref().and_then(|re| re.find(uri)) {
            base.push('/');
            base.push_str(m.as_str());
        }
        while base.contains("//") {
            base = base.replace("//", "/");
        }
        if base != "/" {
            let len = base.trim_end_matches('/').len();
            base.truncate(len.max(1));
        }
        base
    }
}
