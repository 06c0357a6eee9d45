use crate::router::RouterError;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::debug;

pub const ANNOTATION: char = '|';
pub const SEPARATOR: char = ',';

/// A request gate. Returning `false` rejects the request.
pub trait Middleware {
    fn process(&self) -> bool;
}

impl<F> Middleware for F
where
    F: Fn() -> bool,
{
    fn process(&self) -> bool {
        (self)()
    }
}

pub type BoxMiddleware = Box<dyn Middleware + Send + Sync>;

type Factory = Box<dyn Fn() -> BoxMiddleware + Send + Sync>;

enum Handle {
    Shared(Arc<dyn Middleware + Send + Sync>),
    Factory(Factory),
}

enum Resolved<'r> {
    Borrowed(&'r (dyn Middleware + Send + Sync)),
    Owned(BoxMiddleware),
}

impl Resolved<'_> {
    fn process(&self) -> bool {
        match self {
            Self::Borrowed(m) => m.process(),
            Self::Owned(m) => m.process(),
        }
    }
}

#[derive(Default)]
pub struct MiddlewareRegistry {
    handles: HashMap<Box<str>, Handle>,
}

impl fmt::Debug for MiddlewareRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handles.keys()).finish()
    }
}

fn check_name(name: &str) -> Result<(), RouterError> {
    let reason = if name.is_empty() {
        "name can not be empty"
    } else if name.contains(|c: char| c == ANNOTATION || c == SEPARATOR || c == '/') {
        "name can not contain '|', ',' or '/'"
    } else if name.contains(char::is_whitespace) {
        "name can not contain whitespace"
    } else {
        return Ok(());
    };
    Err(RouterError::InvalidMiddleware {
        name: name.to_owned(),
        reason,
    })
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    /// Registers one instance shared by every dispatch.
    pub fn register<M>(&mut self, name: &str, middleware: M) -> Result<&mut Self, RouterError>
    where
        M: Middleware + Send + Sync + 'static,
    {
        check_name(name)?;
        self.handles
            .insert(name.into(), Handle::Shared(Arc::new(middleware)));
        Ok(self)
    }

    /// Registers a constructor; every dispatch attempt gets a fresh instance.
    pub fn register_factory<F, M>(&mut self, name: &str, f: F) -> Result<&mut Self, RouterError>
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Middleware + Send + Sync + 'static,
    {
        check_name(name)?;
        let factory: Factory = Box::new(move || Box::new(f()) as BoxMiddleware);
        self.handles.insert(name.into(), Handle::Factory(factory));
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    fn resolve(&self, name: &str) -> Result<Resolved<'_>, RouterError> {
        match self.handles.get(name) {
            Some(Handle::Shared(m)) => Ok(Resolved::Borrowed(&**m)),
            Some(Handle::Factory(f)) => Ok(Resolved::Owned(f())),
            None => Err(RouterError::UnregisteredMiddleware(name.to_owned())),
        }
    }

    /// Runs the chain left to right, stopping at the first rejection.
    pub fn run<'n, I>(&self, names: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = &'n str>,
    {
        for name in names {
            let middleware = self.resolve(name)?;
            if !middleware.process() {
                debug!(middleware = name, "middleware rejected request");
                return Err(RouterError::MiddlewareFailed {
                    name: name.to_owned(),
                });
            }
        }
        Ok(())
    }
}

/// Splits `"/admin|auth,admin"` into `"/admin"` and `["auth", "admin"]`.
pub fn parse_annotation(key: &str) -> (&str, SmallVec<[&str; 4]>) {
    match key.find(ANNOTATION) {
        None => (key, SmallVec::new()),
        Some(pos) => {
            let names = key[pos + 1..]
                .split(SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (&key[..pos], names)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn annotation() {
        let (p, names) = parse_annotation("/admin|auth, admin");
        assert_eq!(p, "/admin");
        assert_eq!(&*names, &["auth", "admin"]);

        let (p, names) = parse_annotation("/plain");
        assert_eq!(p, "/plain");
        assert!(names.is_empty());

        let (p, names) = parse_annotation("/x|,");
        assert_eq!(p, "/x");
        assert!(names.is_empty());
    }

    #[test]
    fn rejects_bad_names() {
        let mut registry = MiddlewareRegistry::new();
        for name in &["", "a,b", "a|b", "a b", "a/b"] {
            assert!(matches!(
                registry.register(name, || true),
                Err(RouterError::InvalidMiddleware { .. })
            ));
        }
        assert!(registry.register("auth", || true).is_ok());
        assert!(registry.contains("auth"));
    }

    #[test]
    fn short_circuit() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let mut registry = MiddlewareRegistry::new();
        registry
            .register("t1", || {
                CALLS.fetch_add(1, Ordering::SeqCst);
                true
            })
            .unwrap()
            .register("f", || {
                CALLS.fetch_add(1, Ordering::SeqCst);
                false
            })
            .unwrap()
            .register("t2", || {
                CALLS.fetch_add(1, Ordering::SeqCst);
                true
            })
            .unwrap();

        let err = registry.run(vec!["t1", "f", "t2"]).unwrap_err();
        assert_eq!(err.failing_middleware(), Some("f"));
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unregistered() {
        let registry = MiddlewareRegistry::new();
        assert!(registry.run(Vec::<&str>::new()).is_ok());
        assert!(matches!(
            registry.run(vec!["nope"]),
            Err(RouterError::UnregisteredMiddleware(n)) if n == "nope"
        ));
    }

    #[test]
    fn factory_builds_per_run() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);

        struct Gate;
        impl Middleware for Gate {
            fn process(&self) -> bool {
                true
            }
        }

        let mut registry = MiddlewareRegistry::new();
        registry
            .register_factory("gate", || {
                BUILT.fetch_add(1, Ordering::SeqCst);
                Gate
            })
            .unwrap();

        registry.run(vec!["gate"]).unwrap();
        registry.run(vec!["gate"]).unwrap();
        assert_eq!(BUILT.load(Ordering::SeqCst), 2);
    }
}
