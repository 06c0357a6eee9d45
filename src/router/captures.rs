use std::collections::HashMap;
use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Name to value mapping handed to static resources.
pub type Vars<'a> = HashMap<&'a str, &'a str>;

/// Parameters captured from a request path, in pattern order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures<'a> {
    pub(crate) buf: SmallVec<[(&'a str, &'a str); 8]>,
}

impl<'a> Captures<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.buf
            .iter()
            .find_map(|&(k, v)| if name == k { Some(v) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    /// The `i`-th captured value, counting parameter segments left to right.
    pub fn value(&self, i: usize) -> Option<&'a str> {
        self.buf.get(i).map(|&(_, v)| v)
    }

    pub fn values(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.buf.iter().map(|&(_, v)| v)
    }

    pub fn to_vars(&self) -> Vars<'a> {
        self.buf.iter().cloned().collect()
    }
}

impl<'a> Deref for Captures<'a> {
    type Target = [(&'a str, &'a str)];
    fn deref(&self) -> &Self::Target {
        &*self.buf
    }
}

impl Captures<'_> {
    pub(crate) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }
}

impl Default for Captures<'_> {
    fn default() -> Self {
        Self::new()
    }
}
