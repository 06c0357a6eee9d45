use crate::router::Captures;

use smallvec::SmallVec;

pub const PARAM: char = '$';
pub const SLASH: char = '/';

pub type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Splits `s` on `/` and drops the first piece, which is the empty string in
/// front of the leading slash for any well-formed path.
pub fn segments(s: &str) -> Segments<'_> {
    s.split(SLASH).skip(1).collect()
}

/// Matches `path` against `pattern`.
///
/// Both sides must have the same number of segments. A `$name` segment
/// matches any non-empty request segment and captures it, every other
/// segment must be byte-equal. Captures keep the order in which parameter
/// segments appear in the pattern.
pub fn match_path<'a>(pattern: &'a str, path: &'a str) -> Option<Captures<'a>> {
    let route_parts = segments(pattern);
    let request_parts = segments(path);

    if route_parts.len() != request_parts.len() {
        return None;
    }

    let mut captures = Captures::new();
    for (&part, &value) in route_parts.iter().zip(request_parts.iter()) {
        match part.strip_prefix(PARAM) {
            Some(name) => {
                if value.is_empty() {
                    return None;
                }
                captures.buf.push((name, value));
            }
            None => {
                if part != value {
                    return None;
                }
            }
        }
    }
    Some(captures)
}
