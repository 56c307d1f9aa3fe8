//! Request path handling
//!
//! Turns a request path into the relative path and the catalog path the
//! resolver looks up.

use std::borrow::Cow;

pub const SEPARATOR: char = '/';

/// Drop the context path and the separator that follows it
///
/// Only the length of `context_path` matters; the stripped characters are not
/// compared against it. Returns `None` when the request path is too short or
/// the cut would fall inside a multi-byte character.
pub fn strip_context<'a>(request_path: &'a str, context_path: &str) -> Option<&'a str> {
    request_path.get(context_path.len() + SEPARATOR.len_utf8()..)
}

/// Ensure `base` ends with exactly one trailing separator
///
/// A base that already ends with one is returned untouched.
pub fn normalize_base(base: &str) -> Cow<'_, str> {
    if base.ends_with(SEPARATOR) {
        Cow::Borrowed(base)
    } else {
        Cow::Owned(format!("{base}{SEPARATOR}"))
    }
}

/// Bare or root relative paths get the default resource
pub fn is_root(relative_path: &str) -> bool {
    relative_path.is_empty() || relative_path == "/"
}

/// Relative path and catalog path for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Request path minus the context, default resource applied
    pub relative: String,
    /// Normalized base location plus `relative`
    pub candidate: String,
}

impl ResolvedPath {
    /// Build the lookup paths, substituting `default_resource` for a root path
    pub fn new(relative: &str, base_location: &str, default_resource: &str) -> Self {
        let mut relative = relative.to_string();
        let mut candidate = format!("{}{relative}", normalize_base(base_location));

        if is_root(&relative) {
            relative.push_str(default_resource);
            candidate.push_str(default_resource);
        }

        Self {
            relative,
            candidate,
        }
    }
}
