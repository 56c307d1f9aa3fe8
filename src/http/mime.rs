//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension. The table
//! is built once and shared read-only between resolutions.

use std::collections::HashMap;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
pub const MIME_TYPE_HTML: &str = "text/html";
pub const MIME_TYPE_JAVASCRIPT: &str = "application/x-javascript";
pub const MIME_TYPE_PNG: &str = "image/png";
pub const MIME_TYPE_GIF: &str = "image/gif";
pub const MIME_TYPE_CSS: &str = "text/css";

/// Immutable extension to Content-Type table with a fallback type
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<&'static str, &'static str>,
    fallback: &'static str,
}

impl Default for MimeTable {
    fn default() -> Self {
        let types = HashMap::from([
            ("html", MIME_TYPE_HTML),
            ("js", MIME_TYPE_JAVASCRIPT),
            ("png", MIME_TYPE_PNG),
            ("gif", MIME_TYPE_GIF),
            ("css", MIME_TYPE_CSS),
        ]);
        Self {
            types,
            fallback: DEFAULT_MIME_TYPE,
        }
    }
}

impl MimeTable {
    /// Get MIME Content-Type based on file extension
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Examples
    /// ```
    /// use static_resources::http::mime::MimeTable;
    /// let table = MimeTable::default();
    /// assert_eq!(table.content_type(Some("html")), "text/html");
    /// assert_eq!(table.content_type(Some("HTML")), "application/octet-stream");
    /// assert_eq!(table.content_type(None), "application/octet-stream");
    /// ```
    pub fn content_type(&self, extension: Option<&str>) -> &'static str {
        extension
            .and_then(|ext| self.types.get(ext).copied())
            .unwrap_or(self.fallback)
    }

    /// Content-Type for the extension of `path`
    pub fn content_type_for_path(&self, path: &str) -> &'static str {
        self.content_type(extension(path))
    }

    pub const fn fallback(&self) -> &'static str {
        self.fallback
    }
}

/// Extension of the last path component: text after its last `.`
///
/// A dot that belongs to a directory name does not count.
pub fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name.rfind('.').map(|idx| &file_name[idx + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        let table = MimeTable::default();
        assert_eq!(table.content_type(Some("html")), "text/html");
        assert_eq!(table.content_type(Some("js")), "application/x-javascript");
        assert_eq!(table.content_type(Some("png")), "image/png");
        assert_eq!(table.content_type(Some("gif")), "image/gif");
        assert_eq!(table.content_type(Some("css")), "text/css");
    }

    #[test]
    fn test_unknown_extension() {
        let table = MimeTable::default();
        assert_eq!(table.content_type(Some("txt")), DEFAULT_MIME_TYPE);
        assert_eq!(table.content_type(Some("htm")), DEFAULT_MIME_TYPE);
        assert_eq!(table.content_type(Some("")), DEFAULT_MIME_TYPE);
        assert_eq!(table.content_type(None), DEFAULT_MIME_TYPE);
        assert_eq!(table.fallback(), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_case_sensitive() {
        let table = MimeTable::default();
        assert_eq!(table.content_type(Some("CSS")), DEFAULT_MIME_TYPE);
        assert_eq!(table.content_type(Some("Js")), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("index.html"), Some("html"));
        assert_eq!(extension("js/app.min.js"), Some("js"));
        assert_eq!(extension("README"), None);
        assert_eq!(extension("archive."), Some(""));
        assert_eq!(extension("v1.2/LICENSE"), None);
        assert_eq!(extension(""), None);
    }

    #[test]
    fn test_content_type_for_path() {
        let table = MimeTable::default();
        assert_eq!(table.content_type_for_path("img/logo.png"), "image/png");
        assert_eq!(table.content_type_for_path("/css.d/theme"), DEFAULT_MIME_TYPE);
    }
}
