//! Mapping request URIs onto the web root.

use crate::config::SiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Served from the file's bytes
    Static,
    /// Produced by running the file as a CGI program
    Dynamic,
}

/// Where a request URI points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Path relative to the web root, always starting with '.'
    pub path: String,
    pub kind: ContentKind,
    /// Raw text after the first '?'; empty for static content
    pub query: String,
}

/// Classifies `uri` with the default rules: `cgi-bin` marks dynamic content and
/// `home.html` is the directory document.
pub fn classify(uri: &str) -> Target {
    classify_with(uri, "cgi-bin", "home.html")
}

/// Classifies `uri`, treating any URI containing `cgi_marker` as dynamic.
///
/// Total over all inputs; whether the resulting path exists is checked later.
pub fn classify_with(uri: &str, cgi_marker: &str, default_document: &str) -> Target {
    if !uri.contains(cgi_marker) {
        let mut path = format!(".{}", uri);
        if uri.ends_with('/') {
            path.push_str(default_document);
        }
        return Target {
            path,
            kind: ContentKind::Static,
            query: String::new(),
        };
    }

    let (suffix, query) = uri.split_once('?').unwrap_or((uri, ""));

    Target {
        path: format!(".{}", suffix),
        kind: ContentKind::Dynamic,
        query: query.to_string(),
    }
}

impl SiteConfig {
    pub fn classify(&self, uri: &str) -> Target {
        classify_with(uri, &self.cgi_marker, &self.default_document)
    }
}
