//! Content resolution and delivery
//!
//! This module turns a request URI into a filesystem target and produces the
//! response body for it, either from a file on disk or from a CGI program.

pub mod cgi;
pub mod static_files;
pub mod uri;

pub use uri::{ContentKind, Target, classify};
