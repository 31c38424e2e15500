//! Tiny - an iterative HTTP/1.0 web server
//!
//! Serves static files and CGI program output over GET, one connection at a
//! time.

pub mod config;
pub mod content;
pub mod http;
pub mod server;
