use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "TINY_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
}

/// Where the acceptor binds. The port is never read from the file; it is the
/// one required command-line argument.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    #[serde(skip)]
    pub port: u16,
}

/// How request URIs map onto the filesystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Web root; every resolved path is relative to it.
    pub root: PathBuf,
    /// Served for URIs ending in '/'.
    pub default_document: String,
    /// URIs containing this substring are dynamic.
    pub cgi_marker: String,
    /// Value of the `Server` response header.
    pub server_name: String,
    /// Longest accepted request or header line, in bytes.
    pub max_line_len: usize,
    /// Most header lines drained before the request is refused.
    pub max_headers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            default_document: "home.html".to_string(),
            cgi_marker: "cgi-bin".to_string(),
            server_name: "Tiny Web Server".to_string(),
            max_line_len: 8192,
            max_headers: 100,
        }
    }
}

impl Config {
    /// Builds the configuration for `port`, layering the file named by
    /// `TINY_CONFIG` (if set) over the defaults.
    pub fn load(port: u16) -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        cfg.server.port = port;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        Ok(cfg)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
