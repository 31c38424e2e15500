use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{Config, SiteConfig};
use crate::http::connection::Connection;

/// A bound listening socket plus the site it serves.
pub struct Server {
    listener: TcpListener,
    site: Arc<SiteConfig>,
}

impl Server {
    /// Binds the configured address. The web root is canonicalized here so a
    /// missing root fails at startup rather than on the first request.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let mut site = cfg.site.clone();
        site.root = std::fs::canonicalize(&site.root)
            .with_context(|| format!("web root {} is not accessible", site.root.display()))?;

        let addr = cfg.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        info!("Listening on {}", listener.local_addr()?);
        info!("Serving {}", site.root.display());

        Ok(Self {
            listener,
            site: Arc::new(site),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections one at a time, forever. Each transaction runs to
    /// completion, CGI child included, before the next accept.
    pub async fn serve(&self) -> anyhow::Result<()> {
        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::error!("Accept failed: {}", e);
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            let mut conn = Connection::new(socket, Arc::clone(&self.site));
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
            drop(conn);
        }
    }
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    Server::bind(cfg).await?.serve().await
}
