use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::fs::{FileSystem, LocalFs};
use crate::http::connection::Connection;

/// Binds the listening socket. Failure here is fatal to the process.
pub async fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr();
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Unable to start server at: {}", addr))
}

/// Accepts connections forever, one spawned task per connection.
///
/// With `max_connections` set, the loop waits for a free slot before the
/// next accept instead of waiting on any particular handler.
pub async fn serve(
    listener: TcpListener,
    cfg: Arc<Config>,
    fs: Arc<dyn FileSystem>,
) -> anyhow::Result<()> {
    let limiter = cfg
        .limits
        .max_connections
        .map(|max| Arc::new(Semaphore::new(max)));

    loop {
        let permit = match &limiter {
            Some(limiter) => Some(
                Arc::clone(limiter)
                    .acquire_owned()
                    .await
                    .context("connection limiter closed")?,
            ),
            None => None,
        };

        let (socket, peer) = listener
            .accept()
            .await
            .context("Unable to accept connections")?;
        debug!("Accepted connection from {}", peer);

        let config = Arc::clone(&cfg);
        let fs = Arc::clone(&fs);
        tokio::spawn(async move {
            let _permit = permit;
            let conn = Connection::new(socket, config, fs);
            if let Err(e) = conn.run().await {
                warn!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = bind(&cfg).await?;
    let local = listener.local_addr()?;
    info!(
        "Serving HTTP on {} port {} (http://{}/) ...",
        local.ip(),
        local.port(),
        cfg.listen_addr()
    );

    serve(listener, Arc::new(cfg), Arc::new(LocalFs)).await
}
