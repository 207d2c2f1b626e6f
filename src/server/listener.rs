use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, info_span, warn, Instrument};

use crate::config::{Concurrency, Config};
use crate::http::connection::{Connection, ConnectionConfig};
use crate::server::stats::ServerStats;

const LISTEN_BACKLOG: u32 = 1024;

/// Binds the configured address with address reuse enabled.
pub fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid listen address {}", addr))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .context("opening socket")?;

    socket.set_reuseaddr(true).context("setting SO_REUSEADDR")?;
    socket
        .bind(addr)
        .with_context(|| format!("binding socket to {}", addr))?;

    socket.listen(LISTEN_BACKLOG).context("listening on socket")
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server.listen_addr)?;
    info!("Listening on {}", listener.local_addr()?);
    info!(
        root = %cfg.static_files.root.display(),
        concurrency = ?cfg.server.concurrency,
        keep_alive = cfg.server.keep_alive,
        "Serving static files"
    );

    let config = Arc::new(ConnectionConfig::from_config(cfg));
    serve(listener, config, cfg.server.concurrency, Arc::new(ServerStats::new())).await
}

/// Accepts connections forever, running one pipeline per connection.
///
/// `Single` awaits each pipeline before accepting again; `PerConnection`
/// hands the socket to a freshly spawned task.
pub async fn serve(
    listener: TcpListener,
    config: Arc<ConnectionConfig>,
    concurrency: Concurrency,
    stats: Arc<ServerStats>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, Arc::clone(&config), Arc::clone(&stats));
        let span = info_span!("conn", %peer);

        match concurrency {
            Concurrency::Single => {
                handle(&mut conn, peer).instrument(span).await;
            }
            Concurrency::PerConnection => {
                tokio::spawn(async move { handle(&mut conn, peer).await }.instrument(span));
            }
        }
    }
}

async fn handle(conn: &mut Connection<tokio::net::TcpStream>, peer: SocketAddr) {
    if let Err(e) = conn.run().await {
        tracing::error!("Connection error from {}: {:#}", peer, e);
    }
}
