use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::files::DocumentRoot;
use crate::http::error::ProtocolError;
use crate::http::parser::{parse_request, MAX_REQUEST_LEN};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::stats::ServerStats;

/// Per-server settings every connection pipeline reads.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub root: DocumentRoot,
    /// Whether this server honors keep-alive at all
    pub keep_alive: bool,
    pub read_timeout: Duration,
    pub trailing_crlf: bool,
}

impl ConnectionConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            root: DocumentRoot::new(cfg.static_files.root.clone()),
            keep_alive: cfg.server.keep_alive,
            read_timeout: cfg.read_timeout(),
            trailing_crlf: cfg.static_files.trailing_crlf,
        }
    }
}

pub struct Connection<S> {
    stream: S,
    config: Arc<ConnectionConfig>,
    stats: Arc<ServerStats>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Result<Request, ProtocolError>),
    Writing(ResponseWriter, Transaction),
    Closed,
}

/// What the connection needs to remember about the response being written.
#[derive(Debug, Clone, Copy)]
pub struct Transaction {
    pub keep_alive: bool,
    /// A 200 that counts toward the response total
    pub served: bool,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<ConnectionConfig>, stats: Arc<ServerStats>) -> Self {
        Self {
            stream,
            config,
            stats,
            state: ConnectionState::Reading,
        }
    }

    /// Serves requests until the client stops asking for keep-alive, goes
    /// idle, disconnects, or a write fails. The stream is shut down on every
    /// one of those paths.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.serve().await;

        if let Err(e) = self.stream.shutdown().await {
            debug!("shutdown after close: {}", e);
        }

        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Some(raw) => ConnectionState::Processing(parse_request(&raw, MAX_REQUEST_LEN)),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(parsed) => {
                    let (response, transaction) = self.handle_request(parsed).await?;
                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, transaction);
                }

                ConnectionState::Writing(mut writer, transaction) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("writing response")?;

                    if transaction.served {
                        let n = self.stats.record_response();
                        info!("sent response {} from server", n);
                    }

                    self.state = if transaction.keep_alive {
                        ConnectionState::Reading
                    } else {
                        ConnectionState::Closed
                    };
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Waits for the next request, at most one buffer's worth.
    ///
    /// Returns `None` when the peer closed, errored, or stayed idle past the
    /// read timeout; all three end the connection quietly.
    async fn read_request(&mut self) -> Option<Vec<u8>> {
        let mut temp = [0u8; MAX_REQUEST_LEN];

        match timeout(self.config.read_timeout, self.stream.read(&mut temp)).await {
            Err(_) => {
                debug!("idle timeout, closing connection");
                None
            }
            Ok(Ok(0)) => {
                debug!("client closed connection");
                None
            }
            Ok(Ok(n)) => Some(temp[..n].to_vec()),
            Ok(Err(e)) => {
                debug!("read failed: {}", e);
                None
            }
        }
    }

    async fn handle_request(
        &self,
        parsed: Result<Request, ProtocolError>,
    ) -> anyhow::Result<(Response, Transaction)> {
        let req = match parsed {
            Ok(req) => req,
            Err(e) => {
                // Nothing about persistence is known yet
                warn!(status = e.code(), "rejecting malformed request");
                let transaction = Transaction { keep_alive: false, served: false };
                return Ok((Response::error(None, false, e), transaction));
            }
        };

        let keep_alive = self.config.keep_alive && req.wants_keep_alive;
        debug!(
            method = req.method.as_str(),
            target = %req.target,
            version = req.version.as_str(),
            keep_alive,
            "request"
        );

        match self.config.root.resolve(&req.target, req.extension()).await {
            Ok(resource) => {
                let content_type = resource.content_type;
                let body = resource
                    .read_body()
                    .await
                    .context("reading resolved file")?;

                let response = Response::success(
                    req.version,
                    keep_alive,
                    content_type,
                    body,
                    self.config.trailing_crlf,
                );
                Ok((response, Transaction { keep_alive, served: true }))
            }
            Err(e) => {
                warn!(status = e.code(), target = %req.target, "request failed");
                let response = Response::error(Some(req.version), keep_alive, e);
                Ok((response, Transaction { keep_alive, served: false }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn config(read_timeout: Duration) -> Arc<ConnectionConfig> {
        Arc::new(ConnectionConfig {
            root: DocumentRoot::new(std::env::temp_dir().join("uhttp-connection-unit-missing")),
            keep_alive: true,
            read_timeout,
            trailing_crlf: true,
        })
    }

    #[tokio::test]
    async fn missing_file_with_keep_alive_loops_until_eof() {
        let (mut client, server) = tokio::io::duplex(1024);
        let stats = Arc::new(ServerStats::new());
        let mut conn = Connection::new(server, config(Duration::from_secs(5)), Arc::clone(&stats));
        let task = tokio::spawn(async move { conn.run().await });

        client
            .write_all(b"GET /x.txt HTTP/1.1\r\nConnection: Keep-alive\r\n\r\n")
            .await
            .unwrap();
        let expected = b"HTTP/1.1 404 Not Found\r\nConnection: Keep-alive\r\n\r\n";
        let mut buf = vec![0u8; expected.len()];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, expected);

        client.shutdown().await.unwrap();
        task.await.unwrap().unwrap();
        assert_eq!(stats.responses(), 0);
    }

    #[tokio::test]
    async fn idle_stream_closes_quietly() {
        let (mut client, server) = tokio::io::duplex(1024);
        let mut conn = Connection::new(
            server,
            config(Duration::from_millis(50)),
            Arc::new(ServerStats::new()),
        );

        conn.run().await.unwrap();

        let mut rest = Vec::new();
        client.read_to_end(&mut rest).await.unwrap();
        assert!(rest.is_empty());
    }
}
