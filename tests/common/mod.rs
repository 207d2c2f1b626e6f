#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use uhttp::config::Concurrency;
use uhttp::files::DocumentRoot;
use uhttp::http::connection::ConnectionConfig;
use uhttp::server::listener;
use uhttp::server::stats::ServerStats;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A scratch document root removed on drop.
pub struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "uhttp-{}-{}-{}",
            name,
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&file, contents).unwrap();
        file
    }

    pub fn mkdir(&self, relative: &str) {
        std::fs::create_dir_all(self.path.join(relative)).unwrap();
    }

    pub fn document_root(&self) -> DocumentRoot {
        DocumentRoot::new(self.path.clone())
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub stats: Arc<ServerStats>,
}

pub struct ServerOptions {
    pub concurrency: Concurrency,
    pub keep_alive: bool,
    pub read_timeout: Duration,
    pub trailing_crlf: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            concurrency: Concurrency::PerConnection,
            keep_alive: true,
            read_timeout: Duration::from_secs(5),
            trailing_crlf: true,
        }
    }
}

pub fn start_server(root: &TempRoot, options: ServerOptions) -> TestServer {
    let listener = listener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let stats = Arc::new(ServerStats::new());

    let config = Arc::new(ConnectionConfig {
        root: root.document_root(),
        keep_alive: options.keep_alive,
        read_timeout: options.read_timeout,
        trailing_crlf: options.trailing_crlf,
    });

    tokio::spawn(listener::serve(
        listener,
        config,
        options.concurrency,
        Arc::clone(&stats),
    ));

    TestServer { addr, stats }
}

/// One response as seen on the wire.
pub struct WireResponse {
    pub head: String,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn status_line(&self) -> &str {
        self.head.lines().next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{}: ", name);
        self.head
            .lines()
            .skip(1)
            .find_map(|line| line.strip_prefix(prefix.as_str()))
    }
}

pub async fn send(stream: &mut TcpStream, request: &[u8]) {
    stream.write_all(request).await.unwrap();
}

/// Reads one response: the head, then `Content-Length` body bytes plus the
/// trailer when `trailer` is set and the response has a body length.
pub async fn read_response(stream: &mut TcpStream, trailer: bool) -> WireResponse {
    let mut raw = Vec::new();
    let head_end = loop {
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let mut byte = [0u8; 1];
        let n = stream.read(&mut byte).await.unwrap();
        assert!(n > 0, "connection closed before response head");
        raw.push(byte[0]);
    };

    let head = String::from_utf8(raw[..head_end].to_vec()).unwrap();
    let mut response = WireResponse { head, body: Vec::new() };

    if let Some(len) = response.header("Content-Length") {
        let len: usize = len.parse().unwrap();
        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).await.unwrap();
        if trailer {
            let mut crlf = [0u8; 4];
            stream.read_exact(&mut crlf).await.unwrap();
            assert_eq!(&crlf, b"\r\n\r\n");
        }
        response.body = body;
    }

    response
}

/// Asserts that the server closes the connection without sending more data.
pub async fn assert_closed(stream: &mut TcpStream) {
    let mut rest = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut rest))
        .await
        .expect("server did not close the connection");
    read.unwrap();
    assert!(rest.is_empty(), "unexpected bytes: {:?}", String::from_utf8_lossy(&rest));
}
