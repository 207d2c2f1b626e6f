use std::path::PathBuf;

use clap::Parser;
use uhttp::config::{Concurrency, Config};
use uhttp::server;

/// Minimal static file server (HTTP/1.0 and HTTP/1.1, GET only)
#[derive(Debug, Parser)]
#[command(name = "uhttp", version)]
struct Args {
    /// Port to listen on
    port: u16,

    /// YAML configuration file
    #[arg(short, long, env = "UHTTP_CONFIG")]
    config: Option<PathBuf>,

    /// Document root to serve files from
    #[arg(long)]
    root: Option<PathBuf>,

    /// Serve one connection at a time instead of one task per connection
    #[arg(long)]
    single_threaded: bool,

    /// Close every connection after one response
    #[arg(long)]
    no_keep_alive: bool,

    /// Do not append CRLFCRLF after response bodies
    #[arg(long)]
    no_trailing_crlf: bool,

    /// Idle timeout in seconds while waiting for a request
    #[arg(long)]
    timeout: Option<u64>,
}

impl Args {
    fn apply(&self, cfg: &mut Config) {
        cfg.set_port(self.port);
        if let Some(root) = &self.root {
            cfg.static_files.root = root.clone();
        }
        if self.single_threaded {
            cfg.server.concurrency = Concurrency::Single;
        }
        if self.no_keep_alive {
            cfg.server.keep_alive = false;
        }
        if self.no_trailing_crlf {
            cfg.static_files.trailing_crlf = false;
        }
        if let Some(secs) = self.timeout {
            cfg.server.read_timeout_secs = secs;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    args.apply(&mut cfg);

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
