//! char-count-server - counts alphabetic characters in streamed text

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use sockpair::tcp::{CharCountConfig, CharCountServer};
use sockpair::SocketServer;
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "char-count-server")]
#[command(about = "Count alphabetic characters in text sent over TCP")]
struct Cli {
    /// Port to listen on (all interfaces)
    #[arg(long)]
    port: u16,

    /// Read chunk size
    #[arg(long, default_value = "4096")]
    buffer_size: NonZeroUsize,

    /// Cap on concurrently handled connections (unbounded when omitted)
    #[arg(long)]
    max_connections: Option<usize>,

    /// Cap on bytes accepted per request (unbounded when omitted)
    #[arg(long)]
    max_request_size: Option<usize>,

    /// Give up on a silent client after this many seconds
    #[arg(long)]
    read_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sockpair=info,char_count_server=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CharCountConfig::new(cli.port).with_buffer_size(cli.buffer_size.get());
    if let Some(limit) = cli.max_connections {
        config = config.with_max_connections(limit);
    }
    if let Some(limit) = cli.max_request_size {
        config = config.with_max_request_size(limit);
    }
    if let Some(secs) = cli.read_timeout_secs {
        config = config.with_read_timeout(Duration::from_secs(secs));
    }

    info!(address = %config.bind_addr, max_connections = ?config.max_connections, "Starting char-count server");

    CharCountServer::new(config)
        .run()
        .await
        .wrap_err("Failed to run char-count server")?;

    Ok(())
}
