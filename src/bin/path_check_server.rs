//! path-check-server - answers whether a requested path is a regular file

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use sockpair::unix::{PathCheckConfig, PathCheckServer};
use sockpair::{SocketPath, SocketServer};
use std::num::NonZeroUsize;
use tracing::info;

#[derive(Parser)]
#[command(name = "path-check-server")]
#[command(about = "Answer file-existence queries over a Unix domain socket")]
struct Cli {
    /// Socket Path
    #[arg(short, long)]
    socket: String,

    /// Maximum request size; longer paths are truncated
    #[arg(long, default_value = "1024")]
    buffer_size: NonZeroUsize,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sockpair=info,path_check_server=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let socket_path = SocketPath::parse(&cli.socket)?;

    let config = PathCheckConfig::new(socket_path).with_buffer_size(cli.buffer_size.get());
    info!(socket_path = %config.socket_path, buffer_size = config.buffer_size, "Starting path-check server");

    PathCheckServer::new(config)
        .run()
        .await
        .wrap_err("Failed to run path-check server")?;

    Ok(())
}
