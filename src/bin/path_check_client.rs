//! path-check-client - asks a path-check server whether a file exists

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use sockpair::SocketPath;
use sockpair::unix::PathCheckClient;
use tracing::info;

#[derive(Parser)]
#[command(name = "path-check-client")]
#[command(about = "Send a file path to a UNIX domain socket server.")]
struct Cli {
    /// Socket Path
    #[arg(short, long)]
    socket: String,

    /// File Path
    #[arg(short, long)]
    file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sockpair=warn,path_check_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let socket_path = SocketPath::parse(&cli.socket)?;

    let mut client = PathCheckClient::connect(&socket_path)
        .await
        .wrap_err("Please ensure the server is running and the socket path is correct")?;
    info!(%socket_path, "Connected to the server");

    let response = client
        .check(&cli.file)
        .await
        .wrap_err_with(|| format!("Exchange for file path '{}' failed", cli.file))?;
    println!("Server response: {response}");

    Ok(())
}
