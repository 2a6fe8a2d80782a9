//! char-count-client - streams a file to a char-count server

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use sockpair::tcp::CharCountClient;

#[derive(Parser)]
#[command(name = "char-count-client")]
#[command(about = "Send a file to a char-count server and print its reply")]
struct Cli {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long)]
    port: u16,

    /// File whose contents are sent
    #[arg(short, long)]
    file: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sockpair=warn,char_count_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file = tokio::fs::File::open(&cli.file)
        .await
        .wrap_err_with(|| format!("Failed to open {}", cli.file.display()))?;

    let mut client = CharCountClient::connect(format!("{}:{}", cli.host, cli.port)).await?;
    let response = client.send_reader(file).await.wrap_err("Exchange failed")?;

    if response.is_empty() {
        color_eyre::eyre::bail!("Server closed the connection without a reply (input not valid UTF-8?)");
    }
    println!("{}", String::from_utf8_lossy(&response));

    Ok(())
}
