use crate::common::{AcceptOutcome, ShutdownWatch, SocketServer, next_outcome, within};
use crate::unix::config::PathCheckConfig;
use crate::unix::protocol::PathStatus;
use crate::unix::socket_builder::bind_unix;
use crate::{Result, SockError};
use async_trait::async_trait;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::broadcast;
use tracing::{error, info};

/// Unix domain path-check server
///
/// Each client sends a filesystem path and gets back either
/// `"File exists."` or `"File does not exist."`. Connections are handled
/// one at a time: the next accept only happens after the current client
/// has been answered and closed.
///
/// # Examples
///
/// ```no_run
/// use sockpair::unix::{PathCheckConfig, PathCheckServer};
/// use sockpair::{SocketPath, SocketServer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = PathCheckConfig::new(SocketPath::parse("/tmp/check.sock")?);
///     let server = PathCheckServer::new(config);
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct PathCheckServer {
    config: PathCheckConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl PathCheckServer {
    /// Creates a new path-check server with the given configuration
    pub fn new(config: PathCheckConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            shutdown_tx,
        }
    }

    pub fn config(&self) -> &PathCheckConfig {
        &self.config
    }

    /// Creates the listening socket, replacing a stale entry at the path
    pub fn bind(&self) -> Result<UnixListener> {
        self.config.validate()?;
        let listener = bind_unix(self.config.socket_path.as_path(), self.config.backlog)?;
        info!(socket_path = %self.config.socket_path, backlog = self.config.backlog, "Server is listening");
        Ok(listener)
    }

    /// Serves connections serially until shut down, then removes the socket file
    pub async fn serve(&self, listener: UnixListener) -> Result<()> {
        let watch = ShutdownWatch::new(self.shutdown_tx.subscribe())?;
        self.serve_until(listener, watch).await
    }

    /// Like [`serve`](Self::serve) with shutdown sources registered ahead of time
    ///
    /// A shutdown that arrives while a client is being answered abandons
    /// that client and goes straight to cleanup.
    pub async fn serve_until(&self, listener: UnixListener, mut watch: ShutdownWatch) -> Result<()> {
        loop {
            match next_outcome(listener.accept(), &mut watch).await {
                AcceptOutcome::Connection((stream, _addr)) => {
                    info!("Client connected");
                    tokio::select! {
                        result = Self::handle_connection(stream, &self.config) => match result {
                            Ok(status) => info!(response = status.response(), "Client connection closed"),
                            Err(e) => error!(error = %e, "Error handling client"),
                        },
                        reason = watch.recv() => {
                            info!(?reason, "Server shutting down during a connection");
                            break;
                        }
                    }
                }
                AcceptOutcome::Continue(e) => {
                    error!(error = %e, "Error accepting client connection");
                }
                AcceptOutcome::Shutdown(reason) => {
                    info!(?reason, "Server shutting down");
                    break;
                }
            }
        }

        drop(listener);
        if let Err(e) = remove_socket_file(self.config.socket_path.as_path()) {
            error!(error = %e, "Error during cleanup");
        }
        info!("Path-check server stopped");
        Ok(())
    }

    /// Answers one client; the stream is closed when it goes out of scope
    async fn handle_connection(mut stream: UnixStream, config: &PathCheckConfig) -> Result<PathStatus> {
        let mut buffer = vec![0u8; config.buffer_size];

        // One read is one request: anything past `buffer_size` is never seen.
        let n = within(config.read_timeout, "read", async {
            stream.read(&mut buffer).await.map_err(SockError::Receive)
        })
        .await?;

        let requested = std::str::from_utf8(&buffer[..n])?;
        info!(file_path = %requested, "Received file path");

        let status = PathStatus::probe(Path::new(requested)).await;

        within(config.write_timeout, "write", async {
            stream
                .write_all(status.response().as_bytes())
                .await
                .map_err(SockError::Send)
        })
        .await?;

        Ok(status)
    }
}

fn remove_socket_file(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SockError::Cleanup(e)),
    }
}

#[async_trait]
impl SocketServer for PathCheckServer {
    async fn run(&self) -> Result<()> {
        let listener = self.bind()?;
        self.serve(listener).await
    }

    fn shutdown_signal(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }
}
