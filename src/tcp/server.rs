use super::config::CharCountConfig;
use super::protocol::{count_alphabetic, format_count_response};
use super::socket_builder::bind_tcp;
use crate::common::{AcceptOutcome, ShutdownWatch, SocketServer, next_outcome, within};
use crate::network::describe_outbound_ipv4;
use crate::{Result, SockError};
use async_trait::async_trait;
use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Semaphore, broadcast};
use tracing::{Instrument, error, info, warn};

/// TCP alphabetic character counting server
///
/// Every accepted connection is handed to its own task. A client streams
/// arbitrary bytes, half-closes its write side, and receives
/// `"Alphabetic character count: N"`.
///
/// # Examples
///
/// Server with graceful shutdown:
///
/// ```no_run
/// use sockpair::tcp::{CharCountConfig, CharCountServer};
/// use sockpair::SocketServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = CharCountServer::new(CharCountConfig::new(9000));
///     let shutdown_signal = server.shutdown_signal();
///
///     let server_handle = tokio::spawn(async move { server.run().await });
///
///     // Do other work...
///
///     let _ = shutdown_signal.send(());
///     server_handle.await??;
///     Ok(())
/// }
/// ```
pub struct CharCountServer {
    config: Arc<CharCountConfig>,
    shutdown_signal: Arc<broadcast::Sender<()>>,
}

impl CharCountServer {
    /// Creates a new char-count server with the given configuration
    pub fn new(config: CharCountConfig) -> Self {
        let (shutdown_signal, _) = broadcast::channel(1);
        Self {
            config: Arc::new(config),
            shutdown_signal: Arc::new(shutdown_signal),
        }
    }

    pub fn config(&self) -> &CharCountConfig {
        &self.config
    }

    /// Creates the listening socket
    pub fn bind(&self) -> Result<TcpListener> {
        self.config.validate()?;
        bind_tcp(self.config.bind_addr, self.config.backlog)
    }

    /// Accepts connections until shut down
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let watch = ShutdownWatch::new(self.shutdown_signal.subscribe())?;
        self.serve_until(listener, watch).await
    }

    /// Like [`serve`](Self::serve) with shutdown sources registered ahead of time
    ///
    /// Workers still running when the loop stops are left to finish on
    /// their own; they are neither awaited nor cancelled.
    pub async fn serve_until(
        &self,
        listener: TcpListener,
        mut watch: ShutdownWatch,
    ) -> Result<()> {
        let ip = describe_outbound_ipv4().await;
        let local = listener.local_addr().map_err(|source| SockError::Bind {
            target: self.config.bind_addr.to_string(),
            source,
        })?;
        info!(%ip, port = local.port(), address = %local, "Char-count server listening");

        let admission = self.config.max_connections.map(|n| Arc::new(Semaphore::new(n)));
        let connection_count = Arc::new(AtomicUsize::new(0));

        loop {
            match next_outcome(listener.accept(), &mut watch).await {
                AcceptOutcome::Connection((stream, addr)) => {
                    let permit = match &admission {
                        Some(semaphore) => match semaphore.clone().try_acquire_owned() {
                            Ok(permit) => Some(permit),
                            Err(_) => {
                                warn!(%addr, limit = ?self.config.max_connections, "Connection rejected: limit reached");
                                continue;
                            }
                        },
                        None => None,
                    };

                    let current = connection_count.fetch_add(1, Ordering::SeqCst) + 1;
                    info!(%addr, current, "Accepted connection");

                    let config = self.config.clone();
                    let connection_count = connection_count.clone();
                    let span = tracing::info_span!("connection", %addr);
                    tokio::spawn(async move {
                        match Self::handle_connection(stream, addr, &config).instrument(span).await {
                            Ok(count) => info!(%addr, count, "Sent count"),
                            Err(e) => error!(%addr, error = %e, "Error handling connection"),
                        }
                        drop(permit);
                        let remaining = connection_count.fetch_sub(1, Ordering::SeqCst) - 1;
                        info!(%addr, current = remaining, "Connection closed");
                    });
                }
                AcceptOutcome::Continue(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
                AcceptOutcome::Shutdown(reason) => {
                    info!(?reason, "Received shutdown signal, stopping server");
                    break;
                }
            }
        }

        info!(in_flight = connection_count.load(Ordering::SeqCst), "Char-count server stopped");
        Ok(())
    }

    /// Reads the whole request, then replies with its alphabetic count
    ///
    /// A request that is not valid UTF-8 gets no reply at all. The stream
    /// is dropped, and so closed, on every return path.
    async fn handle_connection(
        mut stream: TcpStream,
        addr: SocketAddr,
        config: &CharCountConfig,
    ) -> Result<usize> {
        let mut payload = BytesMut::with_capacity(config.buffer_size);
        let mut buffer = vec![0u8; config.buffer_size];

        loop {
            let n = within(config.read_timeout, "read", async {
                stream.read(&mut buffer).await.map_err(SockError::Receive)
            })
            .await?;

            if n == 0 {
                // Peer half-closed its write side
                break;
            }

            if let Some(limit) = config.max_request_size {
                if payload.len() + n > limit {
                    warn!(%addr, limit, "Request too large");
                    return Err(SockError::RequestTooLarge { limit });
                }
            }
            payload.extend_from_slice(&buffer[..n]);
        }

        info!(%addr, size = payload.len(), "Received request");

        let text = std::str::from_utf8(&payload)?;
        let count = count_alphabetic(text);
        let response = format_count_response(count);

        within(config.write_timeout, "write", async {
            stream
                .write_all(response.as_bytes())
                .await
                .map_err(SockError::Send)?;
            stream.flush().await.map_err(SockError::Send)
        })
        .await?;

        Ok(count)
    }
}

#[async_trait]
impl SocketServer for CharCountServer {
    async fn run(&self) -> Result<()> {
        let listener = self.bind()?;
        self.serve(listener).await
    }

    fn shutdown_signal(&self) -> broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }
}
