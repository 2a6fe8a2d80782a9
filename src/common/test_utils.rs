use crate::common::ShutdownWatch;
use crate::tcp::{CharCountConfig, CharCountServer};
use crate::unix::{PathCheckConfig, PathCheckServer};
use crate::{Result, SockError, SocketServer};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Handle to a server running in the background
pub struct RunningServer {
    pub handle: JoinHandle<Result<()>>,
    pub shutdown: broadcast::Sender<()>,
}

impl RunningServer {
    /// Sends the internal shutdown signal and waits for the accept loop to exit
    pub async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.handle.await?
    }
}

/// Binds a path-check server and runs it in the background
///
/// The socket is listening and the SIGINT handler installed by the time
/// this returns, so clients can connect immediately.
pub async fn spawn_path_check_server(config: PathCheckConfig) -> Result<RunningServer> {
    let server = PathCheckServer::new(config);
    let listener = server.bind()?;
    let shutdown = server.shutdown_signal();
    let watch = ShutdownWatch::new(shutdown.subscribe())?;
    let handle = tokio::spawn(async move { server.serve_until(listener, watch).await });
    Ok(RunningServer { handle, shutdown })
}

/// Binds a char-count server and runs it in the background
///
/// Returns an address clients can connect to; a wildcard bind address is
/// replaced with loopback.
pub async fn spawn_char_count_server(
    config: CharCountConfig,
) -> Result<(RunningServer, SocketAddr)> {
    let server = CharCountServer::new(config);
    let listener = server.bind()?;
    let mut addr = listener.local_addr().map_err(|source| SockError::Bind {
        target: server.config().bind_addr.to_string(),
        source,
    })?;
    if addr.ip().is_unspecified() {
        addr.set_ip(IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
    let shutdown = server.shutdown_signal();
    let watch = ShutdownWatch::new(shutdown.subscribe())?;
    let handle = tokio::spawn(async move { server.serve_until(listener, watch).await });
    Ok((RunningServer { handle, shutdown }, addr))
}
