use crate::common::ExchangeClient;
use crate::network::SocketPath;
use crate::unix::protocol::DEFAULT_BUFFER_SIZE;
use crate::{Result, SockError};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

/// Unix domain path-check client
///
/// # Examples
///
/// ```no_run
/// use sockpair::unix::PathCheckClient;
/// use sockpair::SocketPath;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let socket_path = SocketPath::parse("/tmp/check.sock")?;
///     let mut client = PathCheckClient::connect(&socket_path).await?;
///
///     let response = client.check("/etc/hostname").await?;
///     println!("Server response: {}", response);
///     Ok(())
/// }
/// ```
pub struct PathCheckClient {
    stream: UnixStream,
    buffer_size: usize,
}

impl PathCheckClient {
    /// Connects to a path-check server listening at `socket_path`
    pub async fn connect(socket_path: &SocketPath) -> Result<Self> {
        let target = format!("socket at '{socket_path}'");
        if !socket_path.as_path().exists() {
            return Err(SockError::Connection {
                target,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "socket path does not exist"),
            });
        }

        let stream = UnixStream::connect(socket_path)
            .await
            .map_err(|source| SockError::Connection { target, source })?;

        Ok(Self {
            stream,
            buffer_size: DEFAULT_BUFFER_SIZE,
        })
    }

    /// Sets the upper bound of the single reply read
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Asks the server whether `file_path` exists and returns its reply text
    pub async fn check(&mut self, file_path: &str) -> Result<String> {
        self.exchange_string(file_path).await
    }
}

#[async_trait]
impl ExchangeClient for PathCheckClient {
    /// Writes `payload` unframed and returns what a single read yields
    async fn exchange(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        self.stream.write_all(payload).await.map_err(SockError::Send)?;

        // No reassembly: a reply fits in one read by construction.
        let mut buffer = vec![0u8; self.buffer_size];
        let n = self.stream.read(&mut buffer).await.map_err(SockError::Receive)?;
        buffer.truncate(n);
        Ok(buffer)
    }
}
