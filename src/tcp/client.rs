use super::protocol::parse_count_response;
use crate::common::ExchangeClient;
use crate::{Result, SockError};
use async_trait::async_trait;
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

/// TCP client for the char-count server
///
/// # Examples
///
/// Counting an in-memory string:
///
/// ```no_run
/// use sockpair::tcp::CharCountClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = CharCountClient::connect("127.0.0.1:9000").await?;
///     let count = client.count(b"hello, world").await?;
///     assert_eq!(count, 10);
///     Ok(())
/// }
/// ```
///
/// Streaming a file:
///
/// ```no_run
/// use sockpair::tcp::CharCountClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let file = tokio::fs::File::open("notes.txt").await?;
///     let mut client = CharCountClient::connect("127.0.0.1:9000").await?;
///     let response = client.send_reader(file).await?;
///     println!("{}", String::from_utf8_lossy(&response));
///     Ok(())
/// }
/// ```
pub struct CharCountClient {
    stream: TcpStream,
}

impl CharCountClient {
    /// Connects to a char-count server
    pub async fn connect<A>(addr: A) -> Result<Self>
    where
        A: ToSocketAddrs + fmt::Display,
    {
        let target = addr.to_string();
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| SockError::Connection { target, source })?;
        Ok(Self { stream })
    }

    /// Streams `reader` to the server, half-closes, and returns the full reply
    ///
    /// The reply is empty when the server rejected the request (for example
    /// because it was not valid UTF-8).
    pub async fn send_reader<R>(&mut self, mut reader: R) -> Result<Vec<u8>>
    where
        R: AsyncRead + Unpin + Send,
    {
        tokio::io::copy(&mut reader, &mut self.stream)
            .await
            .map_err(SockError::Send)?;
        self.finish().await
    }

    /// Sends `data` and parses the count out of the reply
    pub async fn count(&mut self, data: &[u8]) -> Result<usize> {
        let response = self.exchange(data).await?;
        let text = std::str::from_utf8(&response)?;
        parse_count_response(text).ok_or_else(|| SockError::Protocol(text.to_string()))
    }

    async fn finish(&mut self) -> Result<Vec<u8>> {
        // Half-close: the server reads until EOF before answering.
        self.stream.shutdown().await.map_err(SockError::Send)?;

        let mut response = Vec::new();
        self.stream
            .read_to_end(&mut response)
            .await
            .map_err(SockError::Receive)?;
        Ok(response)
    }
}

#[async_trait]
impl ExchangeClient for CharCountClient {
    async fn exchange(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        self.stream.write_all(payload).await.map_err(SockError::Send)?;
        self.finish().await
    }
}
