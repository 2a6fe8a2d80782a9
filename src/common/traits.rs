use crate::{Result, SockError};
use async_trait::async_trait;

/// Common trait for the socket servers
///
/// Both the path-check and char-count servers implement this trait.
#[async_trait]
pub trait SocketServer {
    /// Binds the listener and serves connections until shut down
    async fn run(&self) -> Result<()>;

    /// Returns a shutdown signal sender that can be used to stop the accept loop
    fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()>;
}

/// Common trait for one-shot request/response clients
///
/// Each client performs a single exchange per connection; calling
/// `exchange` twice on the same client is not meaningful for either
/// protocol since the server closes after replying.
#[async_trait]
pub trait ExchangeClient {
    /// Sends `payload` and returns the raw reply bytes
    async fn exchange(&mut self, payload: &[u8]) -> Result<Vec<u8>>;

    /// Sends a string and returns the reply decoded as UTF-8
    async fn exchange_string(&mut self, payload: &str) -> Result<String> {
        let response = self.exchange(payload.as_bytes()).await?;
        let text = std::str::from_utf8(&response).map_err(SockError::Decode)?;
        Ok(text.to_owned())
    }
}
