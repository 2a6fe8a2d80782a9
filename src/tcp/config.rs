use super::protocol::{DEFAULT_BACKLOG, DEFAULT_BUFFER_SIZE};
use crate::{Result, SockError};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Char-count server configuration
///
/// The defaults reproduce the plain thread-per-connection server: no cap on
/// concurrent workers, no cap on request size and no timeouts.
///
/// # Examples
///
/// ```
/// use sockpair::tcp::CharCountConfig;
///
/// let config = CharCountConfig::new(9000).with_max_connections(64);
///
/// assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
/// assert_eq!(config.buffer_size, 4096);
/// assert_eq!(config.backlog, 5);
/// assert_eq!(config.max_connections, Some(64));
/// ```
#[derive(Debug, Clone)]
pub struct CharCountConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Chunk size for each read
    pub buffer_size: usize,
    /// Listen backlog
    pub backlog: u32,
    /// Maximum number of concurrent workers; `None` is unbounded
    pub max_connections: Option<usize>,
    /// Maximum accumulated request size; `None` is unbounded
    pub max_request_size: Option<usize>,
    /// Read timeout per connection
    pub read_timeout: Option<Duration>,
    /// Write timeout per connection
    pub write_timeout: Option<Duration>,
}

impl CharCountConfig {
    /// Listens on all IPv4 interfaces at `port`
    pub fn new(port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            buffer_size: DEFAULT_BUFFER_SIZE,
            backlog: DEFAULT_BACKLOG,
            max_connections: None,
            max_request_size: None,
            read_timeout: None,
            write_timeout: None,
        }
    }

    /// Rejects settings the server cannot run with
    ///
    /// A zero-sized read buffer would make every read look like end of file.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(SockError::Config("buffer size must be at least 1 byte".to_string()));
        }
        Ok(())
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    pub fn with_max_request_size(mut self, max_request_size: usize) -> Self {
        self.max_request_size = Some(max_request_size);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }
}

impl Default for CharCountConfig {
    fn default() -> Self {
        Self::new(0) // Use port 0 for testing
    }
}
