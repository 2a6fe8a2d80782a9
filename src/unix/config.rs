use super::protocol::{DEFAULT_BACKLOG, DEFAULT_BUFFER_SIZE};
use crate::network::SocketPath;
use crate::{Result, SockError};
use std::time::Duration;

/// Path-check server configuration
///
/// # Examples
///
/// ```
/// use sockpair::unix::PathCheckConfig;
/// use sockpair::SocketPath;
/// use std::time::Duration;
///
/// let config = PathCheckConfig::new(SocketPath::parse("/tmp/check.sock").unwrap())
///     .with_buffer_size(2048)
///     .with_read_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.buffer_size, 2048);
/// assert_eq!(config.backlog, 1);
/// ```
#[derive(Debug, Clone)]
pub struct PathCheckConfig {
    /// Where the listening socket is created
    pub socket_path: SocketPath,
    /// Upper bound of the single read that carries the requested path
    pub buffer_size: usize,
    /// Listen backlog
    pub backlog: u32,
    /// Read timeout per connection; `None` waits forever
    pub read_timeout: Option<Duration>,
    /// Write timeout per connection; `None` waits forever
    pub write_timeout: Option<Duration>,
}

impl PathCheckConfig {
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            buffer_size: DEFAULT_BUFFER_SIZE,
            backlog: DEFAULT_BACKLOG,
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

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
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
