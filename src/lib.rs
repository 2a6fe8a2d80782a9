use thiserror::Error;

/// Error types for the sockpair library
#[derive(Error, Debug)]
pub enum SockError {
    /// Socket path is empty or not absolute
    #[error("'{0}' is not a valid socket path. It must start with '/'.")]
    InvalidAddress(String),

    /// The server could not be reached
    #[error("Could not connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Listener could not be created
    #[error("Failed to bind {target}: {source}")]
    Bind {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Accepting a pending connection failed
    #[error("Failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    /// Writing to a peer failed
    #[error("Send error: {0}")]
    Send(#[source] std::io::Error),

    /// Reading from a peer failed
    #[error("Receive error: {0}")]
    Receive(#[source] std::io::Error),

    /// Payload was not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// Closing sockets or removing the socket file failed
    #[error("Cleanup error: {0}")]
    Cleanup(#[source] std::io::Error),

    /// A configured timeout elapsed
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Accumulated request exceeded the configured limit
    #[error("Request exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },

    /// Peer answered with something other than the expected reply
    #[error("Unexpected response: {0:?}")]
    Protocol(String),

    /// The SIGINT handler could not be installed
    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),

    /// A background server task panicked or was cancelled
    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for the sockpair library
pub type Result<T> = std::result::Result<T, SockError>;

pub mod common;
pub mod network;
pub mod tcp;
pub mod unix;

// Re-export main types for convenience
pub use common::{AcceptOutcome, ExchangeClient, ShutdownReason, ShutdownWatch, SocketServer};
pub use network::SocketPath;
pub use tcp::{CharCountClient, CharCountConfig, CharCountServer};
pub use unix::{PathCheckClient, PathCheckConfig, PathCheckServer, PathStatus};
