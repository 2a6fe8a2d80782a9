//! Unix domain path-check service
//!
//! A client sends a filesystem path over a Unix stream socket; the server
//! answers whether that path is a regular file on its own filesystem.
//! There is no framing: the request is whatever a single read of up to
//! `buffer_size` bytes returns, and the reply is one of two literal strings.
//!
//! # Examples
//!
//! ```no_run
//! use sockpair::unix::{PathCheckClient, PathCheckConfig, PathCheckServer};
//! use sockpair::SocketPath;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let socket_path = SocketPath::parse("/tmp/check.sock")?;
//!     let server = PathCheckServer::new(PathCheckConfig::new(socket_path.clone()));
//!     let listener = server.bind()?;
//!     tokio::spawn(async move { server.serve(listener).await });
//!
//!     let mut client = PathCheckClient::connect(&socket_path).await?;
//!     assert_eq!(client.check("/definitely/not/here").await?, "File does not exist.");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod protocol;
pub mod server;
pub mod socket_builder;


pub use client::PathCheckClient;
pub use config::PathCheckConfig;
pub use protocol::{FILE_EXISTS, FILE_MISSING, PathStatus};
pub use server::PathCheckServer;
