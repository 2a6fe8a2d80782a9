//! Addressing helpers

pub mod address;
pub mod local_ip;

pub use address::SocketPath;
pub use local_ip::{describe_outbound_ipv4, outbound_ipv4};
