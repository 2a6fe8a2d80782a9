//! TCP alphabetic character counting service

pub mod client;
pub mod config;
pub mod protocol;
pub mod server;
pub mod socket_builder;

#[cfg(test)]
mod tests;

pub use client::CharCountClient;
pub use config::CharCountConfig;
pub use protocol::{count_alphabetic, format_count_response, parse_count_response};
pub use server::CharCountServer;
