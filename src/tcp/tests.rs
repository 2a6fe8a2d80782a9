use crate::common::{ExchangeClient, SocketServer, spawn_char_count_server};
use crate::tcp::{CharCountClient, CharCountConfig, CharCountServer};
use crate::SockError;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn loopback_config() -> CharCountConfig {
    CharCountConfig::default().with_bind_addr("127.0.0.1:0".parse().unwrap())
}

#[test]
fn test_config_default() {
    let config = CharCountConfig::default();
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:0");
    assert_eq!(config.buffer_size, 4096);
    assert_eq!(config.backlog, 5);
    assert!(config.max_connections.is_none());
    assert!(config.max_request_size.is_none());
    assert!(config.read_timeout.is_none());
}

#[tokio::test]
async fn test_server_new() {
    let server = CharCountServer::new(CharCountConfig::default());
    assert_eq!(server.shutdown_signal().receiver_count(), 0);
}

#[tokio::test]
async fn test_counts_alphabetic_characters() {
    let (server, addr) = spawn_char_count_server(loopback_config()).await.unwrap();

    for (input, expected) in [("abc123", 3), ("", 0), ("héllo", 5)] {
        let mut client = CharCountClient::connect(addr).await.unwrap();
        assert_eq!(client.count(input.as_bytes()).await.unwrap(), expected);
    }

    let mut client = CharCountClient::connect(addr).await.unwrap();
    assert_eq!(
        client.exchange_string("Hello, World!").await.unwrap(),
        "Alphabetic character count: 10"
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_payload_larger_than_one_chunk() {
    let config = loopback_config().with_buffer_size(16);
    let (server, addr) = spawn_char_count_server(config).await.unwrap();

    // Multi-byte characters straddle chunk boundaries; decoding happens once at EOF.
    let text = "añb1".repeat(1000);
    let mut client = CharCountClient::connect(addr).await.unwrap();
    assert_eq!(client.count(text.as_bytes()).await.unwrap(), 3000);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_invalid_utf8_closes_without_reply() {
    let (server, addr) = spawn_char_count_server(loopback_config()).await.unwrap();

    let mut client = CharCountClient::connect(addr).await.unwrap();
    let reply = client.exchange(&[b'a', 0xff, 0xfe, b'b']).await.unwrap();
    assert!(reply.is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_request_size_limit() {
    let config = loopback_config().with_max_request_size(8);
    let (server, addr) = spawn_char_count_server(config).await.unwrap();

    let mut client = CharCountClient::connect(addr).await.unwrap();
    assert_eq!(client.count(b"abcdefgh").await.unwrap(), 8);

    // Over the limit: the server drops the connection without a count.
    let mut raw = TcpStream::connect(addr).await.unwrap();
    raw.write_all(b"abcdefghi").await.unwrap();
    raw.shutdown().await.unwrap();
    let mut reply = Vec::new();
    let _ = raw.read_to_end(&mut reply).await;
    assert!(reply.is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_connection_limit_rejects_excess() {
    let config = loopback_config().with_max_connections(1);
    let (server, addr) = spawn_char_count_server(config).await.unwrap();

    // Holds the only slot: it never half-closes.
    let mut holder = TcpStream::connect(addr).await.unwrap();
    holder.write_all(b"held").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut rejected = TcpStream::connect(addr).await.unwrap();
    let mut reply = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), rejected.read_to_end(&mut reply))
        .await
        .expect("rejected connection should be closed promptly");
    assert!(read.is_err() || reply.is_empty());

    holder.shutdown().await.unwrap();
    let mut reply = Vec::new();
    holder.read_to_end(&mut reply).await.unwrap();
    assert_eq!(reply, b"Alphabetic character count: 4");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_connect_refused_is_connection_error() {
    // Bind then drop to find a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    match CharCountClient::connect(addr).await {
        Err(SockError::Connection { target, .. }) => assert_eq!(target, addr.to_string()),
        Err(other) => panic!("expected connection error, got {other:?}"),
        Ok(_) => panic!("expected connection error"),
    }
}

#[tokio::test]
async fn test_zero_buffer_size_is_rejected() {
    let config = loopback_config().with_buffer_size(0);
    assert!(matches!(config.validate(), Err(SockError::Config(_))));

    match spawn_char_count_server(config).await {
        Err(SockError::Config(_)) => {}
        Err(other) => panic!("expected config error, got {other:?}"),
        Ok(_) => panic!("server started with a zero-sized buffer"),
    }

    // One byte per read is slow but correct.
    let (server, addr) = spawn_char_count_server(loopback_config().with_buffer_size(1))
        .await
        .unwrap();
    let mut client = CharCountClient::connect(addr).await.unwrap();
    assert_eq!(client.count(b"hello").await.unwrap(), 5);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_does_not_wait_for_silent_client() {
    let (server, addr) = spawn_char_count_server(loopback_config()).await.unwrap();

    let _silent = TcpStream::connect(addr).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    tokio::time::timeout(Duration::from_secs(2), server.stop())
        .await
        .expect("accept loop did not stop")
        .unwrap();
}
