use color_eyre::eyre::{Result, WrapErr};
use sockpair::common::{spawn_char_count_server, spawn_path_check_server};
use sockpair::tcp::{CharCountClient, CharCountConfig};
use sockpair::unix::{PathCheckClient, PathCheckConfig};
use sockpair::{ExchangeClient, SocketPath};
use std::time::Duration;
use tempfile::tempdir;

fn loopback() -> CharCountConfig {
    CharCountConfig::default().with_bind_addr("127.0.0.1:0".parse().unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_get_their_own_counts() -> Result<()> {
    let (server, addr) = spawn_char_count_server(loopback()).await?;

    let mut handles = Vec::new();
    for i in 0..10 {
        handles.push(tokio::spawn(async move {
            // Client i sends i+1 letters interleaved with digits.
            let payload: String = (0..=i).map(|_| "x1").collect();
            let mut client = CharCountClient::connect(addr).await?;
            let count = client.count(payload.as_bytes()).await?;
            assert_eq!(count, i + 1, "client {i} got someone else's count");
            Ok::<(), sockpair::SockError>(())
        }));
    }

    for handle in handles {
        handle.await.wrap_err("client task panicked")??;
    }

    server.stop().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_slow_client_does_not_block_others() -> Result<()> {
    let (server, addr) = spawn_char_count_server(loopback()).await?;

    // Never half-closes while the fast client runs.
    let slow = tokio::net::TcpStream::connect(addr).await?;

    let mut fast = CharCountClient::connect(addr).await?;
    let reply = tokio::time::timeout(Duration::from_secs(5), fast.exchange_string("quick"))
        .await
        .wrap_err("fast client was blocked by slow client")??;
    assert_eq!(reply, "Alphabetic character count: 5");

    drop(slow);
    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_streaming_a_file() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("input.txt");
    std::fs::write(&file_path, "Über 9000 Äpfel!\n".repeat(500))?;

    let (server, addr) = spawn_char_count_server(loopback()).await?;

    let file = tokio::fs::File::open(&file_path).await?;
    let mut client = CharCountClient::connect(addr).await?;
    let reply = client.send_reader(file).await?;
    assert_eq!(reply, b"Alphabetic character count: 4500");

    server.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_path_check_round_trip() -> Result<()> {
    let dir = tempdir()?;
    let socket_path = SocketPath::try_from(dir.path().join("server.sock"))?;
    let existing = dir.path().join("exists.txt");
    std::fs::write(&existing, b"hi")?;

    let server = spawn_path_check_server(PathCheckConfig::new(socket_path.clone())).await?;

    let mut client = PathCheckClient::connect(&socket_path).await?;
    assert_eq!(client.check(existing.to_str().unwrap()).await?, "File exists.");

    let mut client = PathCheckClient::connect(&socket_path).await?;
    let missing = dir.path().join("missing.txt");
    assert_eq!(client.check(missing.to_str().unwrap()).await?, "File does not exist.");

    server.stop().await?;
    assert!(!socket_path.as_path().exists(), "socket file left behind");
    Ok(())
}

#[tokio::test]
async fn test_path_check_default_buffer_truncates_at_1024_bytes() -> Result<()> {
    let dir = tempdir()?;
    let socket_path = SocketPath::try_from(dir.path().join("s.sock"))?;

    // Build a real file whose absolute path is exactly 1024 bytes long.
    let mut parent = dir.path().to_path_buf();
    while parent.as_os_str().len() < 1024 - 200 {
        parent.push("d".repeat(100));
    }
    std::fs::create_dir_all(&parent)?;
    let name_len = 1024 - parent.as_os_str().len() - 1;
    let file = parent.join("f".repeat(name_len));
    std::fs::write(&file, b"x")?;
    let file = file.to_str().unwrap().to_string();
    assert_eq!(file.len(), 1024);

    let server = spawn_path_check_server(PathCheckConfig::new(socket_path.clone())).await?;

    let mut client = PathCheckClient::connect(&socket_path).await?;
    let reply = client.check(&format!("{file}/beyond-the-buffer")).await?;
    assert_eq!(reply, "File exists.");

    server.stop().await?;
    Ok(())
}
