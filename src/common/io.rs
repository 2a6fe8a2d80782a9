use crate::{Result, SockError};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Awaits `fut`, bounded by `limit` when one is configured
///
/// `None` waits forever, which is the default for both services: a silent
/// peer can hold a connection open indefinitely.
pub async fn within<T, F>(limit: Option<Duration>, op: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        Some(limit) => timeout(limit, fut)
            .await
            .map_err(|_| SockError::Timeout(format!("{op} timed out after {limit:?}")))?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unbounded_waits_for_result() {
        let value = within(None, "read", async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let result: Result<()> = within(Some(Duration::from_millis(10)), "read", async {
            std::future::pending::<()>().await;
            Ok(())
        })
        .await;

        match result {
            Err(SockError::Timeout(msg)) => assert!(msg.starts_with("read timed out")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inner_error_propagates() {
        let result: Result<()> = within(Some(Duration::from_secs(1)), "write", async {
            Err(SockError::Config("boom".into()))
        })
        .await;
        assert!(matches!(result, Err(SockError::Config(_))));
    }
}
