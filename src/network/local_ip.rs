use std::net::{IpAddr, Ipv4Addr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Shown when the outbound address cannot be determined
pub const UNKNOWN_IP: &str = "Unable to determine IP address";

// Connecting a UDP socket only selects a route; nothing is sent.
const ROUTE_PROBE: &str = "8.8.8.8:80";

/// Local IPv4 address the kernel would use for outbound traffic
pub async fn outbound_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await.ok()?;
    if let Err(e) = socket.connect(ROUTE_PROBE).await {
        debug!(error = %e, "No outbound route");
        return None;
    }
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Some(ip),
        _ => None,
    }
}

/// Outbound IPv4 as text, or [`UNKNOWN_IP`]
pub async fn describe_outbound_ipv4() -> String {
    outbound_ipv4()
        .await
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_describe_never_fails() {
        // Sandboxes without a default route get the placeholder.
        let text = describe_outbound_ipv4().await;
        assert!(text == UNKNOWN_IP || text.parse::<Ipv4Addr>().is_ok());
    }
}
