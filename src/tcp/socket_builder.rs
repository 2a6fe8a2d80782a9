use crate::{Result, SockError};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket};

/// Binds a TCP listener with `SO_REUSEADDR` and the given backlog
pub fn bind_tcp(addr: SocketAddr, backlog: u32) -> Result<TcpListener> {
    let bind_err = |source| SockError::Bind {
        target: addr.to_string(),
        source,
    };

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_err)?;

    socket.set_reuseaddr(true).map_err(bind_err)?;
    socket.bind(addr).map_err(bind_err)?;
    socket.listen(backlog).map_err(bind_err)
}
