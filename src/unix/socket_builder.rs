// Unix domain listener creation
//
// std binds with a fixed kernel backlog, so the backlog is re-applied with
// listen(2) on the bound descriptor before handing it to tokio. Linux accepts
// a second listen() on a listening socket and only updates the queue length.
//
// An entry already at the socket path is replaced only if nothing answers on
// it. The probe, remove and rebind steps are not atomic: two servers started
// against the same path at the same moment can still race.

use crate::{Result, SockError};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use tokio::net::UnixListener;
use tracing::warn;

/// Binds a non-blocking Unix stream listener at `path` with `backlog`
pub fn bind_unix(path: &Path, backlog: u32) -> Result<UnixListener> {
    let bind_err = |source| SockError::Bind {
        target: path.display().to_string(),
        source,
    };

    let std_listener = match bind_with_backlog(path, backlog) {
        Ok(listener) => listener,
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            if std::os::unix::net::UnixStream::connect(path).is_ok() {
                return Err(bind_err(e));
            }
            warn!(socket_path = %path.display(), "Removing stale entry at socket path");
            std::fs::remove_file(path).map_err(bind_err)?;
            bind_with_backlog(path, backlog).map_err(bind_err)?
        }
        Err(e) => return Err(bind_err(e)),
    };

    std_listener.set_nonblocking(true).map_err(bind_err)?;
    UnixListener::from_std(std_listener).map_err(bind_err)
}

fn bind_with_backlog(path: &Path, backlog: u32) -> io::Result<std::os::unix::net::UnixListener> {
    let listener = std::os::unix::net::UnixListener::bind(path)?;
    let backlog = libc::c_int::try_from(backlog).unwrap_or(libc::c_int::MAX);
    // Safety: the descriptor is owned by `listener` and stays open for the call.
    let rc = unsafe { libc::listen(listener.as_raw_fd(), backlog) };
    if rc == -1 {
        let err = io::Error::last_os_error();
        drop(listener);
        let _ = std::fs::remove_file(path);
        return Err(err);
    }
    Ok(listener)
}
