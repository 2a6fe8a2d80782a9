use crate::{Result, SockError};
use std::future::Future;
use tokio::signal::unix::{Signal, SignalKind, signal};
use tokio::sync::broadcast;

/// Why an accept loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Ctrl-C / SIGINT
    Interrupt,
    /// Internal shutdown signal sent through the server's broadcast channel
    Requested,
}

/// Result of one turn of an accept loop
///
/// An accept failure is not fatal: the loop logs it and goes back to
/// accepting without ever handling the faulted connection.
#[derive(Debug)]
pub enum AcceptOutcome<S> {
    /// A peer connected and should be handled
    Connection(S),
    /// Accepting failed; log and accept again
    Continue(SockError),
    /// Stop accepting
    Shutdown(ShutdownReason),
}

/// Both ways a server can be told to stop, registered once per server
///
/// The SIGINT handler is installed on construction. From then on an
/// interrupt is recorded even while nothing is waiting on it, and the next
/// [`recv`](Self::recv) returns immediately.
#[derive(Debug)]
pub struct ShutdownWatch {
    interrupt: Signal,
    shutdown_rx: broadcast::Receiver<()>,
}

impl ShutdownWatch {
    /// Installs the SIGINT handler; must be called inside a Tokio runtime
    pub fn new(shutdown_rx: broadcast::Receiver<()>) -> Result<Self> {
        let interrupt = signal(SignalKind::interrupt()).map_err(SockError::Signal)?;
        Ok(Self {
            interrupt,
            shutdown_rx,
        })
    }

    /// Waits until either an interrupt or the internal signal arrives
    ///
    /// Cancel safe, so it can sit in a `select!` next to other work.
    pub async fn recv(&mut self) -> ShutdownReason {
        tokio::select! {
            _ = self.interrupt.recv() => ShutdownReason::Interrupt,
            _ = self.shutdown_rx.recv() => ShutdownReason::Requested,
        }
    }
}

/// Races `accept` against the server's shutdown sources
pub async fn next_outcome<S, F>(accept: F, watch: &mut ShutdownWatch) -> AcceptOutcome<S>
where
    F: Future<Output = std::io::Result<S>>,
{
    tokio::select! {
        accept_result = accept => match accept_result {
            Ok(stream) => AcceptOutcome::Connection(stream),
            Err(e) => AcceptOutcome::Continue(SockError::Accept(e)),
        },
        reason = watch.recv() => AcceptOutcome::Shutdown(reason),
    }
}
