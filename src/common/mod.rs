//! Pieces shared by both services
//!
//! The accept loop state machine, the server/client traits and the
//! optional-timeout helper live here.

pub mod accept;
pub mod io;
pub mod test_utils;
pub mod traits;

pub use accept::{AcceptOutcome, ShutdownReason, ShutdownWatch, next_outcome};
pub use io::within;
pub use test_utils::{RunningServer, spawn_char_count_server, spawn_path_check_server};
pub use traits::{ExchangeClient, SocketServer};
