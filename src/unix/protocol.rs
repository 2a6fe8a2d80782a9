use std::path::Path;

/// Reply sent when the requested path is a regular file
pub const FILE_EXISTS: &str = "File exists.";
/// Reply sent for anything else
pub const FILE_MISSING: &str = "File does not exist.";

/// Size of the single read that carries a request or a reply
pub const DEFAULT_BUFFER_SIZE: usize = 1024;
/// Pending-connection queue length of the path-check listener
pub const DEFAULT_BACKLOG: u32 = 1;

/// Outcome of checking a path on the server's filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Exists,
    Missing,
}

impl PathStatus {
    /// Checks whether `path` resolves to a regular file
    ///
    /// Symlinks are followed. Directories, sockets, dangling links and
    /// paths that cannot be stat'ed at all are reported as missing.
    pub async fn probe(path: &Path) -> Self {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => PathStatus::Exists,
            _ => PathStatus::Missing,
        }
    }

    /// Literal reply text for this status
    pub fn response(self) -> &'static str {
        match self {
            PathStatus::Exists => FILE_EXISTS,
            PathStatus::Missing => FILE_MISSING,
        }
    }

    pub fn from_response(text: &str) -> Option<Self> {
        match text {
            FILE_EXISTS => Some(PathStatus::Exists),
            FILE_MISSING => Some(PathStatus::Missing),
            _ => None,
        }
    }
}
