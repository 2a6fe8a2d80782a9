use crate::SockError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Filesystem address of a Unix domain socket
///
/// Only absolute paths are accepted. Validation is purely lexical; the path
/// need not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SocketPath(PathBuf);

impl SocketPath {
    /// Validates `raw` as a socket path
    ///
    /// # Examples
    ///
    /// ```
    /// use sockpair::SocketPath;
    ///
    /// assert!(SocketPath::parse("/tmp/check.sock").is_ok());
    /// assert!(SocketPath::parse("relative.sock").is_err());
    /// assert!(SocketPath::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, SockError> {
        if !raw.starts_with('/') {
            return Err(SockError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(PathBuf::from(raw)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for SocketPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for SocketPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl FromStr for SocketPath {
    type Err = SockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<PathBuf> for SocketPath {
    type Error = SockError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        if path.is_absolute() {
            Ok(Self(path))
        } else {
            Err(SockError::InvalidAddress(path.display().to_string()))
        }
    }
}
