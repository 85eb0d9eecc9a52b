use std::fmt;

/// Result type for listcell-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when talking to host collaborators
#[derive(Debug)]
pub enum Error {
    /// IO operation failed (file-backed session store)
    Io(std::io::Error),

    /// JSON (de)serialization failed
    Json(serde_json::Error),

    /// Remote metadata or settings request failed
    Remote(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Remote(msg) => write!(f, "Remote request failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Remote(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
