use std::fmt;

/// Result type shared by all langfuse CLI layers
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes, stable for scripts wrapping the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const CANCELLED: i32 = 3;
}

/// Error taxonomy for the CLI.
///
/// Each variant maps to exactly one exit code so that scripted callers can
/// branch on the process status instead of parsing stderr.
#[derive(Debug)]
pub enum Error {
    /// A required setting (host or public key) resolved from no source
    Config(String),

    /// Invalid input discovered after argument parsing (bad timestamps,
    /// malformed --var pairs, failing jq expressions)
    InvalidInput(String),

    /// The remote platform does not know the requested resource (HTTP 404)
    NotFound(String),

    /// Network or HTTP failure from the transport layer
    Transport(String),

    /// The system secret store rejected an explicit write or delete
    Secret(String),

    /// Interrupted by the user
    Cancelled,

    /// IO operation failed
    Io(std::io::Error),

    /// Unexpected internal failure
    Internal(anyhow::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NotFound(_) => exit_code::NOT_FOUND,
            Error::Cancelled => exit_code::CANCELLED,
            _ => exit_code::ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::InvalidInput(msg) => write!(f, "{}", msg),
            Error::NotFound(msg) => write!(f, "not found: {}", msg),
            Error::Transport(msg) => write!(f, "{}", msg),
            Error::Secret(msg) => write!(f, "secret store error: {}", msg),
            Error::Cancelled => write!(f, "cancelled"),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Internal(err) => write!(f, "internal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Internal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_taxonomy() {
        assert_eq!(Error::Config("x".into()).exit_code(), 1);
        assert_eq!(Error::Transport("x".into()).exit_code(), 1);
        assert_eq!(Error::NotFound("x".into()).exit_code(), 2);
        assert_eq!(Error::Cancelled.exit_code(), 3);
    }
}
