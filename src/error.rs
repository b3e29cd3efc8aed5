/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Debug)]
pub enum Error {
    InvalidArgument(String),
    MalformedPattern {
        root: String,
        pattern: String,
        reason: String,
    },
    UnknownOperation {
        root: String,
        pattern: String,
        kind: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::MalformedPattern {
                root,
                pattern,
                reason,
            } => write!(f, "Malformed pattern '{}' under root '{}': {}", pattern, root, reason),
            Error::UnknownOperation {
                root,
                pattern,
                kind,
            } => write!(
                f,
                "Unrecognized operation kind '{}' on pattern '{}' under root '{}'",
                kind, pattern, root
            ),
        }
    }
}

impl std::error::Error for Error {}
