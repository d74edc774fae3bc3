use std::{error, fmt, io};

/// Errors that can occur while decoding the start of a GIF stream.
#[non_exhaustive]
#[derive(Debug)]
pub enum ParseError {
    /// The byte source reported an error while being read.
    ReadFailure {
        /// The underlying error that caused the failure.
        source: io::Error,
    },

    /// The stream ended before a complete field group could be read.
    TruncatedStream {
        /// The number of bytes the field group needs.
        expected: usize,
        /// The number of bytes that were available.
        received: usize,
    },

    /// The first three bytes are not `GIF`.
    BadSignature {
        /// The bytes found where the signature should be.
        actual: [u8; 3],
    },

    /// The signature is valid, but the version is not in the allow-list.
    UnsupportedVersion {
        /// The bytes found where the version should be.
        actual: [u8; 3],
    },
}

/// The category of a [`ParseError`], for callers that only need to dispatch on it.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ParseError::ReadFailure`].
    ReadFailure,
    /// See [`ParseError::TruncatedStream`].
    TruncatedStream,
    /// See [`ParseError::BadSignature`].
    BadSignature,
    /// See [`ParseError::UnsupportedVersion`].
    UnsupportedVersion,
}

impl ParseError {
    /// The category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match *self {
            Self::ReadFailure { .. } => ErrorKind::ReadFailure,
            Self::TruncatedStream { .. } => ErrorKind::TruncatedStream,
            Self::BadSignature { .. } => ErrorKind::BadSignature,
            Self::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::ReadFailure { ref source } => Some(source),
            Self::TruncatedStream { .. }
            | Self::BadSignature { .. }
            | Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ReadFailure { .. } => "failed to read GIF data".fmt(f),
            Self::TruncatedStream { expected, received } => {
                write!(f, "stream too short (expected {expected} bytes, got {received})")
            }
            Self::BadSignature { actual } => {
                let actual = String::from_utf8_lossy(&actual).to_string();
                write!(f, "expected signature \"GIF\", got {actual:?}")
            }
            Self::UnsupportedVersion { actual } => {
                let actual = String::from_utf8_lossy(&actual).to_string();
                write!(f, "unsupported GIF version {actual:?}")
            }
        }
    }
}

/// A string could not be interpreted as a GIF version tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVersion {
    input: String,
}

impl InvalidVersion {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }
}

impl error::Error for InvalidVersion {}

impl fmt::Display for InvalidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid GIF version {:?} (expected 3 ASCII characters, e.g. \"89a\")",
            self.input
        )
    }
}
