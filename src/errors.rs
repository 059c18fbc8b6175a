use thiserror::Error;

use crate::Position;

/// The result type for the `toka` crate.
pub type Result<T> = std::result::Result<T, TokaError>;

/// The error type for the `toka` crate.
#[derive(Error, Debug)]
pub struct TokaError {
    /// The source of the error.
    pub source: Box<TokaErrorKind>,
}

impl TokaError {
    /// Create a new `TokaError`.
    pub fn new(kind: TokaErrorKind) -> Self {
        TokaError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    #[inline]
    pub fn kind(&self) -> &TokaErrorKind {
        &self.source
    }
}

impl std::fmt::Display for TokaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum TokaErrorKind {
    /// No registered rule committed at the given character.
    /// The scan stops here, tokens committed so far stay in the token store.
    #[error("Unrecognized character {ch:?} at {position} (byte offset {offset})")]
    UnrecognizedCharacter {
        /// The character no rule could consume.
        ch: char,
        /// The position of the character.
        position: Position,
        /// The byte offset of the character.
        offset: usize,
    },

    /// A growable container could not reserve more memory.
    #[error("Allocation failure: {0}")]
    AllocationFailure(#[from] std::collections::TryReserveError),

    /// A std::io error occurred while reading a stream source.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// A stream source contained bytes that are not valid UTF-8.
    #[error("Invalid UTF-8 sequence at byte offset {0}")]
    InvalidUtf8(usize),

    /// A rule set configuration was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rule set configuration could not be read.
    #[cfg(feature = "serde")]
    #[error(transparent)]
    ConfigFormat(#[from] serde_json::Error),
}

impl From<std::io::Error> for TokaError {
    fn from(error: std::io::Error) -> Self {
        TokaError::new(TokaErrorKind::IoError(error))
    }
}

impl From<std::collections::TryReserveError> for TokaError {
    fn from(error: std::collections::TryReserveError) -> Self {
        TokaError::new(TokaErrorKind::AllocationFailure(error))
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for TokaError {
    fn from(error: serde_json::Error) -> Self {
        TokaError::new(TokaErrorKind::ConfigFormat(error))
    }
}
