use std::io;

use thiserror::Error;

/// Failures at the boundary of the parser. The grammar itself never fails;
/// these come from the line source or from converting the finished document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Utf8,
    Deserialize,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            message: message.into(),
        }
    }

    pub fn utf8(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Utf8,
            message: message.into(),
        }
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Deserialize,
            message: message.into(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::InvalidData => Error::utf8(format!("invalid utf-8: {err}")),
            _ => Error::io(format!("read failed: {err}")),
        }
    }
}
