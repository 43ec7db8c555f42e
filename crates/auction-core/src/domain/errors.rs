//! Errors - caller-facing error taxonomy
//!
//! Creation and point lookup report one of two kinds. Failures inside the
//! expiration cycle never leave the cycle; they only show up in logs.

use thiserror::Error;

/// ErrorKind is the coarse classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested record does not exist.
    NotFound,
    /// Store connectivity / query / write failure.
    InternalFailure,
}

/// AuctionError is returned by the repository's foreground operations.
#[derive(Debug, Error)]
pub enum AuctionError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalFailure(String),
}

impl AuctionError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalFailure(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuctionError::NotFound(_) => ErrorKind::NotFound,
            AuctionError::InternalFailure(_) => ErrorKind::InternalFailure,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InternalFailure => "internal_server_error",
        }
    }
}
