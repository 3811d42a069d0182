//! Base error types for pakt
//!
//! This module provides the foundation error types that all crates can use.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A hook file without the mandatory `.hook` extension
    #[error("Not a hook file (missing '.hook' extension): {}", path.display())]
    NotAHookFile {
        /// The offending path
        path: PathBuf,
    },

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
