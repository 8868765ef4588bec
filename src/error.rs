//! Error types shared by the registry, formatter and readers.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Shortcut already registered: {0}")]
    DuplicateToken(String),

    #[error("Invalid log level: {0}")]
    InvalidSeverity(String),

    #[error("No acceptable keys were given")]
    NoChoices,

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
