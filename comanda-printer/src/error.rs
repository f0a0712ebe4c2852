//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrinterError {
    /// Device could not be opened
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Write attempted without an open connection
    #[error("Printer not connected")]
    NotConnected,

    /// The host cannot talk to USB printers at all
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Result type for printer operations
pub type PrinterResult<T> = Result<T, PrinterError>;
