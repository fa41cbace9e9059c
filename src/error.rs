//! Error types for PDF Decrypt MCP Server

use thiserror::Error;

/// Result type alias for PDF Decrypt MCP Server
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PDF Decrypt MCP Server
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file or directory not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// Incorrect password provided for a single trial
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Every candidate password was tried and rejected
    #[error("Decryption failed: no candidate password unlocked the document")]
    DecryptionFailed,

    /// Output path would overwrite the input file
    #[error("Output path would overwrite input: {path}")]
    OutputPathConflict { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// qpdf error
    #[error("qpdf error: {reason}")]
    QpdfError { reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (library errors, OS error text) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::PdfNotFound { path } => format!("File not found: {}", path),
            Error::InvalidPdf { .. } => "Invalid PDF file".to_string(),
            Error::IncorrectPassword => "Incorrect password".to_string(),
            Error::DecryptionFailed => {
                "Decryption failed: no candidate password unlocked the document".to_string()
            }
            Error::OutputPathConflict { .. } => {
                "Output path would overwrite the input file".to_string()
            }
            Error::Io(_) => "I/O error".to_string(),
            Error::Pdfium { .. } => "PDF processing error".to_string(),
            Error::QpdfError { .. } => "PDF processing error".to_string(),
            Error::Serialization(_) => "Serialization error".to_string(),
        }
    }
}
