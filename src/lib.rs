//! PDF Decrypt MCP Server Library
//!
//! This crate provides MCP tools for PDF decryption:
//! - `check_pdf_encryption`: Check whether a PDF is encrypted
//! - `decrypt_pdf`: Decrypt a single PDF, recovering the password from a candidate list
//! - `batch_decrypt_pdfs`: Decrypt every PDF in a directory
//! - `list_pdf_files`: List PDF files in a directory

pub mod decrypt;
pub mod error;
pub mod pdf;
pub mod server;

pub use decrypt::{DecryptEngine, DECRYPTED_SUFFIX};
pub use error::{Error, Result};
pub use server::{
    run_server, run_server_with_engine, BatchDecryptPdfsParams, BatchDecryptPdfsResult,
    CheckPdfEncryptionParams, CheckPdfEncryptionResult, DecryptPdfParams, DecryptPdfResult,
    DecryptServer, ListPdfFilesParams, ListPdfFilesResult, PdfFileInfo,
};
