//! qpdf FFI wrapper for PDF container operations
//!
//! This module provides encryption probing, password trials, and
//! re-encoding to an unencrypted container using the qpdf crate
//! (vendored FFI).

use crate::error::{Error, Result};
use qpdf::{QPdf, QPdfErrorCode};

/// Wrapper for qpdf operations via FFI
pub struct QpdfWrapper;

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    match e.error_code() {
        QPdfErrorCode::InvalidPassword => Error::IncorrectPassword,
        _ => Error::QpdfError {
            reason: e.to_string(),
        },
    }
}

impl QpdfWrapper {
    /// Probe whether a PDF requires a password to read page content.
    ///
    /// Returns `(is_encrypted, page_count)`. Documents sealed with an
    /// empty user password open without a password but still report the
    /// encryption flag; fully locked documents report a page count of 0.
    pub fn probe(data: &[u8]) -> Result<(bool, u32)> {
        match QPdf::read_from_memory(data) {
            Ok(doc) => {
                let page_count = doc.get_num_pages().map_err(map_qpdf_error)?;
                Ok((doc.is_encrypted(), page_count))
            }
            Err(e) => match e.error_code() {
                QPdfErrorCode::InvalidPassword => Ok((true, 0)),
                _ => Err(Error::InvalidPdf {
                    reason: e.to_string(),
                }),
            },
        }
    }

    /// Try a single password against an encrypted PDF.
    ///
    /// On success the pages are re-encoded into a fresh unencrypted
    /// container and returned as bytes. A rejected password surfaces as
    /// `Error::IncorrectPassword`.
    pub fn unlock(input_data: &[u8], password: &str) -> Result<Vec<u8>> {
        let qpdf =
            QPdf::read_from_memory_encrypted(input_data, password).map_err(map_qpdf_error)?;

        let mut writer = qpdf.writer();
        writer.preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }

    /// Get the page count of a PDF
    pub fn get_page_count(input_data: &[u8], password: Option<&str>) -> Result<u32> {
        let qpdf = match password {
            Some(pwd) => QPdf::read_from_memory_encrypted(input_data, pwd),
            None => QPdf::read_from_memory(input_data),
        }
        .map_err(map_qpdf_error)?;
        qpdf.get_num_pages().map_err(map_qpdf_error)
    }
}
