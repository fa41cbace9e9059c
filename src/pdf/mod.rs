//! PDF container layer
//!
//! This module wraps the two PDF backends: qpdf for encryption probing
//! and password trials, PDFium for best-effort document metadata.

mod qpdf;
mod reader;

pub use qpdf::QpdfWrapper;
pub use reader::{PdfMetadataInfo, PdfReader};

#[cfg(test)]
pub(crate) mod test_support;
