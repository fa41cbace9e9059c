//! Test fixtures built in memory, so the suite carries no binary files.

use qpdf::{EncryptionParams, EncryptionParamsR6, PrintPermission, QPdf};

/// Build a minimal valid single-page PDF with a correct xref table.
pub(crate) fn minimal_pdf() -> Vec<u8> {
    let objects = [
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n",
        "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n",
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << >> >>\nendobj\n",
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for object in objects {
        offsets.push(out.len());
        out.push_str(object);
    }

    let xref_pos = out.len();
    out.push_str("xref\n0 4\n0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size 4 /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        xref_pos
    ));

    out.into_bytes()
}

/// Encrypt the minimal PDF with the given user password (AES-256).
pub(crate) fn encrypted_pdf(user_password: &str) -> Vec<u8> {
    encrypted_pdf_with_owner(user_password, user_password)
}

/// Encrypt the minimal PDF with distinct user and owner passwords.
/// An empty user password yields a document that opens without a
/// password but still carries the encryption flag.
pub(crate) fn encrypted_pdf_with_owner(user_password: &str, owner_password: &str) -> Vec<u8> {
    let qpdf = QPdf::read_from_memory(&minimal_pdf()).expect("minimal PDF must parse");

    let encryption = EncryptionParams::R6(EncryptionParamsR6 {
        user_password: user_password.to_string(),
        owner_password: owner_password.to_string(),
        allow_accessibility: true,
        allow_extract: true,
        allow_assemble: true,
        allow_annotate_and_form: true,
        allow_form_filling: true,
        allow_modify_other: true,
        allow_print: PrintPermission::Full,
        encrypt_metadata: true,
    });

    let mut writer = qpdf.writer();
    writer.encryption_params(encryption);
    writer
        .write_to_memory()
        .expect("encrypting minimal PDF must succeed")
}
