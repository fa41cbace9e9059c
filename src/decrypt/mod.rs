//! Decryption engine layer

mod engine;
mod passwords;

pub use engine::{
    decrypted_output_path, has_decrypted_suffix, BatchFileOutcome, BatchOutcome, DecryptEngine,
    DecryptionOutcome, EncryptionStatus, PdfFileEntry, DECRYPTED_SUFFIX, UNKNOWN_FIELD,
};
