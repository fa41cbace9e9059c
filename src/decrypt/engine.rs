//! Decryption engine
//!
//! Owns the candidate password list and the primitive operations:
//! inspect a single file, decrypt a single file, decrypt a directory,
//! and list PDF files. The engine is constructed once at server
//! startup and holds no mutable state.

use crate::decrypt::passwords;
use crate::error::{Error, Result};
use crate::pdf::{PdfReader, QpdfWrapper};
use std::path::{Path, PathBuf};

/// Filename marker appended to the stem of engine-produced output files.
pub const DECRYPTED_SUFFIX: &str = "_decrypted";

/// Sentinel reported for metadata fields that are absent or unreadable.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Encryption status of a single file, derived per call
#[derive(Debug, Clone)]
pub struct EncryptionStatus {
    /// Whether a password is required to read page content
    pub is_encrypted: bool,
    /// Number of pages (0 when the document is locked)
    pub page_count: u32,
    pub title: String,
    pub author: String,
    pub creator: String,
    pub producer: String,
    /// File size in bytes
    pub file_size: u64,
}

/// Successful outcome of a single-file decryption
#[derive(Debug, Clone)]
pub struct DecryptionOutcome {
    /// Path of the file that was written
    pub output_path: PathBuf,
    /// Winning password; empty for unencrypted pass-through copies
    pub password_used: String,
    /// Whether the input carried the encryption flag
    pub was_encrypted: bool,
}

/// Per-file record inside a batch run
#[derive(Debug, Clone)]
pub struct BatchFileOutcome {
    pub file: String,
    pub success: bool,
    pub is_encrypted: Option<bool>,
    pub output_path: Option<String>,
    pub password_used: Option<String>,
    pub error: Option<String>,
}

/// Aggregated outcome of a batch run.
///
/// Counters are incremented only on terminal outcomes: a file that
/// fails inspection or decryption increments `failed_files` alone,
/// `processed_files` counts unencrypted copies plus successful
/// decryptions, and `encrypted_files`/`decrypted_files` count
/// successful decryptions only.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub total_files: u32,
    pub processed_files: u32,
    pub encrypted_files: u32,
    pub decrypted_files: u32,
    pub failed_files: u32,
    pub results: Vec<BatchFileOutcome>,
}

/// A PDF file found by a directory listing
#[derive(Debug, Clone)]
pub struct PdfFileEntry {
    pub name: String,
    pub path: String,
    pub size: u64,
    /// Last modified time (ISO 8601 format)
    pub modified: Option<String>,
    /// Whether the name carries the decrypted-output suffix
    pub is_decrypted: bool,
}

/// Derive the default output path: `<dir>/<stem>_decrypted.<ext>`
/// alongside the input.
pub fn decrypted_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "pdf".to_string());
    input.with_file_name(format!("{}{}.{}", stem, DECRYPTED_SUFFIX, ext))
}

/// Whether a filename stem ends with the decrypted-output suffix
pub fn has_decrypted_suffix(name: &str) -> bool {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().ends_with(DECRYPTED_SUFFIX))
        .unwrap_or(false)
}

fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Write the output file, creating parent directories if needed.
fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, data)?;
    Ok(())
}

/// Refuse output paths that would clobber the input. The derived
/// default never collides; this guards caller-supplied paths.
fn ensure_distinct(output: &Path, input: &Path) -> Result<()> {
    let same = match (std::fs::canonicalize(output), std::fs::canonicalize(input)) {
        (Ok(out), Ok(inp)) => out == inp,
        _ => output == input,
    };
    if same {
        return Err(Error::OutputPathConflict {
            path: output.display().to_string(),
        });
    }
    Ok(())
}

/// The decryption engine
pub struct DecryptEngine {
    passwords: Vec<String>,
}

impl DecryptEngine {
    /// Create an engine with the built-in candidate password list
    pub fn new() -> Self {
        Self::with_passwords(passwords::candidate_passwords())
    }

    /// Create an engine with a custom candidate password list
    pub fn with_passwords(passwords: Vec<String>) -> Self {
        Self { passwords }
    }

    /// The candidate passwords, in trial order
    pub fn candidate_passwords(&self) -> &[String] {
        &self.passwords
    }

    /// Inspect a file: encryption flag, page count, best-effort metadata.
    pub fn inspect<P: AsRef<Path>>(&self, path: P) -> Result<EncryptionStatus> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(Error::PdfNotFound {
                path: path.display().to_string(),
            });
        }

        let data = std::fs::read(path)?;
        let file_size = data.len() as u64;
        let (is_encrypted, page_count) = QpdfWrapper::probe(&data)?;

        // Metadata is best-effort: a locked or otherwise unreadable
        // document degrades to the unknown sentinel instead of failing.
        let meta = PdfReader::open_bytes(&data, None)
            .map(|reader| reader.metadata().clone())
            .unwrap_or_default();

        Ok(EncryptionStatus {
            is_encrypted,
            page_count,
            title: meta.title.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            author: meta.author.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            creator: meta.creator.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            producer: meta.producer.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            file_size,
        })
    }

    /// Decrypt a single file.
    ///
    /// Unencrypted inputs are copied verbatim to the output path with an
    /// empty `password_used`. Encrypted inputs are tried against the
    /// supplied password, or the full candidate list when none is given;
    /// the first accepted password wins and the pages are re-encoded
    /// into a fresh unencrypted container. The input file is never
    /// touched, and nothing is written unless a trial succeeds.
    pub fn decrypt_one<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Option<&Path>,
        password: Option<&str>,
    ) -> Result<DecryptionOutcome> {
        let input_path = input_path.as_ref();

        if !input_path.is_file() {
            return Err(Error::PdfNotFound {
                path: input_path.display().to_string(),
            });
        }

        let data = std::fs::read(input_path)?;
        let output_path = match output_path {
            Some(path) => path.to_path_buf(),
            None => decrypted_output_path(input_path),
        };
        ensure_distinct(&output_path, input_path)?;

        let (is_encrypted, _) = QpdfWrapper::probe(&data)?;

        if !is_encrypted {
            // Pass-through, not a no-op: the caller still gets an output
            // file, byte identical to the input.
            write_output(&output_path, &data)?;
            return Ok(DecryptionOutcome {
                output_path,
                password_used: String::new(),
                was_encrypted: false,
            });
        }

        let trials: Vec<&str> = match password {
            Some(pwd) => vec![pwd],
            None => self.passwords.iter().map(String::as_str).collect(),
        };

        for trial in trials {
            // A rejected or crashing trial is just a wrong password; the
            // next candidate still gets its turn.
            match QpdfWrapper::unlock(&data, trial) {
                Ok(decrypted) => {
                    write_output(&output_path, &decrypted)?;
                    return Ok(DecryptionOutcome {
                        output_path,
                        password_used: trial.to_string(),
                        was_encrypted: true,
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "password trial rejected");
                }
            }
        }

        Err(Error::DecryptionFailed)
    }

    /// Decrypt every PDF in a directory, skipping prior `_decrypted`
    /// outputs. One bad file never aborts the batch; its error is
    /// recorded per entry and iteration continues.
    pub fn decrypt_batch<P: AsRef<Path>>(
        &self,
        directory: P,
        password: Option<&str>,
    ) -> Result<BatchOutcome> {
        let directory = directory.as_ref();

        if !directory.is_dir() {
            return Err(Error::PdfNotFound {
                path: directory.display().to_string(),
            });
        }

        let mut candidates: Vec<(String, PathBuf)> = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue, // Skip entries we can't read
            };
            let path = entry.path();
            if !path.is_file() || !is_pdf_path(&path) {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if has_decrypted_suffix(&name) {
                continue;
            }
            candidates.push((name, path));
        }

        let mut outcome = BatchOutcome {
            total_files: candidates.len() as u32,
            ..BatchOutcome::default()
        };

        for (name, path) in candidates {
            let status = match self.inspect(&path) {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "inspection failed");
                    outcome.failed_files += 1;
                    outcome.results.push(BatchFileOutcome {
                        file: name,
                        success: false,
                        is_encrypted: None,
                        output_path: None,
                        password_used: None,
                        error: Some(e.client_message()),
                    });
                    continue;
                }
            };

            if !status.is_encrypted {
                outcome.processed_files += 1;
                outcome.results.push(BatchFileOutcome {
                    file: name,
                    success: true,
                    is_encrypted: Some(false),
                    output_path: None,
                    password_used: None,
                    error: None,
                });
                continue;
            }

            match self.decrypt_one(&path, None, password) {
                Ok(result) => {
                    outcome.processed_files += 1;
                    outcome.encrypted_files += 1;
                    outcome.decrypted_files += 1;
                    outcome.results.push(BatchFileOutcome {
                        file: name,
                        success: true,
                        is_encrypted: Some(true),
                        output_path: Some(result.output_path.display().to_string()),
                        password_used: Some(result.password_used),
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "decryption failed");
                    outcome.failed_files += 1;
                    outcome.results.push(BatchFileOutcome {
                        file: name,
                        success: false,
                        is_encrypted: Some(true),
                        output_path: None,
                        password_used: None,
                        error: Some(e.client_message()),
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// List PDF files in a directory. Engine-produced `_decrypted`
    /// outputs are excluded unless `include_decrypted` is set.
    pub fn list_files<P: AsRef<Path>>(
        &self,
        directory: P,
        include_decrypted: bool,
        pattern: Option<&glob::Pattern>,
    ) -> Result<Vec<PdfFileEntry>> {
        let directory = directory.as_ref();

        if !directory.is_dir() {
            return Err(Error::PdfNotFound {
                path: directory.display().to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let path = entry.path();
            if !path.is_file() || !is_pdf_path(&path) {
                continue;
            }

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let is_decrypted = has_decrypted_suffix(&name);
            if is_decrypted && !include_decrypted {
                continue;
            }
            if let Some(pat) = pattern {
                if !pat.matches(&name) {
                    continue;
                }
            }

            let metadata = std::fs::metadata(&path).ok();
            let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
            let modified = metadata
                .as_ref()
                .and_then(|m| m.modified().ok())
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| {
                    chrono::DateTime::from_timestamp(d.as_secs() as i64, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default()
                });

            files.push(PdfFileEntry {
                name,
                path: path.to_string_lossy().to_string(),
                size,
                modified,
                is_decrypted,
            });
        }

        // Sort by name for consistent ordering
        files.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(files)
    }
}

impl Default for DecryptEngine {
    fn default() -> Self {
        Self::new()
    }
}
