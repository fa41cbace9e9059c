//! MCP Server implementation using rmcp

use crate::decrypt::{DecryptEngine, UNKNOWN_FIELD};
use anyhow::Result;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, service::RequestContext, tool, tool_handler, tool_router, RoleServer,
    ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Request/Response types for check_pdf_encryption
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckPdfEncryptionParams {
    /// Full path to the PDF file
    pub file_path: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CheckPdfEncryptionResult {
    /// Path that was inspected
    pub file_path: String,
    /// Whether a password is required to read page content
    pub is_encrypted: bool,
    /// Number of pages (0 when the document is locked)
    pub page_count: u32,
    /// Document title ("unknown" when absent or unreadable)
    pub title: String,
    /// Document author ("unknown" when absent or unreadable)
    pub author: String,
    /// Creating application ("unknown" when absent or unreadable)
    pub creator: String,
    /// Producing application ("unknown" when absent or unreadable)
    pub producer: String,
    /// File size in bytes
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for decrypt_pdf
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DecryptPdfParams {
    /// Full path to the input PDF
    pub input_path: String,
    /// Output file path (optional). Defaults to "<stem>_decrypted.<ext>"
    /// next to the input. Must not point at the input file.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Password to try (optional). When omitted, the built-in candidate
    /// password list is tried in order.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DecryptPdfResult {
    /// Path of the input file
    pub input_path: String,
    /// Whether an unencrypted output file was produced
    pub success: bool,
    /// Path of the file that was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// Winning password; empty for unencrypted pass-through copies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for batch_decrypt_pdfs
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BatchDecryptPdfsParams {
    /// Directory containing PDF files
    pub directory: String,
    /// Password to try for every encrypted file (optional). When
    /// omitted, the built-in candidate password list is tried per file.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BatchFileResult {
    /// Filename within the directory
    pub file: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_encrypted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BatchDecryptPdfsResult {
    /// Directory that was processed
    pub directory: String,
    /// Files matching the PDF filter (prior outputs excluded)
    pub total_files: u32,
    /// Files handled successfully (unencrypted copies plus decryptions)
    pub processed_files: u32,
    /// Encrypted files that were unlocked
    pub encrypted_files: u32,
    /// Decrypted output files written
    pub decrypted_files: u32,
    /// Files that failed inspection or decryption
    pub failed_files: u32,
    /// Per-file outcomes in directory enumeration order
    pub results: Vec<BatchFileResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for list_pdf_files
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListPdfFilesParams {
    /// Directory to search for PDF files
    pub directory: String,
    /// Include engine-produced "_decrypted" output files (default: false)
    #[serde(default)]
    pub include_decrypted: bool,
    /// Filename pattern to filter (e.g., "report*.pdf"). Supports glob patterns.
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PdfFileInfo {
    /// Filename only
    pub name: String,
    /// Full path to the PDF file
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Last modified time (ISO 8601 format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// Whether the name carries the "_decrypted" output suffix
    pub is_decrypted: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ListPdfFilesResult {
    /// Directory that was searched
    pub directory: String,
    /// List of PDF files found
    pub files: Vec<PdfFileInfo>,
    /// Total number of files found
    pub total_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Tool implementations
// ============================================================================

/// PDF Decrypt MCP Server
#[derive(Clone)]
pub struct DecryptServer {
    engine: Arc<DecryptEngine>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DecryptServer {
    pub fn new() -> Self {
        Self::with_engine(DecryptEngine::new())
    }

    /// Create a server around a specific engine instance
    pub fn with_engine(engine: DecryptEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            tool_router: Self::tool_router(),
        }
    }

    /// Check the encryption status of a PDF file
    #[tool(
        description = "Check whether a PDF file is encrypted and report basic document information (page count, title, author, creator, producer, file size). Metadata fields report \"unknown\" when the document is locked or carries no value."
    )]
    async fn check_pdf_encryption(
        &self,
        Parameters(params): Parameters<CheckPdfEncryptionParams>,
    ) -> String {
        let result = self
            .process_check_pdf_encryption(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "check_pdf_encryption failed");
                CheckPdfEncryptionResult {
                    file_path: params.file_path.clone(),
                    is_encrypted: false,
                    page_count: 0,
                    title: UNKNOWN_FIELD.to_string(),
                    author: UNKNOWN_FIELD.to_string(),
                    creator: UNKNOWN_FIELD.to_string(),
                    producer: UNKNOWN_FIELD.to_string(),
                    file_size: 0,
                    error: Some(e.client_message()),
                }
            });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// Decrypt a single PDF file
    #[tool(
        description = "Decrypt a single PDF file. If no password is supplied, a built-in list of candidate passwords is tried in order and the winning password is reported. Unencrypted files are copied verbatim to the output path. The output defaults to \"<stem>_decrypted.<ext>\" next to the input; the input file is never modified."
    )]
    async fn decrypt_pdf(&self, Parameters(params): Parameters<DecryptPdfParams>) -> String {
        let result = self
            .process_decrypt_pdf(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "decrypt_pdf failed");
                DecryptPdfResult {
                    input_path: params.input_path.clone(),
                    success: false,
                    output_path: None,
                    password_used: None,
                    message: None,
                    error: Some(e.client_message()),
                }
            });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// Decrypt every PDF in a directory
    #[tool(
        description = "Decrypt all PDF files in a directory. Files already carrying the \"_decrypted\" output suffix are skipped, so re-running the tool never re-processes its own outputs. One bad file never aborts the batch; per-file outcomes and aggregate counters are reported."
    )]
    async fn batch_decrypt_pdfs(
        &self,
        Parameters(params): Parameters<BatchDecryptPdfsParams>,
    ) -> String {
        let result = self
            .process_batch_decrypt_pdfs(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "batch_decrypt_pdfs failed");
                BatchDecryptPdfsResult {
                    directory: params.directory.clone(),
                    total_files: 0,
                    processed_files: 0,
                    encrypted_files: 0,
                    decrypted_files: 0,
                    failed_files: 0,
                    results: vec![],
                    error: Some(e.client_message()),
                }
            });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// List PDF files in a directory
    #[tool(
        description = "List PDF files in a directory. Engine-produced \"_decrypted\" output files are excluded unless include_decrypted is set. Supports glob pattern filtering on filenames."
    )]
    async fn list_pdf_files(&self, Parameters(params): Parameters<ListPdfFilesParams>) -> String {
        let result = self
            .process_list_pdf_files(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "list_pdf_files failed");
                ListPdfFilesResult {
                    directory: params.directory.clone(),
                    files: vec![],
                    total_count: 0,
                    error: Some(e.client_message()),
                }
            });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }
}

impl DecryptServer {
    async fn process_check_pdf_encryption(
        &self,
        params: &CheckPdfEncryptionParams,
    ) -> crate::error::Result<CheckPdfEncryptionResult> {
        let engine = Arc::clone(&self.engine);
        let file_path = params.file_path.clone();

        let status = tokio::task::spawn_blocking(move || engine.inspect(Path::new(&file_path)))
            .await
            .map_err(|e| crate::error::Error::Pdfium {
                reason: format!("Task join error: {}", e),
            })??;

        Ok(CheckPdfEncryptionResult {
            file_path: params.file_path.clone(),
            is_encrypted: status.is_encrypted,
            page_count: status.page_count,
            title: status.title,
            author: status.author,
            creator: status.creator,
            producer: status.producer,
            file_size: status.file_size,
            error: None,
        })
    }

    async fn process_decrypt_pdf(
        &self,
        params: &DecryptPdfParams,
    ) -> crate::error::Result<DecryptPdfResult> {
        let engine = Arc::clone(&self.engine);
        let input_path = params.input_path.clone();
        let output_path = params.output_path.clone();
        let password = params.password.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            engine.decrypt_one(
                Path::new(&input_path),
                output_path.as_deref().map(Path::new),
                password.as_deref(),
            )
        })
        .await
        .map_err(|e| crate::error::Error::Pdfium {
            reason: format!("Task join error: {}", e),
        })??;

        let message = if outcome.was_encrypted {
            "PDF decrypted successfully"
        } else {
            "PDF was not encrypted; copied verbatim"
        };

        Ok(DecryptPdfResult {
            input_path: params.input_path.clone(),
            success: true,
            output_path: Some(outcome.output_path.display().to_string()),
            password_used: Some(outcome.password_used),
            message: Some(message.to_string()),
            error: None,
        })
    }

    async fn process_batch_decrypt_pdfs(
        &self,
        params: &BatchDecryptPdfsParams,
    ) -> crate::error::Result<BatchDecryptPdfsResult> {
        let engine = Arc::clone(&self.engine);
        let directory = params.directory.clone();
        let password = params.password.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            engine.decrypt_batch(Path::new(&directory), password.as_deref())
        })
        .await
        .map_err(|e| crate::error::Error::Pdfium {
            reason: format!("Task join error: {}", e),
        })??;

        Ok(BatchDecryptPdfsResult {
            directory: params.directory.clone(),
            total_files: outcome.total_files,
            processed_files: outcome.processed_files,
            encrypted_files: outcome.encrypted_files,
            decrypted_files: outcome.decrypted_files,
            failed_files: outcome.failed_files,
            results: outcome
                .results
                .into_iter()
                .map(|r| BatchFileResult {
                    file: r.file,
                    success: r.success,
                    is_encrypted: r.is_encrypted,
                    output_path: r.output_path,
                    password_used: r.password_used,
                    error: r.error,
                })
                .collect(),
            error: None,
        })
    }

    async fn process_list_pdf_files(
        &self,
        params: &ListPdfFilesParams,
    ) -> crate::error::Result<ListPdfFilesResult> {
        let engine = Arc::clone(&self.engine);
        let directory = params.directory.clone();
        let include_decrypted = params.include_decrypted;
        let pattern = params
            .pattern
            .as_ref()
            .and_then(|p| glob::Pattern::new(p).ok());

        let entries = tokio::task::spawn_blocking(move || {
            engine.list_files(Path::new(&directory), include_decrypted, pattern.as_ref())
        })
        .await
        .map_err(|e| crate::error::Error::Pdfium {
            reason: format!("Task join error: {}", e),
        })??;

        let files: Vec<PdfFileInfo> = entries
            .into_iter()
            .map(|f| PdfFileInfo {
                name: f.name,
                path: f.path,
                size: f.size,
                modified: f.modified,
                is_decrypted: f.is_decrypted,
            })
            .collect();

        let total_count = files.len() as u32;

        Ok(ListPdfFilesResult {
            directory: params.directory.clone(),
            files,
            total_count,
            error: None,
        })
    }

    fn guide_for_operation(operation: &str) -> &'static str {
        match operation {
            "single" => GUIDE_SINGLE,
            "batch" => GUIDE_BATCH,
            _ => GUIDE_GENERAL,
        }
    }
}

impl Default for DecryptServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for DecryptServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "PDF Decrypt MCP Server provides tools for checking PDF encryption status, \
                 recovering passwords from a candidate list, and decrypting single files or \
                 whole directories. Decrypted copies are written alongside the inputs with a \
                 \"_decrypted\" suffix; input files are never modified."
                    .into(),
            ),
        }
    }

    /// No resources are exposed; tools operate on caller-supplied paths
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: Vec::new(),
            next_cursor: None,
            meta: Default::default(),
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult {
            prompts: vec![Prompt::new(
                "decrypt_pdf_guide",
                Some("Guide for PDF decryption operations"),
                Some(vec![PromptArgument {
                    name: "operation".to_string(),
                    title: None,
                    description: Some("Operation type: single, batch, or general".to_string()),
                    required: Some(false),
                }]),
            )],
            next_cursor: None,
            meta: Default::default(),
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        if request.name != "decrypt_pdf_guide" {
            return Err(ErrorData::invalid_params(
                format!("Unknown prompt: {}", request.name),
                None,
            ));
        }

        let operation = request
            .arguments
            .as_ref()
            .and_then(|args| args.get("operation"))
            .and_then(|v| v.as_str())
            .unwrap_or("general");

        Ok(GetPromptResult {
            description: Some(format!("PDF decryption guide - {}", operation)),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(Self::guide_for_operation(operation)),
            }],
            meta: Default::default(),
        })
    }
}

// ============================================================================
// Guide prompt content
// ============================================================================

const GUIDE_GENERAL: &str = r#"# PDF Decryption Service Guide

## Overview

This MCP server provides the following PDF decryption features:

1. **Check encryption status** - whether a PDF is encrypted, plus basic document information
2. **Single PDF decryption** - decrypt one PDF file
3. **Batch PDF decryption** - decrypt every PDF file in a directory
4. **List PDF files** - list the PDF files in a directory

## Tools

- `check_pdf_encryption` - check encryption status
- `decrypt_pdf` - decrypt a single PDF file
- `batch_decrypt_pdfs` - batch decrypt PDF files
- `list_pdf_files` - list PDF files

## Tips

- If no password is supplied, a list of common candidate passwords is tried in order
- Decrypted copies are written with a "_decrypted" suffix appended to the filename
- Non-ASCII paths and filenames are supported

## Notes

- Make sure there is enough disk space for the decrypted copies
- Decryption never modifies the original files
- Strongly encrypted PDFs may require their specific password
"#;

const GUIDE_SINGLE: &str = r#"# Single PDF Decryption Guide

## Steps

1. Use the `check_pdf_encryption` tool to check whether the PDF file is encrypted
2. If the file is encrypted, use the `decrypt_pdf` tool to decrypt it

## Tool parameters

### check_pdf_encryption
- `file_path`: full path to the PDF file

### decrypt_pdf
- `input_path`: full path to the input PDF file
- `output_path`: full path for the output PDF file (optional)
- `password`: decryption password (optional)

## Examples

```json
{
  "tool": "check_pdf_encryption",
  "arguments": {
    "file_path": "/path/to/encrypted.pdf"
  }
}
```

```json
{
  "tool": "decrypt_pdf",
  "arguments": {
    "input_path": "/path/to/encrypted.pdf",
    "output_path": "/path/to/decrypted.pdf"
  }
}
```
"#;

const GUIDE_BATCH: &str = r#"# Batch PDF Decryption Guide

## Steps

1. Use the `list_pdf_files` tool to see the PDF files in a directory
2. Use the `batch_decrypt_pdfs` tool to decrypt every PDF file in the directory

## Tool parameters

### list_pdf_files
- `directory`: directory path
- `include_decrypted`: whether to include already-decrypted output files (optional)

### batch_decrypt_pdfs
- `directory`: directory containing PDF files
- `password`: decryption password (optional)

## Examples

```json
{
  "tool": "list_pdf_files",
  "arguments": {
    "directory": "/path/to/pdfs"
  }
}
```

```json
{
  "tool": "batch_decrypt_pdfs",
  "arguments": {
    "directory": "/path/to/pdfs"
  }
}
```
"#;

/// Run the MCP server with the built-in candidate password list
pub async fn run_server() -> Result<()> {
    run_server_with_engine(DecryptEngine::new()).await
}

/// Run the MCP server around a specific engine instance
pub async fn run_server_with_engine(engine: DecryptEngine) -> Result<()> {
    let server = DecryptServer::with_engine(engine);

    tracing::info!("PDF Decrypt MCP Server ready, waiting for connections...");

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::{encrypted_pdf, minimal_pdf};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_params_deserialization_defaults() {
        let json = r#"{ "input_path": "/test.pdf" }"#;
        let params: DecryptPdfParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.input_path, "/test.pdf");
        assert_eq!(params.output_path, None);
        assert_eq!(params.password, None);

        let json = r#"{ "directory": "/pdfs" }"#;
        let params: ListPdfFilesParams = serde_json::from_str(json).unwrap();
        assert!(!params.include_decrypted);
        assert_eq!(params.pattern, None);
    }

    #[test]
    fn test_required_arguments_are_enforced_by_schema() {
        // Missing required fields fail deserialization, so the tool
        // router rejects the call before any engine work happens.
        assert!(serde_json::from_str::<DecryptPdfParams>("{}").is_err());
        assert!(serde_json::from_str::<CheckPdfEncryptionParams>("{}").is_err());
        assert!(serde_json::from_str::<BatchDecryptPdfsParams>("{}").is_err());
        assert!(serde_json::from_str::<ListPdfFilesParams>("{}").is_err());
    }

    #[test]
    fn test_guide_for_operation() {
        assert!(DecryptServer::guide_for_operation("single").contains("decrypt_pdf"));
        assert!(DecryptServer::guide_for_operation("batch").contains("batch_decrypt_pdfs"));
        // Anything else falls back to the general guide.
        assert!(DecryptServer::guide_for_operation("general").contains("Overview"));
        assert!(DecryptServer::guide_for_operation("bogus").contains("Overview"));
    }

    #[tokio::test]
    async fn test_process_check_pdf_encryption() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "plain.pdf", &minimal_pdf());

        let server = DecryptServer::new();
        let params = CheckPdfEncryptionParams {
            file_path: path.to_string_lossy().to_string(),
        };

        let result = server.process_check_pdf_encryption(&params).await.unwrap();
        assert!(result.error.is_none());
        assert!(!result.is_encrypted);
        assert_eq!(result.page_count, 1);
    }

    #[tokio::test]
    async fn test_process_decrypt_pdf_with_candidate_password() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "locked.pdf", &encrypted_pdf("123456"));

        let server = DecryptServer::new();
        let params = DecryptPdfParams {
            input_path: path.to_string_lossy().to_string(),
            output_path: None,
            password: None,
        };

        let result = server.process_decrypt_pdf(&params).await.unwrap();
        assert!(result.success);
        assert_eq!(result.password_used.as_deref(), Some("123456"));
        assert!(dir.path().join("locked_decrypted.pdf").exists());
    }

    #[tokio::test]
    async fn test_process_batch_decrypt_pdfs() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.pdf", &minimal_pdf());
        write_file(&dir, "b.pdf", &encrypted_pdf("123456"));

        let server = DecryptServer::new();
        let params = BatchDecryptPdfsParams {
            directory: dir.path().to_string_lossy().to_string(),
            password: None,
        };

        let result = server.process_batch_decrypt_pdfs(&params).await.unwrap();
        assert!(result.error.is_none());
        assert_eq!(result.total_files, 2);
        assert_eq!(result.processed_files, 2);
        assert_eq!(result.encrypted_files, 1);
        assert_eq!(result.decrypted_files, 1);
        assert_eq!(result.failed_files, 0);
    }

    #[tokio::test]
    async fn test_process_list_pdf_files() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.pdf", &minimal_pdf());
        write_file(&dir, "a_decrypted.pdf", &minimal_pdf());

        let server = DecryptServer::new();

        let params = ListPdfFilesParams {
            directory: dir.path().to_string_lossy().to_string(),
            include_decrypted: false,
            pattern: None,
        };
        let result = server.process_list_pdf_files(&params).await.unwrap();
        assert_eq!(result.total_count, 1);
        assert_eq!(result.files[0].name, "a.pdf");

        let params = ListPdfFilesParams {
            directory: dir.path().to_string_lossy().to_string(),
            include_decrypted: true,
            pattern: None,
        };
        let result = server.process_list_pdf_files(&params).await.unwrap();
        assert_eq!(result.total_count, 2);
    }

    #[tokio::test]
    async fn test_tool_error_becomes_structured_payload() {
        let server = DecryptServer::new();
        let response = server
            .check_pdf_encryption(Parameters(CheckPdfEncryptionParams {
                file_path: "/nonexistent/file.pdf".to_string(),
            }))
            .await;

        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        let result = &value["results"][0];
        assert!(result["error"].is_string());
        assert_eq!(result["is_encrypted"], false);
    }

    #[tokio::test]
    async fn test_decrypt_tool_failure_reports_error_field() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "locked.pdf", &encrypted_pdf("xyz-unknown"));

        let server = DecryptServer::new();
        let response = server
            .decrypt_pdf(Parameters(DecryptPdfParams {
                input_path: path.to_string_lossy().to_string(),
                output_path: None,
                password: None,
            }))
            .await;

        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        let result = &value["results"][0];
        assert_eq!(result["success"], false);
        assert!(result["error"].is_string());
        assert!(!dir.path().join("locked_decrypted.pdf").exists());
    }

    #[test]
    fn test_decrypt_server_default() {
        let server = DecryptServer::default();
        let _ = server;
    }
}
