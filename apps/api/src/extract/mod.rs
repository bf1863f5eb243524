//! Text extraction from uploaded documents (PDF, DOCX, plain text).
//!
//! Best-effort: layout and tables are flattened into raw text.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::analysis::models::UploadedDocument;

pub mod docx;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Infers the document kind. The file extension wins; the declared media type is
    /// consulted only when the name carries no usable extension.
    pub fn detect(
        file_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Self, ExtractError> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        if let Some(ext) = extension.as_deref() {
            match ext {
                "pdf" => return Ok(DocumentKind::Pdf),
                "docx" => return Ok(DocumentKind::Docx),
                "txt" | "text" | "md" | "markdown" => return Ok(DocumentKind::PlainText),
                _ => {}
            }
        }

        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some(PDF_MIME) => Ok(DocumentKind::Pdf),
            Some(DOCX_MIME) => Ok(DocumentKind::Docx),
            Some(m) if m.starts_with("text/") => Ok(DocumentKind::PlainText),
            _ => Err(ExtractError::UnsupportedFormat(describe(file_name, content_type))),
        }
    }
}

fn describe(file_name: Option<&str>, content_type: Option<&str>) -> String {
    format!(
        "'{}' ({}); expected PDF, DOCX or plain text",
        file_name.unwrap_or("<unnamed>"),
        content_type.unwrap_or("no media type")
    )
}

/// Extracts plain text from an uploaded document.
///
/// PDF and DOCX parsing run on the blocking pool. An empty result is returned as-is.
pub async fn extract_text(document: &UploadedDocument) -> Result<String, ExtractError> {
    let kind = DocumentKind::detect(
        document.file_name.as_deref(),
        document.content_type.as_deref(),
    )?;

    let bytes = document.bytes.clone();
    let text = match kind {
        DocumentKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await??,
        DocumentKind::Docx => tokio::task::spawn_blocking(move || docx::extract_text(&bytes)).await??,
    };

    debug!(
        "Extracted {} chars from {:?} ({})",
        text.len(),
        kind,
        document.file_name.as_deref().unwrap_or("<unnamed>")
    );
    Ok(text)
}
