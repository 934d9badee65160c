//! Document Text Extractor — turns an uploaded resume into plain text.
//!
//! Dispatch is on the case-sensitive filename suffix:
//! - `.pdf`  → PDF text extraction. Any failure (including a parser panic) yields `""`.
//! - `.docx` → DOCX paragraph text. Failures propagate to the caller.
//! - anything else → bytes decoded as UTF-8.
//!
//! PDF and DOCX parsing are CPU-bound and run on `spawn_blocking`.

use bytes::Bytes;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read DOCX document: {0}")]
    Docx(String),

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Which extraction routine a filename selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        if filename.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if filename.ends_with(".docx") {
            DocumentKind::Docx
        } else {
            DocumentKind::Text
        }
    }
}

/// Extracts plain text from an uploaded file.
pub async fn extract_text(filename: &str, data: Bytes) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_filename(filename);
    debug!("Extracting {} bytes from '{}' as {:?}", data.len(), filename, kind);

    match kind {
        DocumentKind::Pdf => {
            let result = tokio::task::spawn_blocking(move || pdf_to_text(&data)).await;
            match result {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(e)) => {
                    warn!("PDF extraction failed for '{filename}': {e}");
                    Ok(String::new())
                }
                Err(e) => {
                    warn!("PDF extraction aborted for '{filename}': {e}");
                    Ok(String::new())
                }
            }
        }
        DocumentKind::Docx => tokio::task::spawn_blocking(move || docx_to_text(&data)).await?,
        DocumentKind::Text => Ok(String::from_utf8_lossy(&data).into_owned()),
    }
}

fn pdf_to_text(data: &[u8]) -> Result<String, pdf_extract::OutputError> {
    pdf_extract::extract_text_from_mem(data)
}

/// Joins the text runs of each top-level paragraph, one paragraph per line.
fn docx_to_text(data: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(data).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(p) = child {
            let mut line = String::new();
            for p_child in &p.children {
                if let ParagraphChild::Run(run) = p_child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    Ok(paragraphs.join("\n"))
}
