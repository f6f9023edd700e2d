use crate::error::{PipelineError, Result};
use chrono::Utc;
use lopdf::Document;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use voicedoc_core::DocumentFingerprint;

/// Full text of one extracted PDF plus its fingerprint. The retrieval
/// core only ever sees the text blob.
#[derive(Debug)]
pub struct ExtractedDocument {
    pub fingerprint: DocumentFingerprint,
    pub text: String,
}

/// Extract every page's text and concatenate it into a single blob.
/// Pages with no readable text are skipped; a PDF with no readable text
/// at all is an error.
pub fn extract_document(path: &Path) -> Result<ExtractedDocument> {
    let document =
        Document::load(path).map_err(|error| PipelineError::PdfParse(error.to_string()))?;

    let mut text = String::new();
    for (page_no, _page_id) in document.get_pages() {
        let page_text = document
            .extract_text(&[page_no])
            .map_err(|error| PipelineError::PdfParse(error.to_string()))?;

        if !page_text.trim().is_empty() {
            text.push_str(&page_text);
        }
    }

    if text.trim().is_empty() {
        return Err(PipelineError::PdfParse(format!(
            "pdf had no readable page text: {}",
            path.display()
        )));
    }

    Ok(ExtractedDocument {
        fingerprint: build_fingerprint(path)?,
        text,
    })
}

fn build_fingerprint(path: &Path) -> Result<DocumentFingerprint> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let checksum = format!("{:x}", hasher.finalize());

    let title = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document.pdf")
        .to_string();

    Ok(DocumentFingerprint {
        title,
        source_path: path.to_string_lossy().to_string(),
        checksum,
        extracted_at: Utc::now(),
    })
}
