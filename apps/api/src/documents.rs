//! Document decoding: turns uploaded PDF/DOCX bytes into plain text.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::errors::AppError;

/// Supported upload formats, dispatched on filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the kind from the uploaded filename.
    /// Anything other than `.pdf`/`.docx` is rejected up front.
    pub fn from_filename(name: &str) -> Result<Self, AppError> {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentKind::Docx)
        } else {
            Err(AppError::UnsupportedFormat(format!(
                "Unsupported file type: {name}"
            )))
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// Decoding capability. Production uses [`FileDecoder`]; tests substitute
/// mocks so the analysis pipeline can be exercised without real documents.
pub trait DocumentDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, AppError>;
}

/// Decoder backed by `pdf-extract` and `docx-rs`.
pub struct FileDecoder;

impl DocumentDecoder for FileDecoder {
    fn decode(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
        match kind {
            DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| AppError::Decode(format!("PDF extraction failed: {e}"))),
            DocumentKind::Docx => decode_docx(bytes),
        }
    }
}

/// Concatenates paragraph runs, one line per paragraph. Tables and other
/// non-paragraph content are skipped.
fn decode_docx(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::Decode(format!("DOCX parse failed: {e}")))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for pc in paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in run.children {
                        if let RunChild::Text(t) = rc {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
