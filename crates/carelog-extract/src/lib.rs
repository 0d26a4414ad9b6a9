//! Carelog Text Extraction Library
//!
//! Converts an uploaded file's binary content into plain text. PDF content
//! goes through pdf-extract; images go through Tesseract OCR. Dispatch is
//! by file extension; anything outside the supported set fails with
//! `ExtractError::UnsupportedFormat`. Extraction reads the source, never
//! modifies or deletes it, and performs no retries or timeouts of its own.

pub mod error;
mod image;
mod pdf;

use std::path::Path;

pub use error::{ExtractError, ExtractResult};

/// Extensions this extractor accepts, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "webp"];

/// Text extractor dispatching to PDF parsing or image OCR.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    /// Tesseract language code for image OCR (e.g. "eng").
    ocr_language: String,
}

impl TextExtractor {
    pub fn new(ocr_language: impl Into<String>) -> Self {
        Self {
            ocr_language: ocr_language.into(),
        }
    }

    /// Whether the given extension (lowercase) is handled at all.
    pub fn supports(extension: &str) -> bool {
        SUPPORTED_EXTENSIONS.contains(&extension)
    }

    /// Extract text from a file on disk, dispatching on its extension.
    pub async fn extract(&self, path: &Path) -> ExtractResult<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let data = tokio::fs::read(path).await?;
        self.extract_bytes(data, &extension).await
    }

    /// Extract text from in-memory content, dispatching on the extension.
    pub async fn extract_bytes(&self, data: Vec<u8>, extension: &str) -> ExtractResult<String> {
        match extension {
            "pdf" => pdf::extract_pdf_text(data).await,
            "png" | "jpg" | "jpeg" | "webp" => {
                image::extract_image_text(data, &self.ocr_language).await
            }
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new("eng")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let extractor = TextExtractor::default();
        let result = extractor.extract_bytes(b"MZ\x90\x00".to_vec(), "exe").await;
        match result {
            Err(ExtractError::UnsupportedFormat(ext)) => assert_eq!(ext, "exe"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let extractor = TextExtractor::default();
        let result = extractor
            .extract(Path::new("/nonexistent/report.pdf"))
            .await;
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[tokio::test]
    async fn test_extension_dispatch_is_case_insensitive() {
        let extractor = TextExtractor::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.EXE");
        tokio::fs::write(&path, b"not a document").await.unwrap();

        let result = extractor.extract(&path).await;
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_invalid_pdf_fails_without_panicking() {
        let extractor = TextExtractor::default();
        let result = extractor
            .extract_bytes(b"this is not a pdf".to_vec(), "pdf")
            .await;
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }

    #[tokio::test]
    async fn test_invalid_image_fails_without_panicking() {
        let extractor = TextExtractor::default();
        let result = extractor
            .extract_bytes(b"\x00\x01\x02\x03".to_vec(), "png")
            .await;
        assert!(matches!(result, Err(ExtractError::Image(_))));
    }

    #[test]
    fn test_supported_extensions() {
        for ext in ["pdf", "png", "jpg", "jpeg", "webp"] {
            assert!(TextExtractor::supports(ext), "{} should be supported", ext);
        }
        assert!(!TextExtractor::supports("exe"));
        assert!(!TextExtractor::supports("docx"));
    }
}
