//! PDF text extraction using pdf-extract.

use crate::error::{ExtractError, ExtractResult};

/// Extract the concatenated textual content of a PDF held in memory.
///
/// pdf-extract is synchronous; the call is wrapped in `spawn_blocking`
/// so it never stalls the async runtime. Single pass, whole file in
/// memory, no streaming.
pub async fn extract_pdf_text(data: Vec<u8>) -> ExtractResult<String> {
    let size = data.len();
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data).map_err(|e| ExtractError::Pdf(e.to_string()))
    })
    .await
    .map_err(|e| ExtractError::Task(e.to_string()))??;

    tracing::debug!(
        size_bytes = size,
        text_len = text.len(),
        "PDF text extraction complete"
    );

    Ok(text)
}
