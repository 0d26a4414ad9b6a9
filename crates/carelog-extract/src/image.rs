//! Image text extraction via Tesseract OCR.

use crate::error::{ExtractError, ExtractResult};

/// Run OCR over an image held in memory and return the recognized text.
///
/// The image is decoded with `image`, converted to the grayscale format
/// Tesseract expects, and recognized in the given language (fixed to one
/// language per deployment). Tesseract is synchronous; the whole pass runs
/// inside `spawn_blocking`.
pub async fn extract_image_text(data: Vec<u8>, language: &str) -> ExtractResult<String> {
    let lang = language.to_string();
    let size = data.len();

    let text = tokio::task::spawn_blocking(move || -> ExtractResult<String> {
        let img = image::load_from_memory(&data).map_err(|e| ExtractError::Image(e.to_string()))?;

        let grayscale = image::DynamicImage::ImageLuma8(img.to_luma8());
        let tesseract_image = rusty_tesseract::Image::from_dynamic_image(&grayscale)
            .map_err(|e| ExtractError::Ocr(e.to_string()))?;

        let args = rusty_tesseract::Args {
            lang,
            ..rusty_tesseract::Args::default()
        };
        rusty_tesseract::image_to_string(&tesseract_image, &args)
            .map_err(|e| ExtractError::Ocr(e.to_string()))
    })
    .await
    .map_err(|e| ExtractError::Task(e.to_string()))??;

    tracing::debug!(
        size_bytes = size,
        text_len = text.len(),
        "Image OCR complete"
    );

    Ok(text)
}
