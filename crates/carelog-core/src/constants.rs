//! Shared constants for the intake pipeline and record defaults.

/// Record type used when neither the request nor the analysis supplies one.
pub const DEFAULT_RECORD_TYPE: &str = "Other";

/// Provider used when the analysis does not name one.
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// Title of the fallback analysis substituted after an analysis failure.
pub const FALLBACK_TITLE: &str = "Uploaded Document";

/// Summary text of the fallback analysis.
pub const FALLBACK_SUMMARY: &str =
    "The document was saved, but automatic analysis was unavailable. \
     You can still view the original file from your records.";

/// Placeholder forwarded to the analyzer when text extraction fails.
pub const EXTRACTION_FAILED_TEXT: &str = "Text extraction failed.";

/// User-facing result when the analysis carries neither an answer nor a summary.
pub const GENERIC_COMPLETION_MESSAGE: &str =
    "Your document has been processed and saved to your records.";
