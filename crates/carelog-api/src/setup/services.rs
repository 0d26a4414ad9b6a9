//! Service and repository initialization

use anyhow::{Context, Result};
use carelog_ai::{GeminiClient, GeminiConfig, ReportAnalyzer};
use carelog_core::Config;
use carelog_db::{RecordRepository, UserRepository};
use carelog_extract::TextExtractor;
use carelog_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::state::{AppState, DbState, IntakeState};

/// Build the application state: repositories, extractor, and analyzer.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let records = RecordRepository::new(pool.clone());
    let users = UserRepository::new(pool.clone());

    let extractor = TextExtractor::new(config.ocr_language.clone());

    let model = GeminiClient::new(GeminiConfig {
        api_key: config.gemini_api_key.clone(),
        model: config.gemini_model.clone(),
        base_url: config.gemini_base_url.clone(),
    })
    .context("Failed to initialize generative model client")?;
    let analyzer = Arc::new(ReportAnalyzer::new(Arc::new(model)));

    tracing::info!(
        model = %config.gemini_model,
        ocr_language = %config.ocr_language,
        strict_mode = config.intake_strict_mode,
        "Intake services initialized"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        db: DbState {
            pool,
            records,
            users,
        },
        intake: IntakeState {
            storage,
            extractor,
            analyzer,
            max_upload_size: config.max_upload_size_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
            allowed_content_types: config.allowed_content_types.clone(),
            strict_mode: config.intake_strict_mode,
        },
    }))
}
