//! Application state.
//!
//! AppState is split into domain sub-states so the intake service and the
//! record handlers each see only what they need, instead of a single god
//! object with duplicate repositories.

use carelog_ai::ReportAnalyzer;
use carelog_core::Config;
use carelog_db::{RecordRepository, UserRepository};
use carelog_extract::TextExtractor;
use carelog_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub records: RecordRepository,
    pub users: UserRepository,
}

/// Everything the document intake pipeline needs: storage, extraction,
/// analysis, and the upload limits enforced before any of them run.
#[derive(Clone)]
pub struct IntakeState {
    pub storage: Arc<dyn Storage>,
    pub extractor: TextExtractor,
    pub analyzer: Arc<ReportAnalyzer>,
    pub max_upload_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    /// When true, extraction/analysis failures reject the upload instead of
    /// degrading to a fallback record.
    pub strict_mode: bool,
}

pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub intake: IntakeState,
}
