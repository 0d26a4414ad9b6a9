use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::analysis::AnalysisOutcome;

/// A persisted health record: one analyzed upload, owned by a user.
/// Created exactly once per (possibly degraded) upload; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub record_type: String,
    pub provider: String,
    /// Document date from the analysis when parseable, else ingestion time.
    pub record_date: DateTime<Utc>,
    pub file_url: String,
    /// Stored (uuid) filename under the upload directory.
    pub file_name: String,
    pub original_filename: String,
    /// MIME subtype of the upload (e.g. "pdf", "png").
    pub file_type: String,
    pub analysis: AnalysisOutcome,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub provider: String,
    pub date: DateTime<Utc>,
    pub file_url: String,
    pub file_name: String,
    pub original_filename: String,
    pub file_type: String,
    pub analysis: AnalysisOutcome,
    pub created_at: DateTime<Utc>,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        RecordResponse {
            id: record.id,
            title: record.title,
            record_type: record.record_type,
            provider: record.provider,
            date: record.record_date,
            file_url: record.file_url,
            file_name: record.file_name,
            original_filename: record.original_filename,
            file_type: record.file_type,
            analysis: record.analysis,
            created_at: record.created_at,
        }
    }
}
