use carelog_core::models::{AnalysisOutcome, Record};
use carelog_core::AppError;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

/// Row shape for the records table; `analysis` is stored as JSONB.
#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    record_type: String,
    provider: String,
    record_date: DateTime<Utc>,
    file_url: String,
    file_name: String,
    original_filename: String,
    file_type: String,
    analysis: Json<AnalysisOutcome>,
    created_at: DateTime<Utc>,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Record {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            record_type: row.record_type,
            provider: row.provider,
            record_date: row.record_date,
            file_url: row.file_url,
            file_name: row.file_name,
            original_filename: row.original_filename,
            file_type: row.file_type,
            analysis: row.analysis.0,
            created_at: row.created_at,
        }
    }
}

/// Fields for one new record; the repository assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub user_id: Uuid,
    pub title: String,
    pub record_type: String,
    pub provider: String,
    pub record_date: DateTime<Utc>,
    pub file_url: String,
    pub file_name: String,
    pub original_filename: String,
    pub file_type: String,
    pub analysis: AnalysisOutcome,
}

/// Record repository
///
/// Create-and-return semantics; records are never updated after creation.
#[derive(Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_record: NewRecord) -> Result<Record, AppError> {
        let row: RecordRow = sqlx::query_as::<Postgres, RecordRow>(
            r#"
            INSERT INTO records (
                id, user_id, title, record_type, provider, record_date,
                file_url, file_name, original_filename, file_type, analysis, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_record.user_id)
        .bind(&new_record.title)
        .bind(&new_record.record_type)
        .bind(&new_record.provider)
        .bind(new_record.record_date)
        .bind(&new_record.file_url)
        .bind(&new_record.file_name)
        .bind(&new_record.original_filename)
        .bind(&new_record.file_type)
        .bind(Json(&new_record.analysis))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// List a user's records, newest document first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Record>, AppError> {
        let rows: Vec<RecordRow> = sqlx::query_as::<Postgres, RecordRow>(
            r#"
            SELECT * FROM records
            WHERE user_id = $1
            ORDER BY record_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Record::from).collect())
    }

    /// Fetch one record; ownership is part of the lookup, so another user's
    /// record behaves as absent.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Record>, AppError> {
        let row: Option<RecordRow> = sqlx::query_as::<Postgres, RecordRow>(
            r#"
            SELECT * FROM records
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Record::from))
    }

    /// Delete one record and return it (the caller removes the stored file).
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<Option<Record>, AppError> {
        let row: Option<RecordRow> = sqlx::query_as::<Postgres, RecordRow>(
            r#"
            DELETE FROM records
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Record::from))
    }
}
