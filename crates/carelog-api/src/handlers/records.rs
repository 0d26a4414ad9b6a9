//! Record management handlers: list, fetch, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use carelog_core::models::RecordResponse;
use carelog_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/records",
    tag = "records",
    responses(
        (status = 200, description = "The caller's records, newest first", body = Vec<RecordResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<RecordResponse>>, HttpAppError> {
    let records = state.db.records.list_for_user(user.user_id).await?;
    Ok(Json(records.into_iter().map(RecordResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/records/{id}",
    tag = "records",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 200, description = "The record", body = RecordResponse),
        (status = 404, description = "No such record for this user", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RecordResponse>, HttpAppError> {
    let record = state
        .db
        .records
        .get(user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

    Ok(Json(RecordResponse::from(record)))
}

#[utoipa::path(
    delete,
    path = "/api/records/{id}",
    tag = "records",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 204, description = "Record and stored file deleted"),
        (status = 404, description = "No such record for this user", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let record = state
        .db
        .records
        .delete(user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

    // The row is gone; a leftover file is only an orphan, so log and move on.
    let storage_key = carelog_storage::generate_key(&record.file_name);
    if let Err(e) = state.intake.storage.delete(&storage_key).await {
        tracing::warn!(
            record_id = %record.id,
            storage_key = %storage_key,
            error = %e,
            "Failed to delete stored file for removed record"
        );
    }

    tracing::info!(record_id = %record.id, "Record deleted");
    Ok(StatusCode::NO_CONTENT)
}
