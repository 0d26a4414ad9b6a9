//! Document upload handler: the entry point of the intake pipeline.

use axum::{
    extract::{Multipart, State},
    Json,
};
use carelog_core::models::{AnalysisOutcome, RecordResponse};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::intake::IntakeService;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// Answer to the user's question when one was asked, else the summary,
    /// else a generic completion message.
    pub result: String,
    pub analysis: AnalysisOutcome,
    pub record: RecordResponse,
}

/// Upload a medical document, analyze it, and persist a record.
///
/// Multipart fields: `file` (required), `question` or `message` (optional
/// free-text question about the document), `type` (optional record type
/// override).
#[utoipa::path(
    post,
    path = "/api/assistant/upload",
    tag = "assistant",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document processed and saved", body = UploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 422, description = "Document rejected (strict mode)", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart).await?;

    tracing::debug!(
        filename = %form.original_filename,
        has_question = form.question.is_some(),
        declared_type = ?form.declared_type,
        "Upload received"
    );

    let output = IntakeService::new(&state).process(user.user_id, form).await?;

    Ok(Json(UploadResponse {
        success: true,
        result: output.result,
        analysis: output.record.analysis.clone(),
        record: RecordResponse::from(output.record),
    }))
}
