//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use carelog_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Carelog API",
        version = "0.1.0",
        description = "Health-record API: authenticated users upload medical documents (PDFs and scans), the service extracts their text, analyzes it with a generative model, and stores the result as a queryable record."
    ),
    paths(
        handlers::upload::upload_document,
        handlers::records::list_records,
        handlers::records::get_record,
        handlers::records::delete_record,
        handlers::health::health_check,
    ),
    components(schemas(
        handlers::upload::UploadResponse,
        handlers::health::HealthResponse,
        models::RecordResponse,
        models::ReportAnalysis,
        models::AnalysisOutcome,
        error::ErrorResponse,
    )),
    tags(
        (name = "assistant", description = "Document intake"),
        (name = "records", description = "Record management"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
