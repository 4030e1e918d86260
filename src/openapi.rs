use axum::Json;
use utoipa::OpenApi;

use crate::{health::HealthResponse, ingest::Payload};

#[derive(OpenApi)]
#[openapi(
    paths(crate::health::health_check, crate::ingest::handlers::ingest),
    components(schemas(Payload, HealthResponse)),
    tags(
        (name = "ingest", description = "Captured page ingestion webhook"),
        (name = "health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
